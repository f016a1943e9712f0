use eframe::egui;
use std::time::Instant;

use crate::audio::cues::{Cue, CuePlayer};
use crate::audio::{PipelineStatus, RecordingPipeline};
use crate::analysis::Rubric;
use crate::catalog::SLIDES;
use crate::config::{AnalysisConfig, Config};
use crate::render::{self, SlideView, layouts::practice};
use crate::session::{Mode, Session};
use crate::store::Store;
use crate::theme::Theme;

/// Answer window for quiz slides in game-show mode.
const QUIZ_COUNTDOWN_SECS: f32 = 30.0;

struct Toast {
    message: String,
    start: Instant,
}

impl Toast {
    fn new(message: String) -> Self {
        Self {
            message,
            start: Instant::now(),
        }
    }

    fn opacity(&self) -> f32 {
        let elapsed = self.start.elapsed().as_secs_f32();
        let duration = 1.5;
        let fade_start = 1.0;
        if elapsed < fade_start {
            1.0
        } else if elapsed < duration {
            1.0 - (elapsed - fade_start) / (duration - fade_start)
        } else {
            0.0
        }
    }

    fn is_expired(&self) -> bool {
        self.start.elapsed().as_secs_f32() >= 1.5
    }
}

struct DeckApp {
    session: Session,
    pipeline: RecordingPipeline,
    cues: CuePlayer,
    analysis: AnalysisConfig,
    toast: Option<Toast>,
    confirm_reset: bool,
    /// When the current slide became visible; drives the game-show
    /// countdown.
    slide_entered: Instant,
    last_ctrl_c: Option<Instant>,
}

impl DeckApp {
    fn new(session: Session, analysis: AnalysisConfig) -> Self {
        Self {
            session,
            pipeline: RecordingPipeline::new(),
            cues: CuePlayer::new(),
            analysis,
            toast: None,
            confirm_reset: false,
            slide_entered: Instant::now(),
            last_ctrl_c: None,
        }
    }

    /// Anything recording or in flight belongs to the slide being left.
    fn on_slide_changed(&mut self) {
        self.pipeline.cancel();
        self.slide_entered = Instant::now();
    }

    fn go_next(&mut self) {
        if self.session.go_next() {
            self.on_slide_changed();
            self.cues.play(Cue::Nav);
        }
    }

    fn go_prev(&mut self) {
        if self.session.go_prev() {
            self.on_slide_changed();
            self.cues.play(Cue::Nav);
        }
    }

    fn switch_mode(&mut self) {
        let mode = self.session.switch_mode();
        self.on_slide_changed();
        self.toast = Some(Toast::new(format!("Mode: {}", mode.label())));
    }

    fn toggle_theme(&mut self) {
        let dark = self.session.toggle_dark_mode();
        let name = if dark { "dark" } else { "light" };
        self.toast = Some(Toast::new(format!("Theme: {name}")));
    }

    fn theme(&self) -> Theme {
        if self.session.dark_mode() {
            Theme::dark()
        } else {
            Theme::light()
        }
    }

    /// Remaining answer time on the current slide, game-show quizzes
    /// only.
    fn seconds_left(&self) -> Option<f32> {
        if self.session.mode() != Mode::GameShow {
            return None;
        }
        let slide = self.session.current_slide();
        if !slide.is_quiz() || self.session.is_revealed(slide.id) {
            return None;
        }
        Some((QUIZ_COUNTDOWN_SECS - self.slide_entered.elapsed().as_secs_f32()).max(0.0))
    }

    fn choose_option(&mut self, option_id: &str) {
        let slide = self.session.current_slide();
        if let Some(outcome) = self.session.submit_answer(slide.id, option_id) {
            self.cues.play(if outcome.correct {
                Cue::Correct
            } else {
                Cue::Wrong
            });
        }
    }

    /// Map a number key (1-based) to the option at that position.
    fn choose_option_by_index(&mut self, index: usize) {
        if self.seconds_left().is_some_and(|s| s <= 0.0) {
            return;
        }
        let slide = self.session.current_slide();
        let Some(options) = slide.options() else {
            return;
        };
        if let Some(option) = options.get(index) {
            self.choose_option(option.id);
        }
    }

    fn confirm_reset_now(&mut self) {
        self.session.reset();
        self.on_slide_changed();
        self.confirm_reset = false;
        self.toast = Some(Toast::new("Progress reset".to_string()));
    }

    fn compute_scale(rect: egui::Rect) -> f32 {
        let ref_w = 1920.0;
        let ref_h = 1080.0;
        (rect.width() / ref_w).min(rect.height() / ref_h)
    }
}

impl eframe::App for DeckApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pipeline.poll();

        // Collect viewport commands to send AFTER the input closure
        // (sending inside ctx.input() causes RwLock deadlock)
        let mut viewport_cmds: Vec<egui::ViewportCommand> = Vec::new();

        ctx.input(|i| {
            // Quit: Q from any state
            if i.key_pressed(egui::Key::Q) {
                viewport_cmds.push(egui::ViewportCommand::Close);
                return;
            }

            // Ctrl+C double-tap to quit
            if i.modifiers.ctrl && i.key_pressed(egui::Key::C) {
                if let Some(last) = self.last_ctrl_c
                    && last.elapsed().as_secs_f32() < 1.0
                {
                    viewport_cmds.push(egui::ViewportCommand::Close);
                    return;
                }
                self.last_ctrl_c = Some(Instant::now());
                self.toast = Some(Toast::new("Press Ctrl+C again to quit".to_string()));
                return;
            }

            // Fullscreen toggle: F
            if i.key_pressed(egui::Key::F) {
                viewport_cmds.push(egui::ViewportCommand::Fullscreen(
                    !i.viewport().fullscreen.unwrap_or(false),
                ));
                return;
            }

            // The reset prompt swallows everything else until answered
            if self.confirm_reset {
                if i.key_pressed(egui::Key::Enter) || i.key_pressed(egui::Key::Y) {
                    self.confirm_reset_now();
                } else if i.key_pressed(egui::Key::Escape) || i.key_pressed(egui::Key::N) {
                    self.confirm_reset = false;
                }
                return;
            }

            if i.key_pressed(egui::Key::ArrowRight)
                || i.key_pressed(egui::Key::Space)
                || i.key_pressed(egui::Key::N)
            {
                self.go_next();
            }
            if i.key_pressed(egui::Key::ArrowLeft) || i.key_pressed(egui::Key::P) {
                self.go_prev();
            }
            if i.key_pressed(egui::Key::M) {
                self.switch_mode();
            }
            if i.key_pressed(egui::Key::D) {
                self.toggle_theme();
            }
            if i.key_pressed(egui::Key::R) {
                self.confirm_reset = true;
            }

            // Number keys pick quiz options by position
            let digits = [
                egui::Key::Num1,
                egui::Key::Num2,
                egui::Key::Num3,
                egui::Key::Num4,
                egui::Key::Num5,
                egui::Key::Num6,
                egui::Key::Num7,
                egui::Key::Num8,
                egui::Key::Num9,
            ];
            for (idx, key) in digits.iter().enumerate() {
                if i.key_pressed(*key) {
                    self.choose_option_by_index(idx);
                }
            }
        });

        for cmd in viewport_cmds {
            ctx.send_viewport_cmd(cmd);
        }

        if self.toast.as_ref().is_some_and(|t| t.is_expired()) {
            self.toast = None;
        }

        let theme = self.theme();
        let bg = theme.background;

        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(bg).inner_margin(0.0))
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                ui.painter().rect_filled(rect, 0.0, bg);
                let scale = Self::compute_scale(rect);

                let slide = self.session.current_slide();
                let view = SlideView {
                    theme: &theme,
                    mode: self.session.mode(),
                    chosen: self.session.answer_for(slide.id),
                    revealed: self.session.is_revealed(slide.id),
                    seconds_left: self.seconds_left(),
                };
                let clicked = render::render_slide(ui, slide, &view, rect, scale);
                if let Some(option_id) = clicked {
                    self.choose_option(option_id);
                }

                if self.session.recording_panel_visible() {
                    let action = practice::render_panel(
                        ui,
                        &theme,
                        rect,
                        self.pipeline.status(),
                        self.pipeline.feedback(),
                        self.pipeline.error(),
                        scale,
                    );
                    match action {
                        Some(practice::PanelAction::Start) => self.pipeline.start(),
                        Some(practice::PanelAction::Stop) => {
                            let slide = self.session.current_slide();
                            self.pipeline.stop(
                                self.analysis.clone(),
                                slide.body.to_string(),
                                Rubric::for_slide(&slide.kind),
                            );
                        }
                        None => {}
                    }
                }

                self.draw_chrome(ui, &theme, rect, scale);

                if let Some(ref toast) = self.toast {
                    draw_toast(ui, toast, &theme, rect, scale);
                    ctx.request_repaint();
                }

                if self.confirm_reset {
                    draw_confirm_reset(ui, &theme, rect, scale);
                }
            });

        // Keep animating while waiting on audio work or a countdown
        if self.pipeline.status().is_busy() || self.seconds_left().is_some() {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}

impl DeckApp {
    /// Header and footer overlays: mode pill, score, counter, progress.
    fn draw_chrome(&self, ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
        let margin = 16.0 * scale;

        // Mode pill, top left
        let mode_galley = ui.painter().layout_no_wrap(
            format!(" {} ", self.session.mode().label()),
            egui::FontId::monospace(15.0 * scale),
            theme.background,
        );
        let pill_rect = egui::Rect::from_min_size(
            egui::pos2(rect.left() + margin, rect.top() + margin),
            mode_galley.rect.size() + egui::vec2(12.0 * scale, 8.0 * scale),
        );
        ui.painter()
            .rect_filled(pill_rect, pill_rect.height() / 2.0, theme.accent);
        ui.painter().galley(
            pill_rect.left_top() + egui::vec2(6.0 * scale, 4.0 * scale),
            mode_galley,
            theme.background,
        );

        // Score, top right
        let score_color = Theme::with_opacity(theme.foreground, 0.8);
        let score_galley = ui.painter().layout_no_wrap(
            format!("Score: {}", self.session.score()),
            egui::FontId::monospace(16.0 * scale),
            score_color,
        );
        let score_pos = egui::pos2(
            rect.right() - score_galley.rect.width() - margin,
            rect.top() + margin,
        );
        ui.painter().galley(score_pos, score_galley, score_color);

        // Slide counter, bottom right
        let counter_text = format!(
            "{} / {}",
            self.session.current_index() + 1,
            self.session.slide_count()
        );
        let counter_color = Theme::with_opacity(theme.foreground, 0.4);
        let counter_galley = ui.painter().layout_no_wrap(
            counter_text,
            egui::FontId::monospace(14.0 * scale),
            counter_color,
        );
        let counter_pos = egui::pos2(
            rect.right() - counter_galley.rect.width() - margin,
            rect.bottom() - 30.0 * scale,
        );
        ui.painter()
            .galley(counter_pos, counter_galley, counter_color);

        // Progress bar along the bottom edge
        let progress = (self.session.current_index() + 1) as f32
            / self.session.slide_count().max(1) as f32;
        let bar_height = 4.0 * scale;
        let bar_rect = egui::Rect::from_min_max(
            egui::pos2(rect.left(), rect.bottom() - bar_height),
            egui::pos2(rect.left() + rect.width() * progress, rect.bottom()),
        );
        ui.painter()
            .rect_filled(bar_rect, 0.0, Theme::with_opacity(theme.accent, 0.8));
    }
}

fn draw_toast(ui: &egui::Ui, toast: &Toast, theme: &Theme, rect: egui::Rect, scale: f32) {
    let opacity = toast.opacity();
    if opacity <= 0.0 {
        return;
    }
    let toast_color = Theme::with_opacity(theme.foreground, opacity * 0.9);
    let toast_bg = Theme::with_opacity(theme.panel_background, opacity * 0.9);
    let galley = ui.painter().layout_no_wrap(
        toast.message.clone(),
        egui::FontId::proportional(20.0 * scale),
        toast_color,
    );
    let padding = 16.0 * scale;
    let toast_rect = egui::Rect::from_min_size(
        egui::pos2(
            rect.center().x - galley.rect.width() / 2.0 - padding,
            rect.bottom() - 80.0 * scale,
        ),
        egui::vec2(
            galley.rect.width() + padding * 2.0,
            galley.rect.height() + padding * 2.0,
        ),
    );
    ui.painter().rect_filled(toast_rect, 8.0 * scale, toast_bg);
    let text_pos = egui::pos2(toast_rect.left() + padding, toast_rect.top() + padding);
    ui.painter().galley(text_pos, galley, toast_color);
}

fn draw_confirm_reset(ui: &egui::Ui, theme: &Theme, rect: egui::Rect, scale: f32) {
    ui.painter()
        .rect_filled(rect, 0.0, Theme::with_opacity(egui::Color32::BLACK, 0.6));

    let card_rect =
        egui::Rect::from_center_size(rect.center(), egui::vec2(520.0 * scale, 180.0 * scale));
    ui.painter()
        .rect_filled(card_rect, 16.0 * scale, theme.panel_background);

    render::draw_line_centered(
        ui,
        "Reset all progress?",
        card_rect.center().x,
        card_rect.top() + 40.0 * scale,
        egui::FontId::proportional(28.0 * scale),
        theme.heading_color,
    );
    render::draw_line_centered(
        ui,
        "Score, answers, and position will be erased.",
        card_rect.center().x,
        card_rect.top() + 84.0 * scale,
        egui::FontId::proportional(17.0 * scale),
        theme.panel_foreground,
    );
    render::draw_line_centered(
        ui,
        "Enter: reset    Esc: cancel",
        card_rect.center().x,
        card_rect.bottom() - 42.0 * scale,
        egui::FontId::monospace(16.0 * scale),
        Theme::with_opacity(theme.panel_foreground, 0.7),
    );
}

pub fn run(windowed: bool, start_slide: Option<usize>) -> anyhow::Result<()> {
    let config = Config::load_or_default();
    let analysis = config.analysis.clone().unwrap_or_default();

    let store = Store::at_default_location();
    let had_snapshot = store.path().is_some_and(|p| p.exists());
    let mut session = Session::restore(SLIDES, store);

    // Config defaults apply only when there is no saved session to honor
    if !had_snapshot
        && let Some(defaults) = &config.defaults
    {
        if defaults.theme.as_deref() == Some("light") {
            session.toggle_dark_mode();
        }
        match defaults.start_mode.as_deref() {
            Some("first") | None => {}
            Some(n) => {
                if let Ok(num) = n.parse::<usize>() {
                    session.jump_to(num.saturating_sub(1));
                }
            }
        }
    }

    // CLI flag wins over everything
    if let Some(s) = start_slide {
        session.jump_to(s.saturating_sub(1));
    }

    let title = "LexDeck \u{2014} IELTS Speaking Practice";
    let viewport = if windowed {
        egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_title(title)
    } else {
        egui::ViewportBuilder::default()
            .with_fullscreen(true)
            .with_title(title)
    };

    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    eframe::run_native(
        title,
        options,
        Box::new(move |_cc| Ok(Box::new(DeckApp::new(session, analysis)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
