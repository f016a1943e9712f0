use eframe::egui::{self, FontId, Pos2, Sense};

use crate::catalog::{QuizOption, Slide};
use crate::render::{self, SlideView};
use crate::session::Mode;
use crate::theme::Theme;

/// Multiple-choice quiz: stem on top, option cards in a 2x2 grid.
/// Returns the id of the option the user clicked this frame, if any.
pub fn render(
    ui: &egui::Ui,
    slide: &Slide,
    options: &'static [QuizOption],
    view: &SlideView,
    rect: egui::Rect,
    scale: f32,
) -> Option<&'static str> {
    let theme = view.theme;
    let game_show = view.mode == Mode::GameShow && !view.revealed;
    let time_up = view.seconds_left.is_some_and(|s| s <= 0.0);

    if game_show {
        ui.painter()
            .rect_filled(rect, 0.0, theme.game_show_background());
    }

    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut y = content_rect.top();
    if !slide.title.is_empty() {
        y += render::draw_wrapped_centered(
            ui,
            slide.title,
            content_rect.center().x,
            y,
            theme.h2_size * 0.55 * scale,
            if game_show {
                egui::Color32::WHITE
            } else {
                theme.accent
            },
            content_rect.width(),
        ) + 20.0 * scale;
    }
    y += render::draw_wrapped_centered(
        ui,
        slide.body,
        content_rect.center().x,
        y,
        theme.body_size * scale,
        if game_show {
            egui::Color32::WHITE
        } else {
            theme.heading_color
        },
        content_rect.width(),
    ) + 30.0 * scale;

    // Countdown readout, game-show only
    if game_show && let Some(secs) = view.seconds_left {
        let text = if time_up {
            "Time's up!".to_string()
        } else {
            format!("{}", secs.ceil() as u32)
        };
        let color = if secs <= 5.0 {
            theme.incorrect
        } else {
            egui::Color32::WHITE
        };
        render::draw_line(
            ui,
            &text,
            Pos2::new(content_rect.right() - 140.0 * scale, content_rect.top()),
            FontId::monospace(theme.h2_size * scale),
            color,
        );
    }

    // Option grid fills the remaining area
    let grid_top = y.max(content_rect.top() + content_rect.height() * 0.40);
    let grid_rect = egui::Rect::from_min_max(
        Pos2::new(content_rect.left(), grid_top),
        content_rect.right_bottom(),
    );
    let gap = 20.0 * scale;
    let cols = 2usize;
    let rows = options.len().div_ceil(cols);
    let cell_w = (grid_rect.width() - gap * (cols as f32 - 1.0)) / cols as f32;
    let cell_h = (grid_rect.height() - gap * (rows as f32 - 1.0)) / rows as f32;

    let mut clicked: Option<&'static str> = None;
    let palette = theme.game_show_palette();

    for (i, option) in options.iter().enumerate() {
        let col = i % cols;
        let row = i / cols;
        let card_rect = egui::Rect::from_min_size(
            Pos2::new(
                grid_rect.left() + col as f32 * (cell_w + gap),
                grid_rect.top() + row as f32 * (cell_h + gap),
            ),
            egui::vec2(cell_w, cell_h),
        );

        let chosen = view.chosen == Some(option.id);
        let (fill, text_color, dimmed) = card_colors(
            theme,
            option,
            chosen,
            view.revealed,
            game_show,
            palette[i % palette.len()],
        );

        ui.painter().rect_filled(card_rect, 12.0 * scale, fill);
        if chosen {
            ui.painter().rect_stroke(
                card_rect,
                12.0 * scale,
                egui::Stroke::new(3.0 * scale, theme.accent),
                egui::StrokeKind::Outside,
            );
        }

        let label = format!("{}. {}", option.id, option.text);
        let text_size = theme.body_size * 0.6 * scale;
        let text_width = cell_w - 40.0 * scale;
        let text_height = render::measure_wrapped(ui, &label, text_size, text_width);
        render::draw_wrapped(
            ui,
            &label,
            Pos2::new(
                card_rect.left() + 20.0 * scale,
                card_rect.center().y - text_height / 2.0,
            ),
            text_size,
            if dimmed {
                Theme::with_opacity(text_color, 0.45)
            } else {
                text_color
            },
            text_width,
        );

        // Verdict glyph after reveal
        if view.revealed && (option.correct || chosen) {
            let glyph = if option.correct { "\u{2713}" } else { "\u{2717}" };
            render::draw_line(
                ui,
                glyph,
                Pos2::new(card_rect.right() - 44.0 * scale, card_rect.top() + 10.0 * scale),
                FontId::proportional(theme.body_size * 0.7 * scale),
                text_color,
            );
        }

        if !view.revealed && !time_up {
            let id = ui.id().with(("quiz_option", slide.id, option.id));
            let response = ui.interact(card_rect, id, Sense::click());
            if response.clicked() {
                clicked = Some(option.id);
            }
        }
    }

    clicked
}

fn card_colors(
    theme: &Theme,
    option: &QuizOption,
    chosen: bool,
    revealed: bool,
    game_show: bool,
    palette_color: egui::Color32,
) -> (egui::Color32, egui::Color32, bool) {
    if revealed {
        if option.correct {
            (theme.correct, egui::Color32::BLACK, false)
        } else if chosen {
            (theme.incorrect, egui::Color32::BLACK, false)
        } else {
            (theme.panel_background, theme.muted, true)
        }
    } else if game_show {
        (palette_color, egui::Color32::WHITE, false)
    } else {
        (theme.panel_background, theme.panel_foreground, false)
    }
}
