pub mod layouts;

use eframe::egui::{self, Color32, FontId, Pos2};

use crate::catalog::{Slide, SlideKind};
use crate::session::Mode;
use crate::theme::Theme;

/// Per-frame view state the layouts need beyond the slide itself.
pub struct SlideView<'a> {
    pub theme: &'a Theme,
    pub mode: Mode,
    /// Option id the user picked on this slide, if any.
    pub chosen: Option<&'a str>,
    /// Whether quiz correctness is visible on this slide.
    pub revealed: bool,
    /// Remaining countdown seconds in game-show mode, None otherwise.
    pub seconds_left: Option<f32>,
}

/// Render one slide into `rect`. Returns the id of a quiz option the
/// user clicked this frame, if any.
pub fn render_slide(
    ui: &egui::Ui,
    slide: &Slide,
    view: &SlideView,
    rect: egui::Rect,
    scale: f32,
) -> Option<&'static str> {
    match &slide.kind {
        SlideKind::Header { subtitle } => {
            layouts::header::render(ui, slide, subtitle, view.theme, rect, scale);
            None
        }
        SlideKind::Question {
            translations,
            insight,
        } => {
            layouts::prompt::render_question(
                ui,
                slide,
                translations,
                *insight,
                view,
                rect,
                scale,
            );
            None
        }
        SlideKind::Quiz { options } => layouts::quiz::render(ui, slide, options, view, rect, scale),
        SlideKind::FreeResponse => {
            layouts::prompt::render_plain(ui, slide, None, view, rect, scale);
            None
        }
        SlideKind::Info { insight } | SlideKind::Reason { insight } => {
            layouts::prompt::render_plain(ui, slide, *insight, view, rect, scale);
            None
        }
        SlideKind::VocabList { entries } => {
            layouts::vocab::render(ui, slide, entries, view.theme, rect, scale);
            None
        }
        SlideKind::Timeline(spec) => {
            layouts::timeline::render(ui, spec, view.theme, rect, scale);
            None
        }
        SlideKind::SpeechPractice => {
            layouts::prompt::render_plain(ui, slide, None, view, rect, scale);
            None
        }
    }
}

/// Paint a single unwrapped line. Returns the height used.
pub fn draw_line(ui: &egui::Ui, text: &str, pos: Pos2, font: FontId, color: Color32) -> f32 {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint a horizontally centered unwrapped line. Returns the height used.
pub fn draw_line_centered(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    y: f32,
    font: FontId,
    color: Color32,
) -> f32 {
    let galley = ui.painter().layout_no_wrap(text.to_string(), font, color);
    let height = galley.rect.height();
    let pos = Pos2::new(center_x - galley.rect.width() / 2.0, y);
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint wrapped text left-aligned within `max_width`. Returns the
/// height used.
pub fn draw_wrapped(
    ui: &egui::Ui,
    text: &str,
    pos: Pos2,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(
        text.to_string(),
        FontId::proportional(font_size),
        color,
        max_width,
    );
    let height = galley.rect.height();
    ui.painter().galley(pos, galley, color);
    height
}

/// Paint wrapped text with each row centered on `center_x`. Returns the
/// height used.
pub fn draw_wrapped_centered(
    ui: &egui::Ui,
    text: &str,
    center_x: f32,
    y: f32,
    font_size: f32,
    color: Color32,
    max_width: f32,
) -> f32 {
    let galley = ui.painter().layout(
        text.to_string(),
        FontId::proportional(font_size),
        color,
        max_width,
    );
    let height = galley.rect.height();
    let pos = Pos2::new(center_x - galley.rect.width() / 2.0, y);
    ui.painter().galley(pos, galley, color);
    height
}

/// Measure wrapped text height without painting.
pub fn measure_wrapped(ui: &egui::Ui, text: &str, font_size: f32, max_width: f32) -> f32 {
    ui.painter()
        .layout(
            text.to_string(),
            FontId::proportional(font_size),
            Color32::WHITE,
            max_width,
        )
        .rect
        .height()
}
