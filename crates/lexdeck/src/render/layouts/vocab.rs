use eframe::egui::{self, FontId, Pos2};

use crate::catalog::Slide;
use crate::render;
use crate::theme::Theme;

/// Vocabulary card: title, body, then the entries as a bulleted list,
/// split into two columns when the list is long.
pub fn render(
    ui: &egui::Ui,
    slide: &Slide,
    entries: &[&str],
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut y = content_rect.top();
    if !slide.title.is_empty() {
        y += render::draw_wrapped_centered(
            ui,
            slide.title,
            content_rect.center().x,
            y,
            theme.h2_size * 0.6 * scale,
            theme.accent,
            content_rect.width(),
        ) + 24.0 * scale;
    }
    if !slide.body.is_empty() {
        y += render::draw_wrapped_centered(
            ui,
            slide.body,
            content_rect.center().x,
            y,
            theme.body_size * 0.7 * scale,
            theme.foreground,
            content_rect.width(),
        ) + 32.0 * scale;
    }

    if entries.is_empty() {
        return;
    }

    let cols = if entries.len() > 6 { 2 } else { 1 };
    let per_col = entries.len().div_ceil(cols);
    let col_gap = 40.0 * scale;
    let col_width = (content_rect.width() - col_gap * (cols as f32 - 1.0)) / cols as f32;
    let entry_size = theme.detail_size * 1.1 * scale;
    let marker_width = 34.0 * scale;
    let entry_gap = 14.0 * scale;

    for (col, chunk) in entries.chunks(per_col).enumerate() {
        let x = content_rect.left() + col as f32 * (col_width + col_gap);
        let mut entry_y = y;
        for entry in chunk {
            render::draw_line(
                ui,
                "\u{2022}",
                Pos2::new(x, entry_y),
                FontId::proportional(entry_size),
                theme.accent,
            );
            let height = render::draw_wrapped(
                ui,
                entry,
                Pos2::new(x + marker_width, entry_y),
                entry_size,
                theme.foreground,
                col_width - marker_width,
            );
            entry_y += height + entry_gap;
        }
    }
}
