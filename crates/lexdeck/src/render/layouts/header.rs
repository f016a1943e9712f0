use eframe::egui;

use crate::catalog::Slide;
use crate::render;
use crate::theme::Theme;

/// Section divider: large centered title with the subtitle beneath it.
pub fn render(
    ui: &egui::Ui,
    slide: &Slide,
    subtitle: &str,
    theme: &Theme,
    rect: egui::Rect,
    scale: f32,
) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let title_size = theme.h1_size * scale;
    let subtitle_size = theme.h2_size * 0.6 * scale;

    let title_height = render::measure_wrapped(ui, slide.title, title_size, content_rect.width());
    let gap = 32.0 * scale;
    let subtitle_height = if subtitle.is_empty() {
        0.0
    } else {
        render::measure_wrapped(ui, subtitle, subtitle_size, content_rect.width() * 0.8) + gap
    };

    let total = title_height + subtitle_height;
    let mut y = content_rect.center().y - total / 2.0;

    y += render::draw_wrapped_centered(
        ui,
        slide.title,
        content_rect.center().x,
        y,
        title_size,
        theme.heading_color,
        content_rect.width(),
    );

    if !subtitle.is_empty() {
        y += gap;
        render::draw_wrapped_centered(
            ui,
            subtitle,
            content_rect.center().x,
            y,
            subtitle_size,
            theme.accent,
            content_rect.width() * 0.8,
        );
    }

    // Accent rule under the block
    let rule_width = 120.0 * scale;
    let rule_y = content_rect.center().y + total / 2.0 + 40.0 * scale;
    ui.painter().line_segment(
        [
            egui::pos2(content_rect.center().x - rule_width / 2.0, rule_y),
            egui::pos2(content_rect.center().x + rule_width / 2.0, rule_y),
        ],
        egui::Stroke::new(4.0 * scale, theme.accent),
    );
}
