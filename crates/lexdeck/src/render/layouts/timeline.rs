use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{TimelineEventKind, TimelineSpec};
use crate::render;
use crate::theme::Theme;

/// Grammar tense timeline: a horizontal base line with labeled moment
/// markers below it, range events as bands on the line, and point
/// events as cards floating above their position.
pub fn render(ui: &egui::Ui, spec: &TimelineSpec, theme: &Theme, rect: egui::Rect, scale: f32) {
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);

    let mut y = content_rect.top();
    y += render::draw_wrapped_centered(
        ui,
        spec.name,
        content_rect.center().x,
        y,
        theme.h2_size * 0.6 * scale,
        theme.accent,
        content_rect.width(),
    ) + 20.0 * scale;
    render::draw_wrapped_centered(
        ui,
        spec.description,
        content_rect.center().x,
        y,
        theme.detail_size * 1.1 * scale,
        theme.foreground,
        content_rect.width() * 0.9,
    );

    // Base line sits in the lower half so event cards have headroom.
    let line_y = content_rect.top() + content_rect.height() * 0.62;
    let line_left = content_rect.left() + 20.0 * scale;
    let line_right = content_rect.right() - 20.0 * scale;
    let at = |position: f32| line_left + (line_right - line_left) * (position / 100.0);

    ui.painter().line_segment(
        [Pos2::new(line_left, line_y), Pos2::new(line_right, line_y)],
        egui::Stroke::new(3.0 * scale, theme.muted),
    );
    // Arrowhead toward the future
    ui.painter().add(egui::Shape::convex_polygon(
        vec![
            Pos2::new(line_right + 14.0 * scale, line_y),
            Pos2::new(line_right, line_y - 7.0 * scale),
            Pos2::new(line_right, line_y + 7.0 * scale),
        ],
        theme.muted,
        egui::Stroke::NONE,
    ));

    // Range bands first so dots and cards paint over them
    for event in spec.events {
        if let TimelineEventKind::Range { from } = event.kind {
            let band_rect = egui::Rect::from_min_max(
                Pos2::new(at(from), line_y - 10.0 * scale),
                Pos2::new(at(event.position), line_y + 10.0 * scale),
            );
            ui.painter().rect_filled(
                band_rect,
                5.0 * scale,
                Theme::with_opacity(theme.accent, 0.45),
            );
        }
    }

    // Moment markers: tick plus label under the line
    for marker in spec.markers {
        let x = at(marker.position);
        ui.painter().line_segment(
            [
                Pos2::new(x, line_y - 12.0 * scale),
                Pos2::new(x, line_y + 12.0 * scale),
            ],
            egui::Stroke::new(2.0 * scale, theme.foreground),
        );
        render::draw_line_centered(
            ui,
            marker.label,
            x,
            line_y + 20.0 * scale,
            FontId::proportional(theme.detail_size * 0.9 * scale),
            theme.muted,
        );
    }

    // Event cards above the line
    let card_size = theme.detail_size * 0.95 * scale;
    for (i, event) in spec.events.iter().enumerate() {
        let anchor_x = match event.kind {
            TimelineEventKind::Point => at(event.position),
            TimelineEventKind::Range { from } => (at(from) + at(event.position)) / 2.0,
        };

        if event.kind == TimelineEventKind::Point {
            ui.painter()
                .circle_filled(Pos2::new(anchor_x, line_y), 7.0 * scale, theme.accent);
        }

        // Stagger rows so neighboring cards do not overlap
        let card_y = line_y - (70.0 + 58.0 * (i % 2) as f32) * scale;
        let card_padding = 10.0 * scale;
        let label_galley = ui.painter().layout_no_wrap(
            event.label.to_string(),
            FontId::proportional(card_size),
            theme.panel_foreground,
        );
        let card_rect = egui::Rect::from_center_size(
            Pos2::new(anchor_x, card_y),
            label_galley.rect.size() + egui::vec2(card_padding * 2.0, card_padding * 2.0),
        );
        ui.painter()
            .rect_filled(card_rect, 8.0 * scale, theme.panel_background);
        ui.painter().galley(
            card_rect.left_top() + egui::vec2(card_padding, card_padding),
            label_galley,
            theme.panel_foreground,
        );

        // Connector from card to anchor
        ui.painter().line_segment(
            [
                Pos2::new(anchor_x, card_rect.bottom()),
                Pos2::new(anchor_x, line_y - 8.0 * scale),
            ],
            egui::Stroke::new(1.5 * scale, Theme::with_opacity(theme.muted, 0.6)),
        );
    }

    // Event descriptions listed under the markers
    let mut desc_y = line_y + 60.0 * scale;
    for event in spec.events {
        if event.description.is_empty() {
            continue;
        }
        let height = render::draw_wrapped(
            ui,
            &format!("{}: {}", event.label, event.description),
            Pos2::new(content_rect.left(), desc_y),
            theme.detail_size * 0.85 * scale,
            theme.muted,
            content_rect.width(),
        );
        desc_y += height + 8.0 * scale;
    }
}
