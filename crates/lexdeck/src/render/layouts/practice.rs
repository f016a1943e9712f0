use eframe::egui::{self, FontId, Pos2, Sense};

use crate::analysis::Feedback;
use crate::audio::PipelineStatus;
use crate::render;
use crate::theme::Theme;

/// What the user asked the pipeline to do this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelAction {
    Start,
    Stop,
}

/// Recording panel anchored to the bottom of the slide: a round
/// record/stop button, a status line, and the feedback card once
/// analysis finishes. Returns a click on the button, if any.
pub fn render_panel(
    ui: &egui::Ui,
    theme: &Theme,
    rect: egui::Rect,
    status: PipelineStatus,
    feedback: Option<&Feedback>,
    error: Option<&str>,
    scale: f32,
) -> Option<PanelAction> {
    let panel_height = 110.0 * scale;
    let panel_rect = egui::Rect::from_min_max(
        Pos2::new(rect.left() + 60.0 * scale, rect.bottom() - panel_height - 50.0 * scale),
        Pos2::new(rect.right() - 60.0 * scale, rect.bottom() - 50.0 * scale),
    );
    ui.painter().rect_filled(
        panel_rect,
        16.0 * scale,
        Theme::with_opacity(theme.panel_background, 0.95),
    );

    // Record button
    let button_radius = 32.0 * scale;
    let button_center = Pos2::new(
        panel_rect.left() + 24.0 * scale + button_radius,
        panel_rect.center().y,
    );
    let recording = status == PipelineStatus::Recording;
    let busy = matches!(
        status,
        PipelineStatus::Encoding | PipelineStatus::AwaitingAnalysis
    );

    let button_fill = if recording {
        theme.incorrect
    } else if busy {
        theme.muted
    } else {
        theme.accent
    };
    ui.painter()
        .circle_filled(button_center, button_radius, button_fill);
    if recording {
        // Stop glyph
        let square = egui::Rect::from_center_size(
            button_center,
            egui::vec2(button_radius * 0.8, button_radius * 0.8),
        );
        ui.painter()
            .rect_filled(square, 3.0 * scale, egui::Color32::WHITE);
    } else {
        ui.painter()
            .circle_filled(button_center, button_radius * 0.45, egui::Color32::WHITE);
    }

    let (status_text, status_color) = match status {
        PipelineStatus::Idle => ("Tap to record your answer", theme.panel_foreground),
        PipelineStatus::Recording => ("Recording... tap to finish", theme.incorrect),
        PipelineStatus::Encoding => ("Preparing audio...", theme.muted),
        PipelineStatus::AwaitingAnalysis => ("The examiner is listening...", theme.muted),
        PipelineStatus::Done => ("Feedback ready. Record again any time.", theme.correct),
        PipelineStatus::Failed => ("Something went wrong", theme.incorrect),
    };
    let text_x = button_center.x + button_radius + 24.0 * scale;
    render::draw_line(
        ui,
        status_text,
        Pos2::new(text_x, panel_rect.center().y - theme.detail_size * scale / 2.0),
        FontId::proportional(theme.detail_size * scale),
        status_color,
    );

    if status == PipelineStatus::Failed
        && let Some(error) = error
    {
        render::draw_wrapped(
            ui,
            error,
            Pos2::new(text_x, panel_rect.center().y + theme.detail_size * scale * 0.6),
            theme.detail_size * 0.8 * scale,
            Theme::with_opacity(theme.incorrect, 0.85),
            panel_rect.right() - text_x - 24.0 * scale,
        );
    }

    if let Some(feedback) = feedback {
        draw_feedback_card(ui, feedback, theme, panel_rect, scale);
    }

    let id = ui.id().with("record_button");
    let hit_rect = egui::Rect::from_center_size(
        button_center,
        egui::vec2(button_radius * 2.4, button_radius * 2.4),
    );
    let response = ui.interact(hit_rect, id, Sense::click());
    if response.clicked() {
        if recording {
            return Some(PanelAction::Stop);
        }
        if status.can_start() {
            return Some(PanelAction::Start);
        }
    }
    None
}

/// Examiner feedback stacked above the panel: score badge plus the
/// remaining commentary.
fn draw_feedback_card(
    ui: &egui::Ui,
    feedback: &Feedback,
    theme: &Theme,
    panel_rect: egui::Rect,
    scale: f32,
) {
    let card_padding = 18.0 * scale;
    let text_size = theme.detail_size * 0.9 * scale;
    let text_width = panel_rect.width() - card_padding * 2.0;

    let badge_height = if feedback.badge.is_some() {
        theme.detail_size * 1.2 * scale + 12.0 * scale
    } else {
        0.0
    };
    let body_height = render::measure_wrapped(ui, &feedback.body, text_size, text_width);
    let card_height = badge_height + body_height + card_padding * 2.0;

    let card_rect = egui::Rect::from_min_size(
        Pos2::new(panel_rect.left(), panel_rect.top() - card_height - 14.0 * scale),
        egui::vec2(panel_rect.width(), card_height),
    );
    ui.painter().rect_filled(
        card_rect,
        16.0 * scale,
        Theme::with_opacity(theme.panel_background, 0.95),
    );

    let mut y = card_rect.top() + card_padding;
    if let Some(badge) = &feedback.badge {
        let badge_text = format!("{} {:.1}/10", badge.label, badge.value);
        let badge_size = theme.detail_size * 1.1 * scale;
        let galley = ui.painter().layout_no_wrap(
            badge_text,
            FontId::proportional(badge_size),
            egui::Color32::BLACK,
        );
        let pill_rect = egui::Rect::from_min_size(
            Pos2::new(card_rect.left() + card_padding, y),
            galley.rect.size() + egui::vec2(20.0 * scale, 8.0 * scale),
        );
        let pill_color = if badge.value >= 7.0 {
            theme.correct
        } else if badge.value >= 5.0 {
            theme.translation
        } else {
            theme.incorrect
        };
        ui.painter()
            .rect_filled(pill_rect, pill_rect.height() / 2.0, pill_color);
        ui.painter().galley(
            pill_rect.left_top() + egui::vec2(10.0 * scale, 4.0 * scale),
            galley,
            egui::Color32::BLACK,
        );
        y += pill_rect.height() + 12.0 * scale;
    }

    render::draw_wrapped(
        ui,
        &feedback.body,
        Pos2::new(card_rect.left() + card_padding, y),
        text_size,
        theme.panel_foreground,
        text_width,
    );
}
