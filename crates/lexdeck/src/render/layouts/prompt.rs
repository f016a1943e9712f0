use eframe::egui::{self, FontId, Pos2};

use crate::catalog::{Slide, Translations};
use crate::render::{self, SlideView};
use crate::session::Mode;
use crate::theme::Theme;

/// Speaking question: centered prompt, secondary-language renderings
/// beneath it, and the examiner insight once revealed.
pub fn render_question(
    ui: &egui::Ui,
    slide: &Slide,
    translations: &Translations,
    insight: Option<&str>,
    view: &SlideView,
    rect: egui::Rect,
    scale: f32,
) {
    let theme = view.theme;
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let body_size = theme.body_size * scale;
    let detail_size = theme.detail_size * scale;

    let mut total = title_height(ui, slide, theme, content_rect, scale)
        + render::measure_wrapped(ui, slide.body, body_size, content_rect.width())
        + 24.0 * scale;
    if translations.uzbek.is_some() {
        total += detail_size + 14.0 * scale;
    }
    if translations.russian.is_some() {
        total += detail_size + 14.0 * scale;
    }

    let mut y = (content_rect.center().y - total / 2.0).max(content_rect.top());
    y += draw_title(ui, slide, theme, content_rect, y, scale);

    y += render::draw_wrapped_centered(
        ui,
        slide.body,
        content_rect.center().x,
        y,
        body_size,
        theme.heading_color,
        content_rect.width(),
    ) + 24.0 * scale;

    for (tag, text) in [("UZ", translations.uzbek), ("RU", translations.russian)] {
        let Some(text) = text else { continue };
        let color = theme.translation;
        render::draw_line_centered(
            ui,
            &format!("{tag}  {text}"),
            content_rect.center().x,
            y,
            FontId::proportional(detail_size),
            color,
        );
        y += detail_size + 14.0 * scale;
    }

    if insight_visible(view.mode)
        && let Some(insight) = insight
    {
        draw_insight_card(ui, insight, theme, content_rect, scale);
    }
}

/// Free-response, info, reason, and speech-practice slides: a title and
/// a centered body, with an optional insight card.
pub fn render_plain(
    ui: &egui::Ui,
    slide: &Slide,
    insight: Option<&str>,
    view: &SlideView,
    rect: egui::Rect,
    scale: f32,
) {
    let theme = view.theme;
    let padding = 80.0 * scale;
    let content_rect = rect.shrink(padding);
    let body_size = theme.body_size * 0.9 * scale;

    let body_height = render::measure_wrapped(ui, slide.body, body_size, content_rect.width());
    let total = title_height(ui, slide, theme, content_rect, scale) + body_height;

    let mut y = (content_rect.center().y - total / 2.0).max(content_rect.top());
    y += draw_title(ui, slide, theme, content_rect, y, scale);

    render::draw_wrapped_centered(
        ui,
        slide.body,
        content_rect.center().x,
        y,
        body_size,
        theme.foreground,
        content_rect.width(),
    );

    if insight_visible(view.mode)
        && let Some(insight) = insight
    {
        draw_insight_card(ui, insight, theme, content_rect, scale);
    }
}

/// Insight notes belong to study modes; game-show and practice keep the
/// slide clean.
fn insight_visible(mode: Mode) -> bool {
    matches!(mode, Mode::Student | Mode::Teacher)
}

fn title_height(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    content_rect: egui::Rect,
    scale: f32,
) -> f32 {
    if slide.title.is_empty() {
        0.0
    } else {
        render::measure_wrapped(ui, slide.title, theme.h2_size * scale, content_rect.width())
            + 36.0 * scale
    }
}

fn draw_title(
    ui: &egui::Ui,
    slide: &Slide,
    theme: &Theme,
    content_rect: egui::Rect,
    y: f32,
    scale: f32,
) -> f32 {
    if slide.title.is_empty() {
        return 0.0;
    }
    render::draw_wrapped_centered(
        ui,
        slide.title,
        content_rect.center().x,
        y,
        theme.h2_size * scale,
        theme.accent,
        content_rect.width(),
    ) + 36.0 * scale
}

/// Examiner insight pinned to the bottom of the content area.
fn draw_insight_card(
    ui: &egui::Ui,
    insight: &str,
    theme: &Theme,
    content_rect: egui::Rect,
    scale: f32,
) {
    let card_padding = 20.0 * scale;
    let text_size = theme.detail_size * scale;
    let card_width = content_rect.width() * 0.85;
    let text_width = card_width - card_padding * 2.0;
    let text_height = render::measure_wrapped(ui, insight, text_size, text_width);

    let card_height = text_height + card_padding * 2.0;
    let card_rect = egui::Rect::from_min_size(
        Pos2::new(
            content_rect.center().x - card_width / 2.0,
            content_rect.bottom() - card_height,
        ),
        egui::vec2(card_width, card_height),
    );

    ui.painter()
        .rect_filled(card_rect, 10.0 * scale, theme.panel_background);
    let bar_rect = egui::Rect::from_min_size(
        card_rect.left_top(),
        egui::vec2(4.0 * scale, card_height),
    );
    ui.painter().rect_filled(bar_rect, 2.0, theme.accent);

    render::draw_wrapped(
        ui,
        insight,
        card_rect.left_top() + egui::vec2(card_padding, card_padding),
        text_size,
        theme.panel_foreground,
        text_width,
    );
}
