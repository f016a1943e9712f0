use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub foreground: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub panel_background: Color32,
    pub panel_foreground: Color32,
    pub correct: Color32,
    pub incorrect: Color32,
    pub muted: Color32,
    pub translation: Color32,
    pub h1_size: f32,
    pub h2_size: f32,
    pub body_size: f32,
    pub detail_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            foreground: Color32::from_rgb(0xCB, 0xD5, 0xE1),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x38, 0xBD, 0xF8),
            panel_background: Color32::from_rgb(0x1E, 0x29, 0x3B),
            panel_foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            correct: Color32::from_rgb(0x4A, 0xDE, 0x80),
            incorrect: Color32::from_rgb(0xF8, 0x71, 0x71),
            muted: Color32::from_rgb(0x64, 0x74, 0x8B),
            translation: Color32::from_rgb(0xFB, 0xBF, 0x24),
            h1_size: 88.0,
            h2_size: 56.0,
            body_size: 40.0,
            detail_size: 26.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            foreground: Color32::from_rgb(0x1E, 0x29, 0x3B),
            heading_color: Color32::from_rgb(0x0F, 0x17, 0x2A),
            accent: Color32::from_rgb(0x02, 0x84, 0xC7),
            panel_background: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            panel_foreground: Color32::from_rgb(0x33, 0x41, 0x55),
            correct: Color32::from_rgb(0x16, 0xA3, 0x4A),
            incorrect: Color32::from_rgb(0xDC, 0x26, 0x26),
            muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
            translation: Color32::from_rgb(0xB4, 0x53, 0x09),
            h1_size: 88.0,
            h2_size: 56.0,
            body_size: 40.0,
            detail_size: 26.0,
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }

    /// Saturated backdrop used while the quiz countdown runs.
    pub fn game_show_background(&self) -> Color32 {
        if self.name == "dark" {
            Color32::from_rgb(0x2E, 0x10, 0x65)
        } else {
            Color32::from_rgb(0x4C, 0x1D, 0x95)
        }
    }

    /// High-contrast option card colors for the countdown phase, cycled
    /// by option position.
    pub fn game_show_palette(&self) -> [Color32; 4] {
        [
            Color32::from_rgb(0xE2, 0x1B, 0x3C), // red
            Color32::from_rgb(0x12, 0x68, 0xCE), // blue
            Color32::from_rgb(0xD8, 0x9E, 0x00), // gold
            Color32::from_rgb(0x26, 0x89, 0x0C), // green
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_opacity_scales_alpha() {
        let c = Theme::with_opacity(Color32::WHITE, 0.5);
        assert_eq!(c.a(), 127);
        assert_eq!(Theme::with_opacity(Color32::BLACK, 0.0).a(), 0);
    }

    #[test]
    fn test_game_show_backdrop_differs_per_variant() {
        assert_ne!(
            Theme::dark().game_show_background(),
            Theme::light().game_show_background()
        );
    }
}
