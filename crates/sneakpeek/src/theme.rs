use eframe::egui::Color32;

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Page behind the overlay.
    pub page: Color32,
    pub page_foreground: Color32,
    /// Dimming layer between the page and the card.
    pub backdrop: Color32,
    pub card: Color32,
    pub card_border: Color32,
    pub panel: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub hero_background: Color32,
    pub hero_foreground: Color32,
    pub indicator_active: Color32,
    pub indicator_idle: Color32,
    pub title_size: f32,
    pub body_size: f32,
    pub label_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            page: Color32::from_rgb(0x12, 0x11, 0x16),
            page_foreground: Color32::from_rgb(0x9A, 0x96, 0xA8),
            backdrop: Color32::from_black_alpha(160),
            card: Color32::from_rgb(0x1E, 0x1C, 0x24),
            card_border: Color32::from_white_alpha(30),
            panel: Color32::from_rgb(0x26, 0x23, 0x2E),
            foreground: Color32::from_rgb(0xEC, 0xEA, 0xF2),
            muted: Color32::from_rgb(0x9A, 0x96, 0xA8),
            hero_background: Color32::from_rgb(0xF4, 0xF0, 0xFF),
            hero_foreground: Color32::from_rgb(0x0B, 0x09, 0x0C),
            indicator_active: Color32::WHITE,
            indicator_idle: Color32::from_white_alpha(40),
            title_size: 28.0,
            body_size: 16.0,
            label_size: 11.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            page: Color32::from_rgb(0xF6, 0xF3, 0xFB),
            page_foreground: Color32::from_rgb(0x5A, 0x56, 0x66),
            backdrop: Color32::from_black_alpha(128),
            card: Color32::from_rgb(0xFC, 0xFC, 0xFD),
            card_border: Color32::from_black_alpha(14),
            panel: Color32::from_rgb(0xF5, 0xF0, 0xFF),
            foreground: Color32::from_rgb(0x0B, 0x09, 0x0C),
            muted: Color32::from_rgb(0x70, 0x6C, 0x78),
            hero_background: Color32::from_rgb(0x11, 0x11, 0x11),
            hero_foreground: Color32::WHITE,
            indicator_active: Color32::BLACK,
            indicator_idle: Color32::from_black_alpha(38),
            title_size: 28.0,
            body_size: 16.0,
            label_size: 11.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.name == "dark" {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Apply opacity to a color
    pub fn with_opacity(color: Color32, opacity: f32) -> Color32 {
        Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), (opacity * 255.0) as u8)
    }
}
