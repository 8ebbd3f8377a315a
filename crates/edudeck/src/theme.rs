use eframe::egui::Color32;

/// Bar and slice colors, cycled per category.
pub const CHART_PALETTE: [Color32; 10] = [
    Color32::from_rgb(0xFF, 0x6B, 0x6B),
    Color32::from_rgb(0x4E, 0xCD, 0xC4),
    Color32::from_rgb(0x45, 0xB7, 0xD1),
    Color32::from_rgb(0xFF, 0xA0, 0x7A),
    Color32::from_rgb(0x98, 0xD8, 0xC8),
    Color32::from_rgb(0xF7, 0xDC, 0x6F),
    Color32::from_rgb(0xBB, 0x8F, 0xCE),
    Color32::from_rgb(0x85, 0xC1, 0xE2),
    Color32::from_rgb(0xF8, 0xB7, 0x39),
    Color32::from_rgb(0xE7, 0x4C, 0x3C),
];

pub const GENDER_PALETTE: [Color32; 2] = [
    Color32::from_rgb(0xEC, 0x48, 0x99),
    Color32::from_rgb(0x3B, 0x82, 0xF6),
];

/// Per-series colors for grouped bar charts.
pub const SERIES_PALETTE: [Color32; 2] = [
    Color32::from_rgb(0x85, 0xC1, 0xE2),
    Color32::from_rgb(0xF8, 0xB7, 0x39),
];

/// Accent used by cards, insight boxes and variable analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accent {
    Blue,
    Purple,
    Green,
    Orange,
    Pink,
    Indigo,
}

impl Accent {
    /// Saturated tone (card fill, borders).
    pub fn strong(&self) -> Color32 {
        match self {
            Self::Blue => Color32::from_rgb(0x3B, 0x82, 0xF6),
            Self::Purple => Color32::from_rgb(0xA8, 0x55, 0xF7),
            Self::Green => Color32::from_rgb(0x22, 0xC5, 0x5E),
            Self::Orange => Color32::from_rgb(0xF9, 0x73, 0x16),
            Self::Pink => Color32::from_rgb(0xEC, 0x48, 0x99),
            Self::Indigo => Color32::from_rgb(0x63, 0x66, 0xF1),
        }
    }

    /// Pale tone (box backgrounds) for the given theme.
    pub fn soft(&self, theme: &Theme) -> Color32 {
        let base = self.strong();
        let mix = if theme.is_dark() { 0.22 } else { 0.12 };
        blend(theme.surface, base, mix)
    }

    /// Text tone readable on [`Accent::soft`].
    pub fn text(&self, theme: &Theme) -> Color32 {
        let base = self.strong();
        if theme.is_dark() {
            blend(base, Color32::WHITE, 0.35)
        } else {
            blend(base, Color32::BLACK, 0.3)
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    pub background: Color32,
    pub surface: Color32,
    pub foreground: Color32,
    pub muted: Color32,
    pub heading_color: Color32,
    pub accent: Color32,
    pub grid_line: Color32,
    pub table_header: Color32,
    pub table_stripe: Color32,
    pub title_size: f32,
    pub h2_size: f32,
    pub h3_size: f32,
    pub body_size: f32,
    pub small_size: f32,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            background: Color32::from_rgb(0x0F, 0x17, 0x2A),
            surface: Color32::from_rgb(0x1E, 0x29, 0x3B),
            foreground: Color32::from_rgb(0xE2, 0xE8, 0xF0),
            muted: Color32::from_rgb(0x94, 0xA3, 0xB8),
            heading_color: Color32::WHITE,
            accent: Color32::from_rgb(0x63, 0x66, 0xF1),
            grid_line: Color32::from_rgb(0x33, 0x41, 0x55),
            table_header: Color32::from_rgb(0x0B, 0x11, 0x20),
            table_stripe: Color32::from_rgb(0x26, 0x33, 0x47),
            title_size: 72.0,
            h2_size: 48.0,
            h3_size: 32.0,
            body_size: 22.0,
            small_size: 16.0,
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light".to_string(),
            background: Color32::from_rgb(0xEE, 0xF2, 0xFF),
            surface: Color32::WHITE,
            foreground: Color32::from_rgb(0x1E, 0x29, 0x3B),
            muted: Color32::from_rgb(0x64, 0x74, 0x8B),
            heading_color: Color32::from_rgb(0x11, 0x18, 0x27),
            accent: Color32::from_rgb(0x4F, 0x46, 0xE5),
            grid_line: Color32::from_rgb(0xD1, 0xD5, 0xDB),
            table_header: Color32::from_rgb(0x1F, 0x29, 0x37),
            table_stripe: Color32::from_rgb(0xF8, 0xFA, 0xFC),
            title_size: 72.0,
            h2_size: 48.0,
            h3_size: 32.0,
            body_size: 22.0,
            small_size: 16.0,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name {
            "dark" => Self::dark(),
            _ => Self::light(),
        }
    }

    pub fn is_dark(&self) -> bool {
        self.name == "dark"
    }

    pub fn toggled(&self) -> Self {
        if self.is_dark() {
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

/// Linear mix of two opaque colors; `t = 0` gives `a`, `t = 1` gives `b`.
pub fn blend(a: Color32, b: Color32, t: f32) -> Color32 {
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgb(mix(a.r(), b.r()), mix(a.g(), b.g()), mix(a.b(), b.b()))
}

/// Color for the `index`-th category in a chart.
pub fn palette_color(palette: &[Color32], index: usize) -> Color32 {
    palette[index % palette.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trip() {
        let light = Theme::light();
        assert!(light.toggled().is_dark());
        assert!(!light.toggled().toggled().is_dark());
    }

    #[test]
    fn test_unknown_name_falls_back_to_light() {
        assert_eq!(Theme::from_name("solarized").name, "light");
    }

    #[test]
    fn test_blend_endpoints() {
        let a = Color32::from_rgb(10, 20, 30);
        let b = Color32::from_rgb(210, 220, 230);
        assert_eq!(blend(a, b, 0.0), a);
        assert_eq!(blend(a, b, 1.0), b);
        assert_eq!(blend(a, b, 0.5), Color32::from_rgb(110, 120, 130));
    }

    #[test]
    fn test_palette_wraps() {
        assert_eq!(palette_color(&CHART_PALETTE, 10), CHART_PALETTE[0]);
        assert_eq!(palette_color(&GENDER_PALETTE, 3), GENDER_PALETTE[1]);
    }
}
