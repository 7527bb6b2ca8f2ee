use invoice_types::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontWeight {
    #[default]
    Regular,
    Bold,
}

/// Paint parameters for a text run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub font_size: f32,
    pub font_weight: FontWeight,
    pub color: Color,
}

impl TextStyle {
    /// Business name in the page header.
    pub const HEADER: TextStyle = TextStyle {
        font_size: 20.0,
        font_weight: FontWeight::Bold,
        color: Color::ACCENT_GOLD,
    };

    pub const BODY: TextStyle = TextStyle {
        font_size: 12.0,
        font_weight: FontWeight::Regular,
        color: Color::BLACK,
    };

    pub const BODY_BOLD: TextStyle = TextStyle {
        font_size: 12.0,
        font_weight: FontWeight::Bold,
        color: Color::BLACK,
    };
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::BODY
    }
}

/// Outline parameters for lines and stroked rectangles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub width: f32,
    pub color: Color,
}

impl Stroke {
    pub const HAIRLINE: Stroke = Stroke {
        width: 1.0,
        color: Color::BLACK,
    };

    pub const BORDER: Stroke = Stroke {
        width: 3.0,
        color: Color::ACCENT_GOLD,
    };
}

impl Default for Stroke {
    fn default() -> Self {
        Self::HAIRLINE
    }
}
