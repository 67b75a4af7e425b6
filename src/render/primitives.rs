use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// RGBA color in normalized 0..=1 channel values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
    pub alpha: f64,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    pub const GRAY: Self = Self::rgb(0.63, 0.63, 0.64);
    pub const LIGHT_GRAY: Self = Self::rgb(0.85, 0.85, 0.85);

    #[must_use]
    pub const fn rgba(red: f64, green: f64, blue: f64, alpha: f64) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    #[must_use]
    pub const fn rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::rgba(red, green, blue, 1.0)
    }

    /// Color from 8-bit channels.
    #[must_use]
    pub fn rgb8(red: u8, green: u8, blue: u8) -> Self {
        Self::rgb(
            f64::from(red) / 255.0,
            f64::from(green) / 255.0,
            f64::from(blue) / 255.0,
        )
    }

    /// Default series color for the series at `index`, cycling a fixed palette.
    #[must_use]
    pub fn palette(index: usize) -> Self {
        const PALETTE: [(u8, u8, u8); 8] = [
            (0x51, 0x6c, 0xa3),
            (0xd9, 0x6c, 0x2e),
            (0x5a, 0xa1, 0x4f),
            (0xc2, 0x3b, 0x3b),
            (0x84, 0x5b, 0xb3),
            (0x8c, 0x6d, 0x46),
            (0xd8, 0x73, 0xb6),
            (0x6e, 0x6e, 0x6e),
        ];
        let (r, g, b) = PALETTE[index % PALETTE.len()];
        Self::rgb8(r, g, b)
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self { alpha, ..self }
    }

    pub fn validate(self) -> ChartResult<()> {
        for (channel, value) in [
            ("red", self.red),
            ("green", self.green),
            ("blue", self.blue),
            ("alpha", self.alpha),
        ] {
            if !value.is_finite() || !(0.0..=1.0).contains(&value) {
                return Err(ChartError::InvalidData(format!(
                    "color channel `{channel}` must be finite and in [0, 1]"
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PenStyle {
    None,
    #[default]
    Solid,
    Dash,
    Dot,
}

/// Stroke settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub color: Color,
    pub width: f64,
    #[serde(default)]
    pub style: PenStyle,
}

impl Default for Pen {
    fn default() -> Self {
        Self::solid(Color::BLACK, 1.0)
    }
}

impl Pen {
    #[must_use]
    pub const fn solid(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            style: PenStyle::Solid,
        }
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            color: Color::BLACK,
            width: 0.0,
            style: PenStyle::None,
        }
    }

    #[must_use]
    pub fn with_style(self, style: PenStyle) -> Self {
        Self { style, ..self }
    }

    #[must_use]
    pub fn is_visible(self) -> bool {
        self.style != PenStyle::None && self.width > 0.0 && self.color.alpha > 0.0
    }

    /// Dash pattern in pixels, empty for solid strokes.
    #[must_use]
    pub fn dash_pattern(self) -> &'static [f64] {
        match self.style {
            PenStyle::Dash => &[6.0, 3.0],
            PenStyle::Dot => &[1.0, 2.0],
            PenStyle::None | PenStyle::Solid => &[],
        }
    }

    pub fn validate(self) -> ChartResult<()> {
        if !self.width.is_finite() || self.width < 0.0 {
            return Err(ChartError::InvalidData(
                "pen width must be finite and >= 0".to_owned(),
            ));
        }
        self.color.validate()
    }
}

/// Fill settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Brush {
    #[default]
    None,
    Solid(Color),
}

impl Brush {
    #[must_use]
    pub fn is_visible(self) -> bool {
        matches!(self, Self::Solid(color) if color.alpha > 0.0)
    }

    #[must_use]
    pub fn color(self) -> Option<Color> {
        match self {
            Self::None => None,
            Self::Solid(color) => Some(color),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    pub size_px: f64,
    #[serde(default)]
    pub bold: bool,
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Sans", 10.0)
    }
}

impl Font {
    #[must_use]
    pub fn new(family: impl Into<String>, size_px: f64) -> Self {
        Self {
            family: family.into(),
            size_px,
            bold: false,
        }
    }

    #[must_use]
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn validate(&self) -> ChartResult<()> {
        if !self.size_px.is_finite() || self.size_px <= 0.0 {
            return Err(ChartError::InvalidData(
                "font size must be finite and > 0".to_owned(),
            ));
        }
        Ok(())
    }
}
