//! Terminal theme detection and color definitions
//!
//! Bucket colors carry the exact light/dark pairs of the original seven-step
//! scale, as truecolor values. Chrome colors (text, muted, border) follow
//! the same slate palette.

use ratatui::style::Color;

use crate::types::ChangeBucket;

/// Terminal color scheme (dark or light background)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Auto-detect terminal theme from background luminance.
    /// Must be called **before** entering raw mode (ratatui::init).
    /// Falls back to Dark if detection fails.
    pub fn detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.6 => Self::Light,
            _ => Self::Dark,
        }
    }

    /// Flip between dark and light
    pub fn toggle(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Primary text color
    pub fn text(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(0xf8, 0xfa, 0xfc),
            Self::Light => Color::Rgb(0x1e, 0x29, 0x3b),
        }
    }

    /// Secondary/muted text (labels, hints, month names)
    pub fn muted(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(0x94, 0xa3, 0xb8),
            Self::Light => Color::Rgb(0x64, 0x74, 0x8b),
        }
    }

    /// Border color for popups
    pub fn border(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(0x33, 0x41, 0x55),
            Self::Light => Color::Rgb(0xe2, 0xe8, 0xf0),
        }
    }

    /// Accent color (selected year, keybinding keys)
    pub fn accent(self) -> Color {
        match self {
            Self::Dark => Color::Cyan,
            Self::Light => Color::Indexed(25), // dark blue (ANSI 256)
        }
    }

    /// Positive-change text color (tooltip percentage)
    pub fn gain_text(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(0x4a, 0xde, 0x80),
            Self::Light => Color::Rgb(0x16, 0x65, 0x34),
        }
    }

    /// Negative-change text color (tooltip percentage)
    pub fn loss_text(self) -> Color {
        match self {
            Self::Dark => Color::Rgb(0xf8, 0x71, 0x71),
            Self::Light => Color::Rgb(0x99, 0x1b, 0x1b),
        }
    }

    /// Cell color for a return bucket.
    /// Each bucket stores a (light, dark) pair; NoData has its own muted
    /// pair, distinct from the neutral step of the scale.
    pub fn bucket_color(self, bucket: ChangeBucket) -> Color {
        let (light, dark) = match bucket {
            ChangeBucket::StrongLoss => ((0x99, 0x1b, 0x1b), (0xef, 0x44, 0x44)),
            ChangeBucket::Loss => ((0xef, 0x44, 0x44), (0xf8, 0x71, 0x71)),
            ChangeBucket::SoftLoss => ((0xfc, 0xa5, 0xa5), (0xfc, 0xa5, 0xa5)),
            ChangeBucket::Flat => ((0xe5, 0xe7, 0xeb), (0x37, 0x41, 0x51)),
            ChangeBucket::SoftGain => ((0x86, 0xef, 0xac), (0x86, 0xef, 0xac)),
            ChangeBucket::Gain => ((0x22, 0xc5, 0x5e), (0x4a, 0xde, 0x80)),
            ChangeBucket::StrongGain => ((0x16, 0x65, 0x34), (0x22, 0xc5, 0x5e)),
            ChangeBucket::NoData => ((0xf3, 0xf4, 0xf6), (0x1f, 0x29, 0x37)),
        };
        let (r, g, b) = match self {
            Self::Dark => dark,
            Self::Light => light,
        };
        Color::Rgb(r, g, b)
    }

    /// Display label for the header
    pub fn label(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }
}
