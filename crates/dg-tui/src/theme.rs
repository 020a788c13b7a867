//! Color palettes for dark and light terminals
//!
//! The background is guessed from `COLORFGBG`; `DG_LIGHT_BG=1` forces the
//! light palette. Tile colors are remapped so nothing vanishes into the
//! background.

use dg_core::data::TileColor;
use ratatui::style::Color;

/// Colors for every widget; nothing in the UI names a `Color` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Secondary/hint text (footers, key hints)
    pub text_dim: Color,

    /// Default border color
    pub border: Color,
    /// Informational border (inventory, village)
    pub border_accent: Color,
    /// Battle and loot border
    pub border_action: Color,
    /// Game over border
    pub border_danger: Color,

    /// Selected/cursor item foreground
    pub cursor_fg: Color,
    /// Selected/cursor item background
    pub cursor_bg: Color,

    /// Titles and highlighted names
    pub header: Color,
    /// Positive (healing, victory)
    pub good: Color,
    /// Negative (damage, defeat)
    pub bad: Color,

    is_light: bool,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            border_accent: Color::Cyan,
            border_action: Color::Yellow,
            border_danger: Color::Red,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            header: Color::Yellow,
            good: Color::Green,
            bad: Color::Red,
            is_light: false,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            border_accent: Color::Blue,
            border_action: Color::Yellow,
            border_danger: Color::Red,
            cursor_fg: Color::Yellow,
            cursor_bg: Color::DarkGray,
            header: Color::Yellow,
            good: Color::Green,
            bad: Color::Red,
            is_light: true,
        }
    }

    /// Auto-detect terminal background and return appropriate theme.
    pub fn detect() -> Self {
        if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        }
    }

    /// Terminal color for a tile color. Adjusts colors that would vanish
    /// into the background (black-on-black, white-on-white).
    pub fn tile_color(&self, color: TileColor) -> Color {
        if self.is_light {
            match color {
                TileColor::Black => Color::DarkGray,
                TileColor::White | TileColor::BrightWhite => Color::Black,
                TileColor::Cyan | TileColor::BrightCyan => Color::Blue,
                TileColor::BrightRed => Color::Red,
                TileColor::BrightGreen => Color::Green,
                TileColor::BrightBlue => Color::Blue,
                TileColor::BrightYellow | TileColor::Yellow => Color::Yellow,
                TileColor::BrightMagenta | TileColor::Magenta => Color::Magenta,
                TileColor::BrightBlack => Color::DarkGray,
                TileColor::Red => Color::Red,
                TileColor::Green => Color::Green,
                TileColor::Blue => Color::Blue,
            }
        } else {
            match color {
                // the default fill is drawn in black; lift it off the background
                TileColor::Black => Color::DarkGray,
                TileColor::Red => Color::Red,
                TileColor::Green => Color::Green,
                TileColor::Yellow => Color::Yellow,
                TileColor::Blue => Color::Blue,
                TileColor::Magenta => Color::Magenta,
                TileColor::Cyan => Color::Cyan,
                TileColor::White => Color::Gray,
                TileColor::BrightBlack => Color::DarkGray,
                TileColor::BrightRed => Color::LightRed,
                TileColor::BrightGreen => Color::LightGreen,
                TileColor::BrightYellow => Color::LightYellow,
                TileColor::BrightBlue => Color::LightBlue,
                TileColor::BrightMagenta => Color::LightMagenta,
                TileColor::BrightCyan => Color::LightCyan,
                TileColor::BrightWhite => Color::White,
            }
        }
    }

    fn is_light_background() -> bool {
        // Explicit override via environment variable
        if let Ok(val) = std::env::var("DG_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with color indices (0-15)
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
