//! Terminal color tags for tiles

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

/// The sixteen ANSI foreground colors
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TileColor {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    #[default]
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// ANSI reset sequence
pub const ANSI_RESET: &str = "\x1b[0m";

impl TileColor {
    /// ANSI escape sequence selecting this foreground color
    pub const fn ansi(&self) -> &'static str {
        match self {
            TileColor::Black => "\x1b[30m",
            TileColor::Red => "\x1b[31m",
            TileColor::Green => "\x1b[32m",
            TileColor::Yellow => "\x1b[33m",
            TileColor::Blue => "\x1b[34m",
            TileColor::Magenta => "\x1b[35m",
            TileColor::Cyan => "\x1b[36m",
            TileColor::White => "\x1b[37m",
            TileColor::BrightBlack => "\x1b[90m",
            TileColor::BrightRed => "\x1b[91m",
            TileColor::BrightGreen => "\x1b[92m",
            TileColor::BrightYellow => "\x1b[93m",
            TileColor::BrightBlue => "\x1b[94m",
            TileColor::BrightMagenta => "\x1b[95m",
            TileColor::BrightCyan => "\x1b[96m",
            TileColor::BrightWhite => "\x1b[97m",
        }
    }

    pub const fn is_bright(&self) -> bool {
        matches!(
            self,
            TileColor::BrightBlack
                | TileColor::BrightRed
                | TileColor::BrightGreen
                | TileColor::BrightYellow
                | TileColor::BrightBlue
                | TileColor::BrightMagenta
                | TileColor::BrightCyan
                | TileColor::BrightWhite
        )
    }
}
