//! Static game data: terrain catalog and colors

pub mod colors;
pub mod tile;

pub use colors::{ANSI_RESET, TileColor};
pub use tile::{Tile, TileKind, TileRegistry, VISITED_VILLAGE_SYMBOL, tile_name_for_symbol};
