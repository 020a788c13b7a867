//! Terrain catalog
//!
//! Every terrain kind has one canonical [`Tile`] held by the
//! [`TileRegistry`]. The map grid stores `Rc<Tile>` handles, so many cells
//! share the same instance. Villages are the exception: each village is
//! stamped as its own instance because its `visited` flag changes.

use std::cell::Cell;
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use super::TileColor;

/// Terrain and marker kinds
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum TileKind {
    Plains = 0,
    Forest,
    Brush,
    Mountain,
    Water,
    Lake,
    Desert,
    Swamp,
    Snow,
    Hill,
    River,
    Beach,
    Cave,
    Ruins,
    Shrine,
    /// Fill terrain of a fresh map, shown as plains
    Default,
    Player,
    Enemy,
    Village,
    Treasure,
    HorizontalWall,
    VerticalWall,
}

impl TileKind {
    /// Display glyph
    pub const fn symbol(&self) -> char {
        match self {
            TileKind::Plains => ';',
            TileKind::Forest => '8',
            TileKind::Brush => '^',
            TileKind::Mountain => 'A',
            TileKind::Water => '~',
            TileKind::Lake => '§',
            TileKind::Desert => '.',
            TileKind::Swamp => '&',
            TileKind::Snow => '*',
            TileKind::Hill => 'm',
            TileKind::River => '≈',
            TileKind::Beach => '_',
            TileKind::Cave => 'C',
            TileKind::Ruins => 'R',
            TileKind::Shrine => 'S',
            TileKind::Default => '#',
            TileKind::Player => 'P',
            TileKind::Enemy => 'E',
            TileKind::Village => 'V',
            TileKind::Treasure => 'T',
            TileKind::HorizontalWall => '=',
            TileKind::VerticalWall => '|',
        }
    }

    pub const fn color(&self) -> TileColor {
        match self {
            TileKind::Plains | TileKind::Beach | TileKind::Treasure => TileColor::Yellow,
            TileKind::Forest | TileKind::Player | TileKind::Village => TileColor::Green,
            TileKind::Brush => TileColor::Magenta,
            TileKind::Mountain | TileKind::HorizontalWall | TileKind::VerticalWall => {
                TileColor::White
            }
            TileKind::Water => TileColor::Blue,
            TileKind::Lake => TileColor::Cyan,
            TileKind::Desert => TileColor::BrightYellow,
            TileKind::Swamp => TileColor::BrightGreen,
            TileKind::Snow => TileColor::BrightWhite,
            TileKind::Hill | TileKind::Shrine => TileColor::BrightMagenta,
            TileKind::River => TileColor::BrightBlue,
            TileKind::Cave => TileColor::BrightBlack,
            TileKind::Ruins | TileKind::Enemy => TileColor::Red,
            TileKind::Default => TileColor::Black,
        }
    }

    /// Whether the player may step here (and enemies may be placed here)
    pub const fn is_walkable(&self) -> bool {
        !matches!(
            self,
            TileKind::Water
                | TileKind::Lake
                | TileKind::River
                | TileKind::Shrine
                | TileKind::Player
                | TileKind::Enemy
                | TileKind::Village
                | TileKind::Treasure
                | TileKind::HorizontalWall
                | TileKind::VerticalWall
        )
    }

    /// Human-readable name for the status line
    pub const fn name(&self) -> &'static str {
        match self {
            TileKind::Plains | TileKind::Default => "Plains",
            TileKind::Forest => "Forest",
            TileKind::Brush => "Brush",
            TileKind::Mountain => "Mountain",
            TileKind::Water => "Water",
            TileKind::Lake => "Lake",
            TileKind::Desert => "Desert",
            TileKind::Swamp => "Swamp",
            TileKind::Snow => "Snow",
            TileKind::Hill => "Hill",
            TileKind::River => "River",
            TileKind::Beach => "Beach",
            TileKind::Cave => "Cave",
            TileKind::Ruins => "Ruins",
            TileKind::Shrine => "Shrine",
            TileKind::Player => "Player",
            TileKind::Enemy => "Enemy",
            TileKind::Village => "Village",
            TileKind::Treasure => "Treasure",
            TileKind::HorizontalWall | TileKind::VerticalWall => "Wall",
        }
    }

    /// Player and enemy markers stand in for whatever they hide
    pub const fn is_marker(&self) -> bool {
        matches!(self, TileKind::Player | TileKind::Enemy)
    }

    pub const fn is_wall(&self) -> bool {
        matches!(self, TileKind::HorizontalWall | TileKind::VerticalWall)
    }

    /// Look a kind up by its glyph
    pub fn from_symbol(symbol: char) -> Option<TileKind> {
        TileKind::iter().find(|kind| kind.symbol() == symbol)
    }
}

/// Symbol a village takes once it has been visited
pub const VISITED_VILLAGE_SYMBOL: char = 'v';

/// Name for a symbol, "Unknown" when no terrain uses it
pub fn tile_name_for_symbol(symbol: char) -> &'static str {
    if symbol == VISITED_VILLAGE_SYMBOL {
        return "Visited Village";
    }
    TileKind::from_symbol(symbol).map_or("Unknown", |kind| kind.name())
}

/// A map tile
///
/// `walkable` is fixed at construction; only `visited` ever changes.
#[derive(Debug, Clone)]
pub struct Tile {
    kind: TileKind,
    symbol: char,
    color: TileColor,
    walkable: bool,
    visited: Cell<bool>,
}

impl Tile {
    pub const fn new(kind: TileKind, symbol: char, color: TileColor, walkable: bool) -> Self {
        Self {
            kind,
            symbol,
            color,
            walkable,
            visited: Cell::new(false),
        }
    }

    /// Canonical tile for a kind
    pub const fn of(kind: TileKind) -> Self {
        Self::new(kind, kind.symbol(), kind.color(), kind.is_walkable())
    }

    pub fn kind(&self) -> TileKind {
        self.kind
    }

    /// Raw glyph, ignoring visit state
    pub fn symbol(&self) -> char {
        self.symbol
    }

    /// Glyph to draw, reflecting visit state
    pub fn display_symbol(&self) -> char {
        if self.kind == TileKind::Village && self.visited() {
            VISITED_VILLAGE_SYMBOL
        } else {
            self.symbol
        }
    }

    pub fn color(&self) -> TileColor {
        if self.kind == TileKind::Village && self.visited() {
            TileColor::BrightBlack
        } else {
            self.color
        }
    }

    pub fn is_walkable(&self) -> bool {
        self.walkable
    }

    pub fn visited(&self) -> bool {
        self.visited.get()
    }

    pub fn mark_visited(&self) {
        self.visited.set(true);
    }

    pub fn name(&self) -> &'static str {
        tile_name_for_symbol(self.display_symbol())
    }

    /// A fresh, unshared instance of this tile with its own visit flag
    pub fn instance(&self) -> Tile {
        Tile {
            visited: Cell::new(false),
            ..self.clone()
        }
    }
}

/// Canonical instances of every terrain kind
#[derive(Debug, Clone)]
pub struct TileRegistry {
    tiles: Vec<Rc<Tile>>,
}

impl TileRegistry {
    pub fn new() -> Self {
        Self {
            tiles: TileKind::iter().map(|kind| Rc::new(Tile::of(kind))).collect(),
        }
    }

    /// Shared canonical handle for a kind
    pub fn get(&self, kind: TileKind) -> Rc<Tile> {
        Rc::clone(&self.tiles[kind as usize])
    }

    /// Handle to place on the grid: villages get their own instance,
    /// everything else shares the canonical one.
    pub fn stamp(&self, kind: TileKind) -> Rc<Tile> {
        if kind == TileKind::Village {
            Rc::new(self.tiles[kind as usize].instance())
        } else {
            self.get(kind)
        }
    }

    /// Whether `tile` is the canonical instance for `kind`
    pub fn is_canonical(&self, tile: &Rc<Tile>, kind: TileKind) -> bool {
        Rc::ptr_eq(tile, &self.tiles[kind as usize])
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<Tile>> {
        self.tiles.iter()
    }
}

impl Default for TileRegistry {
    fn default() -> Self {
        Self::new()
    }
}
