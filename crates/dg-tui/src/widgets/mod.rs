//! Ratatui widgets for the map, status line, battle panel and menus

mod battle;
mod map;
mod menu;
mod status;

pub use battle::{BATTLE_HINT, BattleWidget};
pub use map::MapWidget;
pub use menu::{MenuWidget, entry_letter, format_item, format_weapon, letter_index};
pub use status::StatusWidget;
