//! Input handling - convert key events to commands

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use dg_core::combat::AttackType;
use dg_core::map::Direction;

/// Commands available while walking the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move(Direction),
    Inventory,
    /// Reopen the village menu while standing in one
    Village,
    Quit,
}

/// Commands available on the player's battle turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BattleCommand {
    Attack(AttackType),
    Items,
    Escape,
}

/// Map-mode bindings: WASD or arrows to move
pub fn key_to_command(key: KeyEvent) -> Option<Command> {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('w') | KeyCode::Char('W') | KeyCode::Up => {
            Some(Command::Move(Direction::North))
        }
        KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Down => {
            Some(Command::Move(Direction::South))
        }
        KeyCode::Char('a') | KeyCode::Char('A') | KeyCode::Left => {
            Some(Command::Move(Direction::West))
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Right => {
            Some(Command::Move(Direction::East))
        }
        KeyCode::Char('i') => Some(Command::Inventory),
        KeyCode::Char('v') => Some(Command::Village),
        KeyCode::Char('q') => Some(Command::Quit),
        _ => None,
    }
}

/// Battle bindings
pub fn key_to_battle_command(key: KeyEvent) -> Option<BattleCommand> {
    match key.code {
        KeyCode::Char('a') => Some(BattleCommand::Attack(AttackType::Normal)),
        KeyCode::Char('x') => Some(BattleCommand::Attack(AttackType::Quick)),
        KeyCode::Char('h') => Some(BattleCommand::Attack(AttackType::Heavy)),
        KeyCode::Char('i') => Some(BattleCommand::Items),
        KeyCode::Char('e') => Some(BattleCommand::Escape),
        _ => None,
    }
}
