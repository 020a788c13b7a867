//! Application state and main UI controller

use crossterm::event::{Event, KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use dg_core::combat::{BattleAction, LootChoice};
use dg_core::map::Direction as GameDirection;
use dg_core::{BattleResolution, Encounter, GameRng, MoveOutcome, SeedChoice, Session};

use crate::input::{BattleCommand, Command, key_to_battle_command, key_to_command};
use crate::theme::Theme;
use crate::widgets::{
    BattleWidget, MapWidget, MenuWidget, StatusWidget, format_item, format_weapon, letter_index,
};

/// Message lines kept below the status line
const MESSAGE_LINES: usize = 3;

/// UI mode - what the app is currently displaying/waiting for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Walking the map
    Map,
    /// Showing the inventory; cures can be used from here
    Inventory,
    /// Player's battle turn
    Battle,
    /// Choosing an item to use in battle
    BattleItems,
    /// Village menu: shop and inn
    Village,
    /// Deciding what to do with a defeated enemy's weapon
    Loot,
    /// Hero defeated
    GameOver { retry_allowed: bool },
    /// Every boss defeated
    Victory,
}

/// Application state
pub struct App {
    session: Session,

    /// Current UI mode
    mode: UiMode,

    /// Selection cursor for menus
    cursor: usize,

    /// Recent messages, oldest first
    messages: Vec<String>,

    should_quit: bool,

    /// Color theme (adapts to light/dark terminal background)
    theme: Theme,

    /// Source of fresh seeds when the player abandons one
    seed_rng: GameRng,
}

impl App {
    pub fn new(session: Session, theme: Theme) -> Self {
        let mut app = Self {
            session,
            mode: UiMode::Map,
            cursor: 0,
            messages: Vec::new(),
            should_quit: false,
            theme,
            seed_rng: GameRng::from_entropy(),
        };
        app.drain_session_messages();
        app
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn mode(&self) -> UiMode {
        self.mode
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn message(&mut self, msg: impl Into<String>) {
        self.messages.push(msg.into());
        let excess = self.messages.len().saturating_sub(MESSAGE_LINES);
        self.messages.drain(..excess);
    }

    fn drain_session_messages(&mut self) {
        for msg in self.session.take_messages() {
            self.message(msg);
        }
    }

    fn enter(&mut self, mode: UiMode) {
        self.mode = mode;
        self.cursor = 0;
    }

    /// Handle one terminal event
    pub fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        match self.mode {
            UiMode::Map => self.handle_map_input(key),
            UiMode::Inventory => self.handle_inventory_input(key),
            UiMode::Battle => self.handle_battle_input(key),
            UiMode::BattleItems => self.handle_battle_items_input(key),
            UiMode::Village => self.handle_village_input(key),
            UiMode::Loot => self.handle_loot_input(key),
            UiMode::GameOver { retry_allowed } => self.handle_game_over_input(key, retry_allowed),
            UiMode::Victory => {
                if matches!(key.code, KeyCode::Char('q') | KeyCode::Enter | KeyCode::Esc) {
                    self.should_quit = true;
                }
            }
        }
        self.drain_session_messages();
    }

    fn handle_map_input(&mut self, key: KeyEvent) {
        match key_to_command(key) {
            Some(Command::Move(direction)) => self.step(direction),
            Some(Command::Inventory) => self.enter(UiMode::Inventory),
            Some(Command::Village) if self.session.in_village() => self.enter(UiMode::Village),
            Some(Command::Quit) => self.should_quit = true,
            _ => {}
        }
    }

    fn step(&mut self, direction: GameDirection) {
        match self.session.step(direction) {
            Ok(MoveOutcome::Encounter(encounter)) => match encounter {
                Encounter::Enemy { name } => {
                    self.message(format!("You encountered {name}!"));
                    self.enter(UiMode::Battle);
                }
                Encounter::Boss { name } => {
                    self.message(format!("A mighty boss appears: {name}!"));
                    self.enter(UiMode::Battle);
                }
                Encounter::Village => self.enter(UiMode::Village),
                Encounter::Treasure { .. } => {}
            },
            Ok(MoveOutcome::Moved | MoveOutcome::Blocked) => {}
            Err(err) => self.message(err.to_string()),
        }
    }

    /// Move the menu cursor; returns the index chosen, if any
    fn menu_choice(&mut self, key: KeyEvent, len: usize) -> Option<usize> {
        match key.code {
            KeyCode::Up => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if self.cursor + 1 < len {
                    self.cursor += 1;
                }
                None
            }
            KeyCode::Enter if len > 0 => Some(self.cursor),
            KeyCode::Char(c) => letter_index(c).filter(|i| *i < len),
            _ => None,
        }
    }

    fn handle_inventory_input(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.enter(UiMode::Map);
            return;
        }
        let len = self.session.hero().items().len();
        if let Some(index) = self.menu_choice(key, len) {
            match self.session.use_item(index) {
                Ok(used) => {
                    let msg = used.message(&self.session.hero().name);
                    self.message(msg);
                    self.cursor = self.cursor.min(len.saturating_sub(2));
                }
                Err(err) => self.message(err.to_string()),
            }
        }
    }

    fn handle_battle_input(&mut self, key: KeyEvent) {
        match key_to_battle_command(key) {
            Some(BattleCommand::Attack(attack_type)) => {
                self.battle(BattleAction::Attack(attack_type))
            }
            Some(BattleCommand::Items) => self.enter(UiMode::BattleItems),
            Some(BattleCommand::Escape) => self.battle(BattleAction::Escape),
            None => {}
        }
    }

    fn handle_battle_items_input(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Esc) {
            self.mode = UiMode::Battle;
            return;
        }
        let len = self.session.hero().items().len();
        if let Some(index) = self.menu_choice(key, len) {
            self.mode = UiMode::Battle;
            self.battle(BattleAction::UseItem(index));
        }
    }

    fn battle(&mut self, action: BattleAction) {
        let turn = match self.session.battle_action(action) {
            Ok(turn) => turn,
            Err(err) => {
                self.message(err.to_string());
                return;
            }
        };

        if turn.resolution == BattleResolution::Ongoing {
            return;
        }
        for msg in turn.messages {
            self.message(msg);
        }

        match turn.resolution {
            BattleResolution::Ongoing => {}
            BattleResolution::Escaped => self.enter(UiMode::Map),
            BattleResolution::Victory(rewards) => {
                self.message(format!("You gained {} experience.", rewards.experience));
                for level_up in &rewards.level_ups {
                    self.message(format!(
                        "Level up! You are now level {} ({} max HP).",
                        level_up.level, level_up.health_max
                    ));
                }
                if let Some(item) = &rewards.item {
                    self.message(format!("You found {}!", item.name));
                }
                if self.session.pending_loot().is_some() {
                    self.enter(UiMode::Loot);
                } else {
                    self.enter(UiMode::Map);
                }
            }
            BattleResolution::BossDefeated { rewards, next_seed } => {
                for item in &rewards.boss_drops {
                    self.message(format!("You received {}!", item.name));
                }
                match next_seed {
                    Some(_) => self.enter(UiMode::Map),
                    None => self.enter(UiMode::Victory),
                }
            }
            BattleResolution::Defeat { retry_allowed } => {
                self.enter(UiMode::GameOver { retry_allowed });
            }
        }
    }

    fn handle_village_input(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.enter(UiMode::Map);
                return;
            }
            KeyCode::Char('r') => {
                match self.session.rest() {
                    Ok(()) => self.message("You rest at the inn and feel refreshed."),
                    Err(err) => self.message(err.to_string()),
                }
                return;
            }
            _ => {}
        }

        let Some(shop) = self.session.shop() else {
            self.enter(UiMode::Map);
            return;
        };
        let weapons = shop.weapons().len();
        let len = weapons + shop.items().len();
        let Some(index) = self.menu_choice(key, len) else {
            return;
        };

        let result = if index < weapons {
            self.session
                .buy_weapon(index)
                .map(|weapon| format!("You bought and equipped {}.", weapon.name))
        } else {
            self.session
                .buy_item(index - weapons)
                .map(|item| format!("You bought {}.", item.name))
        };
        match result {
            Ok(msg) => self.message(msg),
            Err(err) => self.message(err.to_string()),
        }
    }

    fn handle_loot_input(&mut self, key: KeyEvent) {
        let choice = match key.code {
            KeyCode::Char('p') => LootChoice::PickUp,
            KeyCode::Char('s') => LootChoice::Scrap,
            _ => return,
        };
        let name = self
            .session
            .pending_loot()
            .map(|weapon| weapon.name.clone())
            .unwrap_or_default();
        match self.session.resolve_loot(choice) {
            Ok(gold) => {
                let msg = match choice {
                    LootChoice::PickUp => {
                        format!("You equipped {name} (old weapon scrapped for {gold} gold).")
                    }
                    LootChoice::Scrap => format!("You scrapped {name} for {gold} gold."),
                };
                self.message(msg);
            }
            Err(err) => self.message(err.to_string()),
        }
        self.enter(UiMode::Map);
    }

    fn handle_game_over_input(&mut self, key: KeyEvent, retry_allowed: bool) {
        let choice = match key.code {
            KeyCode::Char('r') if retry_allowed => SeedChoice::Same,
            KeyCode::Char('n') => SeedChoice::New(self.seed_rng.next_seed()),
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                return;
            }
            _ => return,
        };
        match self.session.restart(choice) {
            Ok(()) => self.enter(UiMode::Map),
            Err(err) => self.message(err.to_string()),
        }
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        // Layout: map at top, status in middle, messages at bottom
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(self.session.map().height() as u16 + 2),
                Constraint::Length(2),
                Constraint::Length(MESSAGE_LINES as u16),
            ])
            .split(frame.area());

        frame.render_widget(MapWidget::new(self.session.map(), &self.theme), chunks[0]);
        frame.render_widget(StatusWidget::new(&self.session, &self.theme), chunks[1]);
        let messages: Vec<Line> = self.messages.iter().map(|m| Line::from(m.as_str())).collect();
        frame.render_widget(
            Paragraph::new(messages).style(Style::default().fg(self.theme.text)),
            chunks[2],
        );

        match self.mode {
            UiMode::Map => {}
            UiMode::Inventory => self.render_inventory(frame),
            UiMode::Battle => self.render_battle(frame),
            UiMode::BattleItems => {
                self.render_battle(frame);
                self.render_inventory(frame);
            }
            UiMode::Village => self.render_village(frame),
            UiMode::Loot => self.render_loot(frame),
            UiMode::GameOver { retry_allowed } => self.render_game_over(frame, retry_allowed),
            UiMode::Victory => self.render_victory(frame),
        }
    }

    fn render_inventory(&self, frame: &mut Frame) {
        let area = centered_rect(60, 60, frame.area());
        let entries: Vec<String> = self.session.hero().items().iter().map(format_item).collect();
        let (footer, border) = if self.mode == UiMode::BattleItems {
            ("[enter] use  [esc] back", self.theme.border_action)
        } else {
            ("[enter] use cure  [esc] close", self.theme.border_accent)
        };
        let menu = MenuWidget::new("Inventory", &entries, &self.theme)
            .cursor(self.cursor)
            .empty_text("Not carrying anything.")
            .footer(footer)
            .border(border);
        frame.render_widget(menu, area);
    }

    fn render_battle(&self, frame: &mut Frame) {
        let Some(battle) = self.session.battle() else {
            return;
        };
        let area = centered_rect(70, 60, frame.area());
        frame.render_widget(BattleWidget::new(battle, self.session.hero(), &self.theme), area);
    }

    fn render_village(&self, frame: &mut Frame) {
        let Some(shop) = self.session.shop() else {
            return;
        };
        let area = centered_rect(70, 80, frame.area());
        let entries: Vec<String> = shop
            .weapons()
            .iter()
            .map(format_weapon)
            .chain(shop.items().iter().map(format_item))
            .collect();
        let title = format!(" Village - {} gold ", self.session.hero().cashpile());
        let menu = MenuWidget::new(&title, &entries, &self.theme)
            .cursor(self.cursor)
            .footer("[enter] buy  [r] rest  [esc] leave");
        frame.render_widget(menu, area);
    }

    fn render_loot(&self, frame: &mut Frame) {
        let Some(weapon) = self.session.pending_loot() else {
            return;
        };
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let current = &self.session.hero().weapon;
        let lines = vec![
            Line::from(vec![
                Span::raw("Found: "),
                Span::styled(
                    format_weapon(weapon),
                    Style::default().fg(self.theme.header).add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(format!("Wielding: {}", format_weapon(current))),
            Line::from(""),
            Line::styled(
                "[p] pick up  [s] scrap",
                Style::default().fg(self.theme.text_dim),
            ),
        ];
        let block = Block::default()
            .title(" Loot ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_action));
        frame.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_game_over(&self, frame: &mut Frame, retry_allowed: bool) {
        let area = centered_rect(50, 40, frame.area());
        frame.render_widget(Clear, area);

        let seed = self.session.seed();
        let deaths = self.session.deaths_on(seed);
        let mut lines = vec![
            Line::styled(
                "  Game Over  ",
                Style::default().fg(self.theme.bad).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::from(format!("You have died {deaths} times on seed {seed}.")),
        ];
        let hint = if retry_allowed {
            "[r] retry seed  [n] new seed  [q] quit"
        } else {
            lines.push(Line::from(
                "Retry limit exceeded for this seed. You must select a new seed.",
            ));
            "[n] new seed  [q] quit"
        };
        lines.push(Line::from(""));
        lines.push(Line::styled(hint, Style::default().fg(self.theme.text_dim)));

        let block = Block::default()
            .title(" Game Over ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_danger));
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(ratatui::layout::Alignment::Center),
            area,
        );
    }

    fn render_victory(&self, frame: &mut Frame) {
        let area = centered_rect(50, 30, frame.area());
        frame.render_widget(Clear, area);
        let lines = vec![
            Line::styled(
                "Congratulations! You have defeated all the bosses!",
                Style::default().fg(self.theme.good).add_modifier(Modifier::BOLD),
            ),
            Line::from(""),
            Line::styled("[q] quit", Style::default().fg(self.theme.text_dim)),
        ];
        let block = Block::default()
            .title(" Victory ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_accent));
        frame.render_widget(
            Paragraph::new(lines)
                .block(block)
                .alignment(ratatui::layout::Alignment::Center),
            area,
        );
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
