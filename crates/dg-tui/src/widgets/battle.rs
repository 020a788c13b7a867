//! Battle panel: both fighters and the tail of the battle log

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use dg_core::combat::Battle;
use dg_core::entity::Character;

use crate::theme::Theme;

pub const BATTLE_HINT: &str = "[a] attack  [x] quick  [h] heavy  [i] items  [e] escape";

pub struct BattleWidget<'a> {
    battle: &'a Battle,
    hero: &'a Character,
    theme: &'a Theme,
}

impl<'a> BattleWidget<'a> {
    pub fn new(battle: &'a Battle, hero: &'a Character, theme: &'a Theme) -> Self {
        Self {
            battle,
            hero,
            theme,
        }
    }

    fn fighter_line(&self, fighter: &Character, color: Color) -> Line<'static> {
        Line::from(vec![
            Span::styled(
                fighter.name.clone(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!(
                "  HP {}/{}  {}",
                fighter.health.max(0),
                fighter.health_max,
                fighter.weapon.name
            )),
        ])
    }
}

impl Widget for BattleWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let title = match self.battle.opponent().tier() {
            Some(tier) => format!(" Battle - {tier} tier "),
            None => " Battle ".to_string(),
        };
        let block = Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border_action));

        let mut lines = vec![
            self.fighter_line(self.battle.opponent(), self.theme.bad),
            self.fighter_line(self.hero, self.theme.good),
            Line::from(""),
        ];
        lines.extend(
            self.battle
                .recent_log()
                .iter()
                .map(|entry| Line::styled(entry.clone(), Style::default().fg(self.theme.text))),
        );
        lines.push(Line::from(""));
        lines.push(Line::styled(BATTLE_HINT, Style::default().fg(self.theme.text_dim)));

        Paragraph::new(lines)
            .block(block)
            .wrap(Wrap { trim: true })
            .render(area, buf);
    }
}
