//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use dg_core::Session;

use crate::theme::Theme;

/// Two status lines: the hero, then where they are
pub struct StatusWidget<'a> {
    session: &'a Session,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(session: &'a Session, theme: &'a Theme) -> Self {
        Self { session, theme }
    }

    pub fn lines(&self) -> (String, String) {
        let hero = self.session.hero();
        let (level, experience, threshold) = hero
            .hero_state()
            .map_or((0, 0, 0), |s| (s.level, s.experience, s.experience_to_next_level));

        let line1 = format!(
            "{} HP:{}/{} Weapon:{} Dmg:{} $:{} Lv:{} Xp:{}/{}",
            hero.name,
            hero.health.max(0),
            hero.health_max,
            hero.weapon.name,
            hero.weapon.damage,
            hero.cashpile(),
            level,
            experience,
            threshold,
        );
        let line2 = format!(
            "Seed:{} Tile:{} {} Bosses:{}/{} NG+{}",
            self.session.seed(),
            self.session.current_tile_name(),
            self.session.player_pos(),
            self.session.bosses_defeated(),
            self.session.config().total_bosses,
            self.session.cycle(),
        );
        (line1, line2)
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (line1, line2) = self.lines();
        let style = Style::default().fg(self.theme.text);
        buf.set_string(area.x, area.y, &line1, style);
        if area.height > 1 {
            buf.set_string(area.x, area.y + 1, &line2, style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dg_core::SessionConfig;

    #[test]
    fn test_status_lines() {
        let session = Session::new(SessionConfig::default(), 42).unwrap();
        let theme = Theme::dark();
        let (line1, line2) = StatusWidget::new(&session, &theme).lines();
        assert_eq!(line1, "Hero HP:150/150 Weapon:Fists Dmg:2 $:0 Lv:1 Xp:0/100");
        assert!(line2.starts_with("Seed:42 Tile:"));
        assert!(line2.contains("(1, 1)"));
        assert!(line2.ends_with("Bosses:0/10 NG+1"));
    }
}
