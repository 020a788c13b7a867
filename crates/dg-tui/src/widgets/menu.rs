//! Lettered selection menu used for the inventory, item choice in battle
//! and the village shop

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, Paragraph};

use dg_core::entity::{Item, Weapon};

use crate::theme::Theme;

/// Letter shown beside entry `index` (a-z, then '?')
pub fn entry_letter(index: usize) -> char {
    u8::try_from(index)
        .ok()
        .filter(|i| *i < 26)
        .map_or('?', |i| (b'a' + i) as char)
}

/// Index selected by a letter key
pub fn letter_index(letter: char) -> Option<usize> {
    letter
        .is_ascii_lowercase()
        .then(|| (letter as u8 - b'a') as usize)
}

pub fn format_item(item: &Item) -> String {
    format!("{} ({}g) - {}", item.name, item.value, item.description)
}

pub fn format_weapon(weapon: &Weapon) -> String {
    format!(
        "{} [{}] dmg {} ({}g)",
        weapon.display_name(),
        weapon.kind,
        weapon.damage,
        weapon.value
    )
}

pub struct MenuWidget<'a> {
    title: &'a str,
    entries: &'a [String],
    cursor: usize,
    empty_text: &'a str,
    footer: &'a str,
    border: Color,
    theme: &'a Theme,
}

impl<'a> MenuWidget<'a> {
    pub fn new(title: &'a str, entries: &'a [String], theme: &'a Theme) -> Self {
        Self {
            title,
            entries,
            cursor: 0,
            empty_text: "Nothing here.",
            footer: "",
            border: theme.border_accent,
            theme,
        }
    }

    pub fn cursor(mut self, cursor: usize) -> Self {
        self.cursor = cursor.min(self.entries.len().saturating_sub(1));
        self
    }

    pub fn empty_text(mut self, text: &'a str) -> Self {
        self.empty_text = text;
        self
    }

    pub fn footer(mut self, footer: &'a str) -> Self {
        self.footer = footer;
        self
    }

    pub fn border(mut self, color: Color) -> Self {
        self.border = color;
        self
    }
}

impl Widget for MenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);

        let block = Block::default()
            .title(self.title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.border));
        let inner = block.inner(area);
        block.render(area, buf);

        let footer_height = u16::from(!self.footer.is_empty());
        let list_area = Rect {
            height: inner.height.saturating_sub(footer_height),
            ..inner
        };

        if self.entries.is_empty() {
            Paragraph::new(self.empty_text)
                .style(Style::default().fg(self.theme.text_dim))
                .render(list_area, buf);
        } else {
            let items: Vec<ListItem> = self
                .entries
                .iter()
                .enumerate()
                .map(|(i, entry)| {
                    let style = if i == self.cursor {
                        Style::default().fg(self.theme.cursor_fg).bg(self.theme.cursor_bg)
                    } else {
                        Style::default().fg(self.theme.text)
                    };
                    ListItem::new(Line::from(format!("{} - {}", entry_letter(i), entry)))
                        .style(style)
                })
                .collect();
            Widget::render(List::new(items), list_area, buf);
        }

        if footer_height > 0 {
            buf.set_string(
                inner.x,
                inner.y + inner.height.saturating_sub(1),
                self.footer,
                Style::default().fg(self.theme.text_dim),
            );
        }
    }
}
