//! Map display widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use dg_core::map::Map;

use crate::theme::Theme;

/// Widget for rendering the overworld
pub struct MapWidget<'a> {
    map: &'a Map,
    theme: &'a Theme,
}

impl<'a> MapWidget<'a> {
    pub fn new(map: &'a Map, theme: &'a Theme) -> Self {
        Self { map, theme }
    }
}

impl Widget for MapWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title("Desgoblin");

        let inner = block.inner(area);
        block.render(area, buf);

        for (y, row) in self.map.rows().enumerate().take(inner.height as usize) {
            for (x, tile) in row.iter().enumerate().take(inner.width as usize) {
                let style = Style::default().fg(self.theme.tile_color(tile.color()));
                if let Some(cell) =
                    buf.cell_mut(Position::new(inner.x + x as u16, inner.y + y as u16))
                {
                    cell.set_char(tile.display_symbol());
                    cell.set_style(style);
                }
            }
        }
    }
}
