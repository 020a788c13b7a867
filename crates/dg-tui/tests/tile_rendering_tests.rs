use dg_core::{Session, SessionConfig};
use dg_tui::Theme;
use dg_tui::widgets::MapWidget;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;

fn rendered(session: &Session, theme: &Theme) -> Buffer {
    let map = session.map();
    let area = Rect::new(0, 0, map.width() as u16 + 2, map.height() as u16 + 2);
    let mut buf = Buffer::empty(area);
    MapWidget::new(map, theme).render(area, &mut buf);
    buf
}

#[test]
fn test_map_widget_matches_plain_render() {
    let session = Session::new(SessionConfig::default(), 42).unwrap();
    let buf = rendered(&session, &Theme::dark());

    for (y, line) in session.map().render_plain().lines().enumerate() {
        for (x, glyph) in line.chars().enumerate() {
            let cell = &buf[(x as u16 + 1, y as u16 + 1)];
            assert_eq!(cell.symbol(), glyph.to_string(), "mismatch at ({y}, {x})");
        }
    }
}

#[test]
fn test_player_and_frame_glyphs() {
    let session = Session::new(SessionConfig::default(), 7).unwrap();
    let theme = Theme::dark();
    let buf = rendered(&session, &theme);

    assert_eq!(buf[(1, 1)].symbol(), "=");
    assert_eq!(buf[(1, 2)].symbol(), "|");
    assert_eq!(buf[(2, 2)].symbol(), "P");
}

#[test]
fn test_wall_color_follows_theme() {
    let session = Session::new(SessionConfig::default(), 7).unwrap();
    let theme = Theme::light();
    let buf = rendered(&session, &theme);
    let wall = session.map().rows().next().unwrap()[0].color();
    assert_eq!(buf[(1, 1)].fg, theme.tile_color(wall));
}
