pub mod digits;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::{
    app::App,
    clock::Clock,
    scene::{biker_rows, ACCENT, GROUND, INK, SKY, SUN, SUN_ART},
};

const CONTROL_HEIGHT: u16 = 5;
const HORIZONTAL_MARGIN: u16 = 2;
const SOLID: char = '█';

impl<C: Clock> Widget for &App<C> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(CONTROL_HEIGHT)])
            .split(area);

        render_backdrop(self, chunks[0], buf);
        render_sun(chunks[0], buf);
        render_distance(self, chunks[0], buf);
        render_biker(self, chunks[0], buf);
        render_controls(self, chunks[1], buf);
    }
}

/// Sky plus every mountain plane, back to front
fn render_backdrop<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Style::default().bg(SKY));

    // Never wider than a tile, so two copies always cover the band
    let width = area.width.min(app.scene.max_width() as u16);
    if width == 0 || area.height == 0 {
        return;
    }
    let left = area.x + (area.width - width) / 2;
    let bottom = area.bottom() as i32;
    let t = app.scroll_time();

    for layer in app.scene.layers() {
        let columns = layer.columns(t, width as usize);
        let height = layer.tile.height() as i32;
        let base_row = bottom - 1 - layer.baseline as i32;
        let top_row = base_row - (height - 1);

        for y in top_row.max(area.y as i32)..bottom {
            let row = y - top_row;
            for (dx, col) in columns.iter().enumerate() {
                let Some(col) = *col else { continue };
                // Below the tile the range is solid rock
                let glyph = if row < height {
                    layer.tile.cell(row as usize, col)
                } else {
                    Some(SOLID)
                };
                if let Some(glyph) = glyph {
                    if let Some(cell) = buf.cell_mut((left + dx as u16, y as u16)) {
                        cell.set_char(glyph).set_fg(layer.color);
                    }
                }
            }
        }
    }
}

fn render_sun(area: Rect, buf: &mut Buffer) {
    let width = SUN_ART[0].width() as u16;
    if area.width < width + HORIZONTAL_MARGIN * 2 {
        return;
    }
    let x = area.right() - width - HORIZONTAL_MARGIN * 2;
    for (i, row) in SUN_ART.iter().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.bottom() {
            break;
        }
        for (dx, ch) in row.chars().enumerate() {
            if ch == ' ' {
                continue;
            }
            if let Some(cell) = buf.cell_mut((x + dx as u16, y)) {
                cell.set_char(ch).set_fg(SUN);
            }
        }
    }
}

/// "Total Distance:" heading with the value in large glyphs and its unit
fn render_distance<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    let x = area.x + HORIZONTAL_MARGIN;
    let y = area.y + area.height / 4;
    let heading = Style::default().fg(INK).add_modifier(Modifier::BOLD);
    let value = Style::default().fg(INK);

    put(buf, area, x, y, "Total Distance:", heading);

    let rows = digits::big_text(&app.distance_text());
    let last = rows.len() - 1;
    for (i, row) in rows.iter().enumerate() {
        let line = if i == last {
            format!("{row} {}", app.unit())
        } else {
            row.clone()
        };
        put(buf, area, x, y + 1 + i as u16, &line, value);
    }
}

fn render_biker<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    let spoke = app.wheels.glyph(app.frame_time());
    let rows = biker_rows(spoke, spoke);
    let width = rows.iter().map(|r| r.width()).max().unwrap_or(0) as u16;
    let height = rows.len() as u16;
    if area.width < width || area.height < height {
        return;
    }

    let x = area.right().saturating_sub(width + HORIZONTAL_MARGIN).max(area.x);
    let y = area.bottom() - height;
    let style = Style::default().fg(INK).add_modifier(Modifier::BOLD);

    for (i, row) in rows.iter().enumerate() {
        // Outer padding is transparent, the silhouette itself is opaque
        let body = row.trim();
        let indent = (row.len() - row.trim_start().len()) as u16;
        put(buf, area, x + indent, y + i as u16, body, style);
    }
}

fn render_controls<C: Clock>(app: &App<C>, area: Rect, buf: &mut Buffer) {
    buf.set_style(area, Style::default().bg(GROUND));
    if area.height == 0 || area.width <= HORIZONTAL_MARGIN * 2 {
        return;
    }

    let button_height = 3.min(area.height);
    let button = Rect {
        x: area.x + HORIZONTAL_MARGIN,
        y: area.y + (area.height - button_height) / 2,
        width: area.width - HORIZONTAL_MARGIN * 2,
        height: button_height,
    };

    Paragraph::new(app.button_label())
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(ACCENT)),
        )
        .render(button, buf);

    if area.height > button_height + 1 {
        let hint = "(enter) start/stop  (esc)ape";
        let hint_x = area.x + area.width.saturating_sub(hint.width() as u16) / 2;
        put(
            buf,
            area,
            hint_x,
            area.bottom() - 1,
            hint,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC | Modifier::DIM),
        );
    }
}

/// Write a string clipped to `area`
fn put(buf: &mut Buffer, area: Rect, x: u16, y: u16, text: &str, style: Style) {
    if y < area.y || y >= area.bottom() || x >= area.right() {
        return;
    }
    buf.set_stringn(x, y, text, (area.right() - x) as usize, style);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::config::Config;
    use std::time::Duration;

    fn create_test_app() -> App<ManualClock> {
        App::new(Config::default(), ManualClock::new()).unwrap()
    }

    fn render(app: &App<ManualClock>, area: Rect) -> Buffer {
        let mut buffer = Buffer::empty(area);
        app.render(area, &mut buffer);
        buffer
    }

    fn lines(buffer: &Buffer) -> Vec<String> {
        let area = buffer.area();
        (area.top()..area.bottom())
            .map(|y| {
                (area.left()..area.right())
                    .map(|x| buffer[(x, y)].symbol().to_string())
                    .collect()
            })
            .collect()
    }

    fn contains(buffer: &Buffer, needle: &str) -> bool {
        lines(buffer).iter().any(|l| l.contains(needle))
    }

    #[test]
    fn test_idle_screen() {
        let app = create_test_app();
        let buffer = render(&app, Rect::new(0, 0, 80, 24));

        assert!(contains(&buffer, "Let's go!"));
        assert!(contains(&buffer, "Total Distance:"));
        assert!(contains(&buffer, "km"));
        assert!(!contains(&buffer, "Stop"));
    }

    #[test]
    fn test_running_screen_shows_stop() {
        let mut app = create_test_app();
        app.toggle();
        let buffer = render(&app, Rect::new(0, 0, 80, 24));

        assert!(contains(&buffer, "Stop"));
        assert!(!contains(&buffer, "Let's go!"));
    }

    #[test]
    fn test_distance_in_large_digits() {
        let clock = ManualClock::new();
        let mut app = App::new(Config::default(), &clock).unwrap();
        app.toggle();
        for _ in 0..5 {
            clock.advance(Duration::from_secs(1));
            app.on_frame();
        }
        clock.advance(Duration::from_secs(1) / 2);
        app.on_frame();

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let rows = digits::big_text("0.5");
        let rendered = lines(&buffer);
        assert!(rendered.iter().any(|l| l.contains(&rows[0])));
        assert!(rendered.iter().any(|l| l.contains(&rows[1])));
        assert!(rendered
            .iter()
            .any(|l| l.contains(&format!("{} km", rows[2]))));
    }

    #[test]
    fn test_wheels_spin_while_running() {
        let clock = ManualClock::new();
        let mut app = App::new(Config::default(), &clock).unwrap();
        app.toggle();
        clock.advance(Duration::from_millis(500));
        app.on_frame();

        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&app).render(area, &mut buffer);

        let rendered = lines(&buffer);
        assert!(rendered.iter().any(|l| l.contains("|  ─  |")));
        assert!(rendered.iter().any(|l| l.contains("| ─ |")));
    }

    #[test]
    fn test_backdrop_scrolls_with_time() {
        let clock = ManualClock::new();
        let mut app = App::new(Config::default(), &clock).unwrap();
        let area = Rect::new(0, 0, 80, 24);

        app.on_frame();
        let mut first = Buffer::empty(area);
        (&app).render(area, &mut first);

        let mut again = Buffer::empty(area);
        (&app).render(area, &mut again);
        assert_eq!(first, again);

        clock.advance(Duration::from_secs(1));
        app.on_frame();
        let mut later = Buffer::empty(area);
        (&app).render(area, &mut later);
        assert_ne!(first, later);
    }

    #[test]
    fn test_small_areas_do_not_panic() {
        let app = create_test_app();
        for (w, h) in [(20, 5), (1, 1), (5, 30), (10, 6), (0, 0)] {
            let area = Rect::new(0, 0, w, h);
            let buffer = render(&app, area);
            assert_eq!(*buffer.area(), area);
        }
    }

    #[test]
    fn test_wide_terminal_centres_backdrop() {
        let app = create_test_app();
        let buffer = render(&app, Rect::new(0, 0, 240, 30));

        // Bottom row of the backdrop is covered within the tile span only
        let row = &lines(&buffer)[30 - CONTROL_HEIGHT as usize - 1];
        let cells: Vec<_> = row.chars().collect();
        assert_eq!(cells[0], ' ');
        assert_ne!(cells[120], ' ');
        assert_eq!(cells[239], ' ');
    }

    #[test]
    fn test_offset_area() {
        let app = create_test_app();
        let area = Rect::new(3, 2, 60, 20);
        let mut buffer = Buffer::empty(Rect::new(0, 0, 70, 25));
        (&app).render(area, &mut buffer);
        assert!(contains(&buffer, "Let's go!"));
    }
}
