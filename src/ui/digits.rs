use itertools::Itertools;

pub const GLYPH_HEIGHT: usize = 3;

/// Three-row box-drawing glyph for a digit or decimal point
pub fn glyph(c: char) -> Option<[&'static str; GLYPH_HEIGHT]> {
    Some(match c {
        '0' => ["┌─┐", "│ │", "└─┘"],
        '1' => [" ┐ ", " │ ", " ┴ "],
        '2' => ["╶─┐", "┌─┘", "└─╴"],
        '3' => ["╶─┐", " ─┤", "╶─┘"],
        '4' => ["╷ ╷", "└─┤", "  ╵"],
        '5' => ["┌─╴", "└─┐", "╶─┘"],
        '6' => ["┌─╴", "├─┐", "└─┘"],
        '7' => ["╶─┐", "  │", "  ╵"],
        '8' => ["┌─┐", "├─┤", "└─┘"],
        '9' => ["┌─┐", "└─┤", "╶─┘"],
        '.' => [" ", " ", "▪"],
        _ => return None,
    })
}

/// Render `text` as three rows of large glyphs. Unsupported characters are dropped.
pub fn big_text(text: &str) -> [String; GLYPH_HEIGHT] {
    let glyphs: Vec<_> = text.chars().filter_map(glyph).collect();
    [0, 1, 2].map(|row| glyphs.iter().map(|g| g[row]).join(" "))
}
