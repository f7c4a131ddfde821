//! Large block digits built from a 5-row glyph table.

/// Rows of each glyph; `#` cells are filled.
fn glyph(c: char) -> Option<[&'static str; 5]> {
    let rows = match c {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        ':' => [" ", "#", " ", "#", " "],
        ' ' => [" ", " ", " ", " ", " "],
        'A' => ["###", "# #", "###", "# #", "# #"],
        'P' => ["###", "# #", "###", "#  ", "#  "],
        'M' => ["# # #", "## ##", "# # #", "#   #", "#   #"],
        _ => return None,
    };
    Some(rows)
}

pub const GLYPH_ROWS: u16 = 5;

/// Width and height in cells of `text` drawn at `scale`, or `None` if a
/// character has no glyph.
pub fn measure(text: &str, scale: u16) -> Option<(u16, u16)> {
    let mut width = 0u16;
    for (i, c) in text.chars().enumerate() {
        let rows = glyph(c)?;
        if i > 0 {
            width += scale;
        }
        width += rows[0].len() as u16 * scale;
    }
    Some((width, GLYPH_ROWS * scale))
}

/// The largest scale up to `preferred` at which `text` fits in
/// `width` x `height`.
pub fn fit_scale(text: &str, preferred: u16, width: u16, height: u16) -> Option<u16> {
    (1..=preferred.max(1)).rev().find(|&scale| {
        measure(text, scale).is_some_and(|(w, h)| w <= width && h <= height)
    })
}

/// Render `text` as block lines, each filled cell drawn with `fill`.
pub fn render(text: &str, scale: u16, fill: char) -> Option<Vec<String>> {
    let glyphs = text.chars().map(glyph).collect::<Option<Vec<_>>>()?;
    let scale = usize::from(scale.max(1));
    let mut lines = Vec::with_capacity(GLYPH_ROWS as usize * scale);
    for row in 0..GLYPH_ROWS as usize {
        let mut line = String::new();
        for (i, rows) in glyphs.iter().enumerate() {
            if i > 0 {
                line.push_str(&" ".repeat(scale));
            }
            for cell in rows[row].chars() {
                let ch = if cell == '#' { fill } else { ' ' };
                line.push_str(&ch.to_string().repeat(scale));
            }
        }
        for _ in 0..scale {
            lines.push(line.clone());
        }
    }
    Some(lines)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_digit_at_scale_one() {
        let lines = render("7", 1, '#').unwrap();
        assert_eq!(lines, ["###", "  #", "  #", "  #", "  #"]);
    }

    #[test]
    fn scaling_doubles_cells() {
        let lines = render("1", 2, 'x').unwrap();
        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "  xx  ");
        assert_eq!(lines[1], "  xx  ");
        assert_eq!(lines[2], "xxxx  ");
    }

    #[test]
    fn measure_counts_gaps() {
        // 3 + 1 + 3 + 1 + 1 + 1 + 3 + 1 + 3
        assert_eq!(measure("00:00", 1), Some((17, 5)));
        assert_eq!(measure("00:00", 2), Some((34, 10)));
        assert_eq!(measure("12:00 PM", 1).map(|(w, _)| w), Some(29));
    }

    #[test]
    fn rendered_width_matches_measure() {
        let lines = render("09:41:07", 3, '█').unwrap();
        let (width, height) = measure("09:41:07", 3).unwrap();
        assert_eq!(lines.len(), height as usize);
        assert!(lines.iter().all(|l| l.chars().count() == width as usize));
    }

    #[test]
    fn unknown_characters_have_no_glyph() {
        assert_eq!(render("1?", 1, '#'), None);
        assert_eq!(measure("x", 1), None);
    }

    #[test]
    fn fit_scale_shrinks_to_area() {
        assert_eq!(fit_scale("00:00", 4, 200, 50), Some(4));
        assert_eq!(fit_scale("00:00", 4, 40, 50), Some(2));
        assert_eq!(fit_scale("00:00", 4, 10, 50), None);
    }
}
