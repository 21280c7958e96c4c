//! Proportional text measurement and word wrapping for the spec sheet.

/// Character widths in hundredths of an average character, for ASCII
/// 0x20..=0x7e.
pub const AW_CHAR: [u8; 95] = [
    45,  55,  62, 115,  90, 132, 125,  40,
    55,  55,  71, 115,  45,  48,  45,  50,
    91,  91,  91,  91,  91,  91,  91,  91,
    91,  91,  50,  50, 120, 120, 120,  78,
   142, 102, 105, 110, 115, 105,  98, 105,
   125,  58,  58, 107,  95, 145, 125, 115,
    95, 115, 107,  95,  97, 118, 102, 150,
   100,  93, 100,  58,  50,  58, 119,  72,
    72,  86,  92,  80,  92,  85,  52,  92,
    92,  47,  47,  88,  48, 135,  92,  86,
    92,  92,  69,  75,  58,  92,  80, 121,
    81,  80,  76,  91,  49,  91, 118,
];

/// Width of `text` in hundredths of an average character. Anything outside
/// printable ASCII counts as one full character.
pub fn text_length(text: &str) -> u32 {
    text.chars()
        .map(|c| match c {
            ' '..='~' => AW_CHAR[c as usize - 0x20] as u32,
            _ => 100,
        })
        .sum()
}

/// Width of `text` in inches, given the width of an average character
pub fn text_width_inches(text: &str, charwid: f64) -> f64 {
    text_length(text) as f64 * charwid * 0.01
}

/// Greedy word wrap to `max_width` inches.
///
/// A word wider than `max_width` is not split; it gets a line to itself.
/// Empty input gives one empty line.
pub fn wrap(text: &str, max_width: f64, charwid: f64) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
            continue;
        }
        let candidate = format!("{current} {word}");
        if text_width_inches(&candidate, charwid) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_follow_the_table() {
        assert_eq!(text_length(" "), 45);
        assert_eq!(text_length("Ab"), 102 + 86);
        assert_eq!(text_length("é"), 100);
        assert!((text_width_inches("W", 0.08) - 0.12).abs() < 1e-12);
    }

    #[test]
    fn short_text_stays_on_one_line() {
        assert_eq!(wrap("Dacron wrapped foam", 4.5, 0.08), vec!["Dacron wrapped foam"]);
    }

    #[test]
    fn long_text_breaks_between_words() {
        let lines = wrap("Sunbrella Canvas Navy with contrast welt in Canvas Natural and a matching button tuft", 4.5, 0.08);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(text_width_inches(line, 0.08) <= 4.5 || !line.contains(' '));
        }
        assert_eq!(lines.join(" "), "Sunbrella Canvas Navy with contrast welt in Canvas Natural and a matching button tuft");
    }

    #[test]
    fn oversized_word_gets_its_own_line() {
        let lines = wrap("a Pneumonoultramicroscopic b", 1.0, 0.08);
        assert_eq!(lines, vec!["a", "Pneumonoultramicroscopic", "b"]);
    }

    #[test]
    fn empty_text_is_one_blank_line() {
        assert_eq!(wrap("   ", 4.5, 0.08), vec![String::new()]);
    }
}
