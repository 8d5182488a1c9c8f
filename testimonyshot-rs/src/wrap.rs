//! Greedy word wrap.

/// Break `text` into lines no wider than `max_width`, as measured by `measure`.
///
/// Words are separated by whitespace and joined with single spaces. A word is
/// moved to a new line only when the current line already holds a word, so a
/// word wider than `max_width` sits alone on its own line unbroken. The result
/// always holds at least one line.
///
/// Candidate lines are measured without a trailing space, so every line of
/// two or more words is at most `max_width` wide as drawn. Measuring with the
/// trailing space would instead wrap a word that only fits without it.
pub fn wrap_words<F>(text: &str, max_width: f32, mut measure: F) -> Vec<String>
where
    F: FnMut(&str) -> f32,
{
    let mut lines = Vec::new();
    let mut line = String::new();

    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if measure(&candidate) > max_width {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        } else {
            line = candidate;
        }
    }
    lines.push(line);
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    /// Ten pixels per character.
    fn mono(s: &str) -> f32 {
        s.chars().count() as f32 * 10.0
    }

    #[rstest]
    #[case("", vec![""])]
    #[case("   ", vec![""])]
    #[case("one", vec!["one"])]
    #[case("aaa bbb ccc", vec!["aaa bbb", "ccc"])]
    #[case("aaa  bbb\nccc", vec!["aaa bbb", "ccc"])]
    #[case("a supercalifragilistic b", vec!["a", "supercalifragilistic", "b"])]
    fn test_wrap(#[case] text: &str, #[case] expected: Vec<&str>) {
        assert_eq!(wrap_words(text, 70.0, mono), expected);
    }

    #[test]
    fn test_fits_exactly() {
        // "aaa bbb" is 70 wide: equal to the limit stays on one line
        assert_eq!(wrap_words("aaa bbb", 70.0, mono), vec!["aaa bbb"]);
    }

    #[test]
    fn test_trailing_space_is_not_measured() {
        // "aaa bbb" is 70 wide, "aaa bbb " would be 80
        let lines = wrap_words("aaa bbb c", 75.0, mono);
        assert_eq!(lines, vec!["aaa bbb", "c"]);
    }

    #[test]
    fn test_long_text_respects_width_and_keeps_words() {
        let text = "Lorem ipsum dolor sit amet consectetur adipiscing elit sed do eiusmod \
                    tempor incididunt ut labore et dolore magna aliqua Ut enim ad minim veniam"
            .repeat(4);
        let lines = wrap_words(&text, 200.0, mono);
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(mono(line) <= 200.0 || !line.contains(' '));
        }
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split(' ')).collect();
        let original: Vec<&str> = text.split_whitespace().collect();
        assert_eq!(rejoined, original);
    }
}
