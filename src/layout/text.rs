use crate::config::TextConfig;

use super::TextBlock;

/// Greedy word wrap at a maximum character count per line.
pub(super) fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= max_width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn block_from_lines(lines: Vec<String>, config: &TextConfig) -> TextBlock {
    let max_len = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
    TextBlock {
        width: max_len as f32 * config.char_width,
        height: lines.len() as f32 * config.line_height,
        lines,
    }
}

/// Wrap and size a node label. A block much wider than tall is re-wrapped
/// at half the width so nodes stay near-square.
pub(super) fn measure_node(text: &str, max_width: usize, config: &TextConfig) -> TextBlock {
    let block = block_from_lines(wrap_text(text, max_width), config);
    if block.width > block.height * config.squareness_ratio {
        return block_from_lines(wrap_text(text, (max_width / 2).max(1)), config);
    }
    block
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_respects_max_width() {
        let lines = wrap_text("one two three four five six", 9);
        assert!(lines.iter().all(|line| line.chars().count() <= 9));
        assert_eq!(lines.join(" "), "one two three four five six");
    }

    #[test]
    fn wrap_keeps_short_text_on_one_line() {
        assert_eq!(wrap_text("short", 20), vec!["short"]);
    }

    #[test]
    fn long_word_gets_its_own_line() {
        let lines = wrap_text("an extraordinarily long token", 10);
        assert!(lines.contains(&"extraordinarily".to_string()));
    }

    #[test]
    fn wide_blocks_are_rewrapped_toward_square() {
        let config = TextConfig::default();
        let single = block_from_lines(wrap_text("alpha beta gamma delta epsilon zeta", 40), &config);
        let block = measure_node("alpha beta gamma delta epsilon zeta", 40, &config);
        assert!(block.lines.len() > single.lines.len());
        assert!(block.width < single.width);
    }

    #[test]
    fn dimensions_scale_with_content() {
        let config = TextConfig::default();
        let block = measure_node("hello", 20, &config);
        assert_eq!(block.lines, vec!["hello"]);
        assert!((block.width - 0.5).abs() < 1e-6);
        assert!((block.height - 0.3).abs() < 1e-6);
    }
}
