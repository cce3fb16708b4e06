//! Greedy word wrapping with a fixed per-line character budget.

/// Wraps `text` into page lines. Paragraphs (split on `\n`) wrap independently
/// at word boundaries; one blank separator line is emitted between paragraphs
/// so paragraph spacing survives on the page. Words longer than the budget are
/// hard-split, so no returned line ever exceeds `budget` characters.
///
/// Empty input yields no lines. Public so callers (and tests) can re-run the
/// exact wrapping the renderer uses.
pub fn wrap_text(text: &str, budget: usize) -> Vec<String> {
    let budget = budget.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        wrap_paragraph(paragraph, budget, &mut lines);
        lines.push(String::new()); // paragraph gap
    }
    lines.pop(); // gaps go between paragraphs, not after the last one
    lines
}

fn wrap_paragraph(paragraph: &str, budget: usize, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in paragraph.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > budget {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            // Hard-split the oversized word; the remainder starts the next line
            // so following words can still join it.
            for ch in word.chars() {
                if current_len == budget {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                current.push(ch);
                current_len += 1;
            }
        } else if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= budget {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(wrap_text("", 37).is_empty());
    }

    #[test]
    fn two_paragraphs_get_one_gap_line() {
        assert_eq!(wrap_text("Hello\nWorld", 37), vec!["Hello", "", "World"]);
    }

    #[test]
    fn empty_paragraph_keeps_its_spacing() {
        assert_eq!(wrap_text("A\n\nB", 37), vec!["A", "", "", "B"]);
    }

    #[test]
    fn long_paragraph_wraps_at_word_boundaries() {
        let lines = wrap_text("the quick brown fox jumps over the lazy dog", 15);
        assert_eq!(
            lines,
            vec!["the quick brown", "fox jumps over", "the lazy dog"]
        );
        assert!(lines.iter().all(|l| l.chars().count() <= 15));
    }

    #[test]
    fn oversized_word_is_hard_split() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn word_after_hard_split_joins_the_remainder() {
        assert_eq!(wrap_text("abcdef gh", 5), vec!["abcde", "f gh"]);
    }

    #[test]
    fn runs_of_spaces_collapse() {
        assert_eq!(wrap_text("a   b", 10), vec!["a b"]);
    }
}
