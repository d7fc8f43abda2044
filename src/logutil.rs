//! Logging helpers. Yard narratives are multi-paragraph; log records should
//! stay on one line.

const MAX_PREVIEW: usize = 200;

/// Collapse every whitespace run (newlines included) into a single space and
/// cut the result at `MAX_PREVIEW` characters with an ellipsis.
pub fn flatten_for_log(s: &str) -> String {
    let mut out = String::with_capacity(s.len().min(MAX_PREVIEW) + 4);
    let mut taken = 0;
    for word in s.split_whitespace() {
        if taken > 0 {
            if taken >= MAX_PREVIEW {
                out.push('…');
                return out;
            }
            out.push(' ');
            taken += 1;
        }
        for ch in word.chars() {
            if taken >= MAX_PREVIEW {
                out.push('…');
                return out;
            }
            if ch.is_control() {
                out.push('?');
            } else {
                out.push(ch);
            }
            taken += 1;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::flatten_for_log;

    #[test]
    fn paragraphs_become_one_line() {
        let s = "You won!\n\n   You defeated Fie.\tYou gain a level!";
        assert_eq!(flatten_for_log(s), "You won! You defeated Fie. You gain a level!");
    }

    #[test]
    fn long_text_is_truncated() {
        let s = "a".repeat(500);
        let out = flatten_for_log(&s);
        assert_eq!(out.chars().count(), 201);
        assert!(out.ends_with('…'));
    }
}
