/// Longest text Telegram accepts in one message, counted in UTF-16 code units.
pub(crate) const MESSAGE_LIMIT: usize = 4096;

pub(crate) fn fits(text: &str) -> bool {
    text.encode_utf16().count() <= MESSAGE_LIMIT
}

/// Cuts `text` down to the message limit, ending it with an ellipsis when cut.
pub(crate) fn truncate(text: String) -> String {
    if fits(&text) {
        return text;
    }
    let mut units = 0;
    let mut cut = String::new();
    for c in text.chars() {
        units += c.len_utf16();
        if units > MESSAGE_LIMIT - 1 {
            break;
        }
        cut.push(c);
    }
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_left_alone() {
        assert!(fits("Capital of Italy?"));
        assert_eq!(truncate("Capital of Italy?".to_owned()), "Capital of Italy?");
    }

    #[test]
    fn long_text_is_cut_to_the_limit() {
        let long = "a".repeat(MESSAGE_LIMIT + 10);
        assert!(!fits(&long));

        let cut = truncate(long);
        assert!(fits(&cut));
        assert!(cut.ends_with('…'));
        assert_eq!(cut.encode_utf16().count(), MESSAGE_LIMIT);
    }

    #[test]
    fn limit_counts_utf16_units() {
        let emoji = "🪐".repeat(MESSAGE_LIMIT / 2 + 1);
        assert!(!fits(&emoji));
        assert!(fits(&truncate(emoji)));
    }
}
