use time::{OffsetDateTime, format_description::FormatItem, macros::format_description};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");

pub fn format_human_date(timestamp: OffsetDateTime) -> String {
    timestamp
        .date()
        .format(HUMAN_DATE_FORMAT)
        .unwrap_or_else(|_| timestamp.date().to_string())
}

/// Collapse post content into a short plain-text teaser for list cards.
pub fn excerpt(content: &str, max_len: usize) -> String {
    let mut text = String::with_capacity(max_len);
    let mut last_was_space = false;

    for ch in content.chars() {
        if ch.is_whitespace() {
            if !last_was_space && !text.is_empty() {
                text.push(' ');
            }
            last_was_space = true;
        } else {
            text.push(ch);
            last_was_space = false;
        }

        if text.len() >= max_len {
            text.push('…');
            break;
        }
    }

    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use super::*;

    #[test]
    fn human_date_uses_long_month() {
        let stamp = datetime!(2024-03-07 10:30 UTC);
        assert_eq!(format_human_date(stamp), "March 7, 2024");
    }

    #[test]
    fn excerpt_collapses_whitespace() {
        assert_eq!(excerpt("hello\n\n  world", 80), "hello world");
    }

    #[test]
    fn excerpt_truncates_long_content() {
        let long = "word ".repeat(100);
        let teaser = excerpt(&long, 40);
        assert!(teaser.len() <= 44);
        assert!(teaser.ends_with('…'));
    }

    #[test]
    fn excerpt_of_empty_content_is_empty() {
        assert_eq!(excerpt("", 80), "");
    }
}
