//! Domain video model consumed by the presentation layer.

use serde::Serialize;

/// Character budget for [`DevByteVideo::short_description`].
pub const SHORT_DESCRIPTION_CHARS: usize = 200;

const TRAILING_SEPARATORS: [&str; 4] = [", ", "; ", ": ", " "];

/// One DevByte video as shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DevByteVideo {
    pub title: String,
    pub description: String,
    /// Playback URL. Also the stable identity of the video.
    pub url: String,
    /// Last-updated marker as published by the playlist endpoint.
    pub updated: String,
    pub thumbnail: String,
}

impl DevByteVideo {
    /// Description cut at a word boundary for list rows.
    pub fn short_description(&self) -> String {
        smart_truncate(&self.description, SHORT_DESCRIPTION_CHARS)
    }
}

/// Truncates `text` on word boundaries once it grows past `length` chars.
///
/// Whole words are appended until the buffer exceeds `length`, so the result
/// may run slightly over. A trailing separator is trimmed and `...` is
/// appended when words were dropped.
pub fn smart_truncate(text: &str, length: usize) -> String {
    let mut builder = String::with_capacity(text.len().min(length + 16));
    let mut char_count = 0usize;
    let mut has_more = false;

    for word in text.split(' ') {
        if char_count > length {
            has_more = true;
            break;
        }
        builder.push_str(word);
        builder.push(' ');
        char_count += word.chars().count() + 1;
    }

    for separator in TRAILING_SEPARATORS {
        if builder.ends_with(separator) {
            builder.truncate(builder.len() - separator.len());
        }
    }

    if has_more {
        builder.push_str("...");
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::{smart_truncate, DevByteVideo};

    #[test]
    fn short_text_is_returned_without_ellipsis() {
        assert_eq!(smart_truncate("hello world", 200), "hello world");
    }

    #[test]
    fn long_text_is_cut_on_word_boundary() {
        let truncated = smart_truncate("alpha beta gamma delta", 8);
        assert_eq!(truncated, "alpha beta...");
    }

    #[test]
    fn trailing_punctuation_is_trimmed_before_ellipsis() {
        let truncated = smart_truncate("first, second, third", 5);
        assert_eq!(truncated, "first...");

        let trimmed = smart_truncate("one: two", 100);
        assert_eq!(trimmed, "one: two");
    }

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(smart_truncate("", 10), "");
    }

    #[test]
    fn short_description_uses_two_hundred_char_budget() {
        let video = DevByteVideo {
            title: "t".to_string(),
            description: "word ".repeat(100),
            url: "https://example.com/v".to_string(),
            updated: "2019-01-01".to_string(),
            thumbnail: "https://example.com/t.png".to_string(),
        };
        let short = video.short_description();
        assert!(short.ends_with("..."));
        assert!(short.chars().count() < 220);
    }

    #[test]
    fn serializes_with_field_names_for_listing() {
        let video = DevByteVideo {
            title: "Room".to_string(),
            description: "Persistence".to_string(),
            url: "https://example.com/v".to_string(),
            updated: "2019-01-01".to_string(),
            thumbnail: "https://example.com/t.png".to_string(),
        };
        let json = serde_json::to_value(&video).expect("video should serialize");
        assert_eq!(json["title"], "Room");
        assert_eq!(json["url"], "https://example.com/v");
    }
}
