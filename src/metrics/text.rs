// Post text statistics — length, paragraphs, emojis, hashtags, list lines.
//
// Counts are by Unicode scalar value, not bytes, so an emoji-heavy post
// isn't mistaken for a long one.

use std::sync::LazyLock;

use regex_lite::Regex;

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n").expect("paragraph regex is valid"));

// regex-lite has no Unicode classes, so the tag body is checked with
// `char::is_alphanumeric` after matching.
static HASHTAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)#([^\s#]+)").expect("hashtag regex is valid"));

// Lines that start with a bullet glyph or a "1." / "1)" marker.
static LIST_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^[ \t]*(?:[-*•▪►▸◦✓✔➤→]|[0-9]{1,2}[.)])[ \t]+\S")
        .expect("list regex is valid")
});

/// Bullet glyphs from the dingbats block. They mark list lines and are never
/// counted as emojis.
const LIST_MARKER_GLYPHS: [char; 3] = ['✓', '✔', '➤'];

/// Emoji count above which a single post counts as "too many".
pub const TOO_MANY_EMOJIS: usize = 5;

/// Character count above which a post is considered long-form.
pub const LONG_POST_CHARS: usize = 250;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextStats {
    pub chars: usize,
    pub paragraphs: usize,
    pub emojis: usize,
    pub hashtags: usize,
    pub list_lines: usize,
}

impl TextStats {
    pub fn from_message(message: &str) -> Self {
        let trimmed = message.trim();
        if trimmed.is_empty() {
            return Self::default();
        }

        let paragraphs = PARAGRAPH_BREAK
            .split(trimmed)
            .filter(|p| !p.trim().is_empty())
            .count();

        Self {
            chars: trimmed.chars().count(),
            paragraphs,
            emojis: trimmed.chars().filter(|c| is_emoji(*c)).count(),
            hashtags: HASHTAG
                .captures_iter(trimmed)
                .filter(|c| c.get(1).is_some_and(|tag| is_tag_body(tag.as_str())))
                .count(),
            list_lines: LIST_LINE.find_iter(trimmed).count(),
        }
    }

    pub fn is_long(&self) -> bool {
        self.chars > LONG_POST_CHARS
    }

    pub fn has_too_many_emojis(&self) -> bool {
        self.emojis > TOO_MANY_EMOJIS
    }
}

/// A tag needs a letter, digit or underscore right after the `#`. Only that
/// first character is checked, so trailing punctuation ("#café,") is fine.
fn is_tag_body(body: &str) -> bool {
    body.chars()
        .next()
        .is_some_and(|c| c.is_alphanumeric() || c == '_')
}

/// Pictographic emoji blocks. Modifiers (skin tones, ZWJ, variation
/// selectors) are not counted, so a composed emoji counts once per base glyph.
fn is_emoji(c: char) -> bool {
    if LIST_MARKER_GLYPHS.contains(&c) {
        return false;
    }
    matches!(
        c as u32,
        0x1F300..=0x1F3FA   // symbols & pictographs (before skin-tone modifiers)
            | 0x1F400..=0x1F5FF
            | 0x1F600..=0x1F64F // emoticons
            | 0x1F680..=0x1F6FF // transport & map
            | 0x1F900..=0x1F9FF // supplemental symbols
            | 0x1FA70..=0x1FAFF
            | 0x2600..=0x26FF   // misc symbols
            | 0x2700..=0x27BF   // dingbats
            | 0x1F1E6..=0x1F1FF // regional indicators
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message() {
        assert_eq!(TextStats::from_message("   "), TextStats::default());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let stats = TextStats::from_message("héllo 🎉");
        assert_eq!(stats.chars, 7);
        assert_eq!(stats.emojis, 1);
    }

    #[test]
    fn test_paragraphs() {
        let stats = TextStats::from_message("First line.\n\nSecond block.\n  \nThird.");
        assert_eq!(stats.paragraphs, 3);
        assert_eq!(TextStats::from_message("one\ntwo").paragraphs, 1);
    }

    #[test]
    fn test_hashtags_ignore_mid_word_hash() {
        let stats = TextStats::from_message("#coffee time at our C#shop #latte_art");
        assert_eq!(stats.hashtags, 2);
    }

    #[test]
    fn test_hashtags_accept_non_ascii_letters() {
        let stats = TextStats::from_message("Opening day #café #über #2024, #!! and #_tag");
        assert_eq!(stats.hashtags, 4);
    }

    #[test]
    fn test_checklist_markers_are_not_emojis() {
        let text = "Today:\n✓ fresh bread\n✔ pastries\n➤ coffee ☕";
        let stats = TextStats::from_message(text);
        assert_eq!(stats.list_lines, 3);
        assert_eq!(stats.emojis, 1);
    }

    #[test]
    fn test_list_lines() {
        let text = "Menu:\n- espresso\n- latte\n1. order\n2) pay\nnot-a-list";
        assert_eq!(TextStats::from_message(text).list_lines, 4);
    }

    #[test]
    fn test_skin_tone_modifier_not_double_counted() {
        // 👍 followed by a skin-tone modifier (U+1F3FD)
        let stats = TextStats::from_message("great \u{1F44D}\u{1F3FD}");
        assert_eq!(stats.emojis, 1);
    }

    #[test]
    fn test_too_many_emojis_threshold() {
        assert!(!TextStats::from_message("🎉🎉🎉🎉🎉").has_too_many_emojis());
        assert!(TextStats::from_message("🎉🎉🎉🎉🎉🎉").has_too_many_emojis());
    }
}
