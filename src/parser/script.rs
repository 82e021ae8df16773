//! Character tables for the scripts mixed in bilingual example fields.

/// 一組語言對的字元分類表，為靜態資料，建立後不可變更。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptProfile {
    pub name: &'static str,
    /// 來源語言文字（漢字）
    pub source_ranges: &'static [(char, char)],
    /// 來源語言標點，句中允許出現
    pub source_punctuation: &'static [(char, char)],
    /// 目標語言字母
    pub target_letters: &'static [(char, char)],
    /// 可結束來源句的 ASCII 標點
    pub source_terminators: &'static [char],
    pub closing_quote: char,
    pub opening_quote: char,
}

pub static CHINESE_ENGLISH: ScriptProfile = ScriptProfile {
    name: "chinese-english",
    source_ranges: &[('\u{4e00}', '\u{9fff}'), ('\u{3400}', '\u{4dbf}')],
    source_punctuation: &[
        ('\u{00b7}', '\u{00b7}'),
        ('\u{2010}', '\u{205e}'),
        ('\u{3000}', '\u{303f}'),
        ('\u{ff01}', '\u{ff20}'),
        ('\u{ff3b}', '\u{ff40}'),
        ('\u{ff5b}', '\u{ff65}'),
    ],
    target_letters: &[('A', 'Z'), ('a', 'z')],
    source_terminators: &['?', '.'],
    closing_quote: '”',
    opening_quote: '“',
};

fn in_ranges(ranges: &[(char, char)], c: char) -> bool {
    ranges.iter().any(|&(low, high)| (low..=high).contains(&c))
}

impl ScriptProfile {
    pub fn is_source_char(&self, c: char) -> bool {
        in_ranges(self.source_ranges, c)
    }

    /// Punctuation allowed inside a source sentence. Includes ASCII digits,
    /// ASCII punctuation and the plain space.
    pub fn is_source_punctuation(&self, c: char) -> bool {
        in_ranges(self.source_punctuation, c)
            || c.is_ascii_punctuation()
            || c.is_ascii_digit()
            || c == ' '
    }

    /// Whether a source sentence may end with `c` (before an optional
    /// closing quote). ASCII digits and most ASCII punctuation may appear
    /// inside the sentence but never end it.
    pub fn ends_source_text(&self, c: char) -> bool {
        if c.is_whitespace() || c == self.closing_quote || c == self.opening_quote {
            return false;
        }
        self.is_source_char(c)
            || in_ranges(self.source_punctuation, c)
            || self.source_terminators.contains(&c)
    }

    pub fn is_source_side(&self, c: char) -> bool {
        !self.is_target_letter(c) && (self.is_source_char(c) || self.is_source_punctuation(c))
    }

    pub fn is_target_letter(&self, c: char) -> bool {
        in_ranges(self.target_letters, c)
    }

    pub fn contains_source_char(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_source_char(c))
    }

    pub fn contains_target_letter(&self, text: &str) -> bool {
        text.chars().any(|c| self.is_target_letter(c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_english_classes() {
        let p = &CHINESE_ENGLISH;
        assert!(p.is_source_char('的'));
        assert!(!p.is_source_char('。'));
        assert!(p.is_source_punctuation('。'));
        assert!(p.is_source_punctuation('：'));
        assert!(p.is_source_punctuation('“'));
        assert!(p.is_source_punctuation('…'));
        assert!(p.is_source_punctuation('3'));
        assert!(p.is_target_letter('S'));
        assert!(!p.is_source_side('x'));
        // 全形英文字母不屬於任何一側
        assert!(!p.is_source_side('Ａ'));
        assert!(!p.is_target_letter('Ａ'));
    }

    #[test]
    fn test_source_text_endings() {
        let p = &CHINESE_ENGLISH;
        for c in ['的', '。', '！', '？', '…', '：', '?', '.'] {
            assert!(p.ends_source_text(c), "{:?}", c);
        }
        for c in ['(', '"', '-', '3', ' ', '\u{3000}', '”', '“', ','] {
            assert!(!p.ends_source_text(c), "{:?}", c);
        }
    }

    #[test]
    fn test_contains_checks() {
        assert!(CHINESE_ENGLISH.contains_source_char("She 说"));
        assert!(!CHINESE_ENGLISH.contains_source_char("She's book."));
        assert!(CHINESE_ENGLISH.contains_target_letter("我有PC"));
        assert!(!CHINESE_ENGLISH.contains_target_letter("我有３个。"));
    }
}
