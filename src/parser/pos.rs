use crate::domain::model::PartOfSpeech;
use crate::parser::error::UnknownCodeError;

/// 中文詞頻表的詞性縮寫
const CHINESE_CODES: &[(&str, PartOfSpeech)] = &[
    ("adj", PartOfSpeech::Adjective),
    ("adv", PartOfSpeech::Adverb),
    ("aux", PartOfSpeech::Auxiliary),
    ("clas", PartOfSpeech::Classifier),
    ("conj", PartOfSpeech::Conjunction),
    ("idiom", PartOfSpeech::Idiom),
    ("interj", PartOfSpeech::Interjection),
    ("loc", PartOfSpeech::Locality),
    ("n", PartOfSpeech::Noun),
    ("num", PartOfSpeech::Numeral),
    ("ono", PartOfSpeech::Onomatopoeia),
    ("part", PartOfSpeech::Particle),
    ("place", PartOfSpeech::Place),
    ("pref", PartOfSpeech::Prefix),
    ("prep", PartOfSpeech::Preposition),
    ("pron", PartOfSpeech::Pronoun),
    ("suf", PartOfSpeech::Suffix),
    ("time", PartOfSpeech::Time),
    ("v", PartOfSpeech::Verb),
];

/// 德文詞頻表的詞性縮寫，名詞以性別區分
const GERMAN_CODES: &[(&str, PartOfSpeech)] = &[
    ("adj", PartOfSpeech::Adjective),
    ("adv", PartOfSpeech::Adverb),
    ("art", PartOfSpeech::Article),
    ("aux", PartOfSpeech::Auxiliary),
    ("conj", PartOfSpeech::Conjunction),
    ("interj", PartOfSpeech::Interjection),
    ("nf", PartOfSpeech::Noun),
    ("nm", PartOfSpeech::Noun),
    ("nn", PartOfSpeech::Noun),
    ("npl", PartOfSpeech::Noun),
    ("num", PartOfSpeech::Numeral),
    ("part", PartOfSpeech::Particle),
    ("prep", PartOfSpeech::Preposition),
    ("pron", PartOfSpeech::Pronoun),
    ("verb", PartOfSpeech::Verb),
];

/// A closed abbreviation table. Codes outside the table are errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PosTable {
    Chinese,
    German,
}

impl PosTable {
    fn pairs(self) -> &'static [(&'static str, PartOfSpeech)] {
        match self {
            PosTable::Chinese => CHINESE_CODES,
            PosTable::German => GERMAN_CODES,
        }
    }

    pub fn codes(self) -> impl Iterator<Item = &'static str> {
        self.pairs().iter().map(|&(code, _)| code)
    }

    pub fn canonicalize(self, code: &str) -> Result<PartOfSpeech, UnknownCodeError> {
        let code = code.trim();
        self.pairs()
            .iter()
            .find(|&&(known, _)| known == code)
            .map(|&(_, pos)| pos)
            .ok_or_else(|| UnknownCodeError {
                code: code.to_string(),
            })
    }
}

/// 以中文詞性表查詢
pub fn canonicalize(code: &str) -> Result<PartOfSpeech, UnknownCodeError> {
    PosTable::Chinese.canonicalize(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chinese_codes_map_to_labels() {
        let expected = [
            ("adj", "adjective"),
            ("adv", "adverb"),
            ("aux", "auxiliary"),
            ("clas", "classifier"),
            ("conj", "conjunction"),
            ("idiom", "idiom"),
            ("interj", "interjection"),
            ("loc", "locality"),
            ("n", "noun"),
            ("num", "numeral"),
            ("ono", "onomatopoeia"),
            ("part", "particle"),
            ("place", "place"),
            ("pref", "prefix"),
            ("prep", "preposition"),
            ("pron", "pronoun"),
            ("suf", "suffix"),
            ("time", "time"),
            ("v", "verb"),
        ];
        for (code, label) in expected {
            assert_eq!(canonicalize(code).unwrap().label(), label);
        }
        assert_eq!(PosTable::Chinese.codes().count(), expected.len());
    }

    #[test]
    fn test_unknown_code_is_an_error() {
        let err = canonicalize("xyz").unwrap_err();
        assert_eq!(err.code, "xyz");
        // 德文專用縮寫不屬於中文表
        assert!(canonicalize("art").is_err());
        assert!(canonicalize("").is_err());
        assert!(canonicalize("N").is_err());
    }

    #[test]
    fn test_german_table() {
        assert_eq!(
            PosTable::German.canonicalize("art"),
            Ok(PartOfSpeech::Article)
        );
        assert_eq!(PosTable::German.canonicalize("nf"), Ok(PartOfSpeech::Noun));
        assert_eq!(PosTable::German.canonicalize(" verb "), Ok(PartOfSpeech::Verb));
        assert!(PosTable::German.canonicalize("v").is_err());
    }
}
