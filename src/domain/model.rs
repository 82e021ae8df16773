use serde::{Deserialize, Serialize};
use std::fmt;

/// 支援的詞頻表檔案格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum LexiconShape {
    /// Chinese word frequency list, one line per entry
    Chinese,
    /// German word frequency list with continuation lines
    German,
    /// Chinese character frequency list
    ChineseCharacters,
}

impl LexiconShape {
    /// 檔案開頭需略過的標頭行數
    pub fn default_header_lines(&self) -> usize {
        match self {
            LexiconShape::Chinese => 4,
            LexiconShape::German => 0,
            LexiconShape::ChineseCharacters => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LexiconShape::Chinese => "chinese",
            LexiconShape::German => "german",
            LexiconShape::ChineseCharacters => "chinese-characters",
        }
    }
}

impl fmt::Display for LexiconShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical part-of-speech labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Adjective,
    Adverb,
    Article,
    Auxiliary,
    Classifier,
    Conjunction,
    Idiom,
    Interjection,
    Locality,
    Noun,
    Numeral,
    Onomatopoeia,
    Particle,
    Place,
    Prefix,
    Preposition,
    Pronoun,
    Suffix,
    Time,
    Verb,
}

impl PartOfSpeech {
    pub fn label(&self) -> &'static str {
        match self {
            PartOfSpeech::Adjective => "adjective",
            PartOfSpeech::Adverb => "adverb",
            PartOfSpeech::Article => "article",
            PartOfSpeech::Auxiliary => "auxiliary",
            PartOfSpeech::Classifier => "classifier",
            PartOfSpeech::Conjunction => "conjunction",
            PartOfSpeech::Idiom => "idiom",
            PartOfSpeech::Interjection => "interjection",
            PartOfSpeech::Locality => "locality",
            PartOfSpeech::Noun => "noun",
            PartOfSpeech::Numeral => "numeral",
            PartOfSpeech::Onomatopoeia => "onomatopoeia",
            PartOfSpeech::Particle => "particle",
            PartOfSpeech::Place => "place",
            PartOfSpeech::Prefix => "prefix",
            PartOfSpeech::Preposition => "preposition",
            PartOfSpeech::Pronoun => "pronoun",
            PartOfSpeech::Suffix => "suffix",
            PartOfSpeech::Time => "time",
            PartOfSpeech::Verb => "verb",
        }
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 一組例句與其翻譯
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    pub source_language_text: String,
    pub target_language_text: String,
}

impl Example {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source_language_text: source.into(),
            target_language_text: target.into(),
        }
    }
}

/// 詞頻統計欄位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    pub normalized_frequency: f64,
    pub dispersion_index: f64,
    pub usage_rate: f64,
    pub register_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub rank: u32,
    pub headword: String,
    pub headword_traditional: Option<String>,
    pub pronunciation: String,
    pub level_tag: Option<u8>,
    pub part_of_speech: PartOfSpeech,
    pub gloss: String,
    pub examples: Vec<Example>,
    pub metrics: Metrics,
    /// Line number of the entry's header line in the source text.
    #[serde(skip)]
    pub line: usize,
}

impl Entry {
    /// 第一組例句的原文
    pub fn example_source_language_text(&self) -> &str {
        self.examples
            .first()
            .map_or("", |example| example.source_language_text.as_str())
    }

    /// 第一組例句的譯文
    pub fn example_target_language_text(&self) -> &str {
        self.examples
            .first()
            .map_or("", |example| example.target_language_text.as_str())
    }
}

/// Rank-ordered list of validated entries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Table {
    entries: Vec<Entry>,
}

impl Table {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Entry> {
        self.entries.iter()
    }

    pub fn get_by_rank(&self, rank: u32) -> Option<&Entry> {
        // 排名嚴格遞增，可二分搜尋
        self.entries
            .binary_search_by_key(&rank, |entry| entry.rank)
            .ok()
            .map(|index| &self.entries[index])
    }

    pub fn head(&self, count: usize) -> &[Entry] {
        &self.entries[..count.min(self.entries.len())]
    }

    pub fn into_entries(self) -> Vec<Entry> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Entry;
    type IntoIter = std::slice::Iter<'a, Entry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// 字頻表中收錄此字的詞及其詞頻排名
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterHeadword {
    pub word: String,
    pub rank: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub rank: u32,
    pub character: String,
    pub character_traditional: Option<String>,
    pub pronunciation: String,
    pub level_tag: Option<u8>,
    pub headwords: Vec<CharacterHeadword>,
}

/// Result of parsing one lexicon file of any shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entries", rename_all = "snake_case")]
pub enum ParsedLexicon {
    Words(Table),
    Characters(Vec<CharacterEntry>),
}

impl ParsedLexicon {
    pub fn len(&self) -> usize {
        match self {
            ParsedLexicon::Words(table) => table.len(),
            ParsedLexicon::Characters(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// 輸出檔案格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Tsv,
    Json,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Tsv => "tsv",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Raw text of one lexicon file, as handed to the parser.
#[derive(Debug, Clone)]
pub struct SourceText {
    pub name: String,
    pub shape: LexiconShape,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct TransformResult {
    pub name: String,
    pub lexicon: ParsedLexicon,
    pub csv_output: String,
    pub tsv_output: String,
    pub json_output: String,
}

impl TransformResult {
    pub fn output_for(&self, format: OutputFormat) -> &str {
        match format {
            OutputFormat::Csv => &self.csv_output,
            OutputFormat::Tsv => &self.tsv_output,
            OutputFormat::Json => &self.json_output,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(rank: u32) -> Entry {
        Entry {
            rank,
            headword: format!("词{}", rank),
            headword_traditional: None,
            pronunciation: "ci".to_string(),
            level_tag: Some(1),
            part_of_speech: PartOfSpeech::Noun,
            gloss: "word".to_string(),
            examples: vec![Example::new("这是词。", "This is a word.")],
            metrics: Metrics {
                normalized_frequency: 1.0,
                dispersion_index: 0.5,
                usage_rate: 0.1,
                register_code: None,
            },
            line: rank as usize,
        }
    }

    #[test]
    fn test_table_lookup_by_rank() {
        let table = Table::new(vec![entry(1), entry(2), entry(5)]);
        assert_eq!(table.get_by_rank(5).map(|e| e.headword.as_str()), Some("词5"));
        assert!(table.get_by_rank(3).is_none());
        assert_eq!(table.head(2).len(), 2);
        assert_eq!(table.head(10).len(), 3);
    }

    #[test]
    fn test_entry_example_accessors() {
        let mut e = entry(1);
        assert_eq!(e.example_source_language_text(), "这是词。");
        assert_eq!(e.example_target_language_text(), "This is a word.");
        e.examples.clear();
        assert_eq!(e.example_source_language_text(), "");
    }

    #[test]
    fn test_shape_serde_names() {
        let shape: LexiconShape = serde_json::from_str("\"chinese-characters\"").unwrap();
        assert_eq!(shape, LexiconShape::ChineseCharacters);
        assert_eq!(shape.default_header_lines(), 2);
        assert_eq!(
            serde_json::to_string(&PartOfSpeech::Onomatopoeia).unwrap(),
            "\"onomatopoeia\""
        );
    }
}
