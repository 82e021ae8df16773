use crate::domain::model::LexiconShape;
use crate::parser::pos::PosTable;
use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    StartsEntry,
    Continuation,
}

/// 判斷一行是否為詞條標頭。
///
/// 標頭格式：排名、詞目、（若干欄）、詞性，以 tab 分隔，且詞性屬於該格式的詞性表。
/// 不符合者一律視為續行。分類本身不保存狀態。
#[derive(Debug)]
pub struct LineClassifier {
    header: Regex,
    code_field: Regex,
}

static CHINESE: LazyLock<LineClassifier> =
    LazyLock::new(|| LineClassifier::build(3, PosTable::Chinese));
static GERMAN: LazyLock<LineClassifier> =
    LazyLock::new(|| LineClassifier::build(0, PosTable::German));

impl LineClassifier {
    /// Classifier for a word-list shape, or `None` for shapes without
    /// entry headers.
    pub fn for_shape(shape: LexiconShape) -> Option<&'static LineClassifier> {
        match shape {
            LexiconShape::Chinese => Some(&*CHINESE),
            LexiconShape::German => Some(&*GERMAN),
            LexiconShape::ChineseCharacters => None,
        }
    }

    fn build(columns_before_pos: usize, table: PosTable) -> Self {
        let vocabulary = table
            .codes()
            .map(regex::escape)
            .collect::<Vec<_>>()
            .join("|");
        let gap = r"[^\t]*\t".repeat(columns_before_pos);

        let header = format!(r"^ *\d+\t[^\t]+\t{}(?:{}) *(?:\t|$)", gap, vocabulary);
        let code_field = format!(r"^ *\d+\t[^\t]+\t{}([^\t]+?) *(?:\t|$)", gap);
        Self {
            header: Regex::new(&header).expect("entry header pattern is valid"),
            code_field: Regex::new(&code_field).expect("entry code_field pattern is valid"),
        }
    }

    pub fn classify(&self, line: &str) -> LineKind {
        if self.header.is_match(line) {
            LineKind::StartsEntry
        } else {
            LineKind::Continuation
        }
    }

    /// For a line shaped like an entry header whose part-of-speech token is
    /// outside the vocabulary, returns that token.
    pub fn unknown_header_code<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.header.is_match(line) {
            return None;
        }
        self.code_field
            .captures(line)
            .and_then(|caps| caps.get(1))
            .map(|code| code.as_str().trim())
    }
}
