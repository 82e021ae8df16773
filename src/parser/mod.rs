//! Parser for Routledge-style frequency dictionaries.
//!
//! Each parse is a pure function of its input text. Lines are classified
//! into entry spans, every field is normalized, and table-wide invariants are
//! checked before the table is returned. A single malformed record fails the
//! whole parse.

pub mod assembler;
pub mod characters;
pub mod classifier;
pub mod decoration;
pub mod error;
pub mod example;
pub mod metrics;
pub mod pos;
pub mod script;
pub mod validator;

pub use classifier::{LineClassifier, LineKind};
pub use decoration::{strip, Decoration};
pub use error::{FormatError, ParseError, SplitError, UnknownCodeError};
pub use example::{split_example, split_example_with};
pub use metrics::decode_metrics;
pub use pos::{canonicalize, PosTable};
pub use script::{ScriptProfile, CHINESE_ENGLISH};

use crate::domain::model::{CharacterEntry, LexiconShape, ParsedLexicon, Table};

/// 解析選項：檔案格式與需略過的標頭行數
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    pub shape: LexiconShape,
    pub header_lines: usize,
}

impl ParseOptions {
    pub fn new(shape: LexiconShape) -> Self {
        Self {
            shape,
            header_lines: shape.default_header_lines(),
        }
    }

    pub fn with_header_lines(mut self, header_lines: usize) -> Self {
        self.header_lines = header_lines;
        self
    }

    /// 語言對的文字系統；同為拉丁字母的德英語對不做互斥檢查
    pub fn script(&self) -> Option<&'static ScriptProfile> {
        match self.shape {
            LexiconShape::Chinese | LexiconShape::ChineseCharacters => Some(&CHINESE_ENGLISH),
            LexiconShape::German => None,
        }
    }
}

pub fn parse_chinese(text: &str) -> Result<Table, ParseError> {
    parse_words(text, &ParseOptions::new(LexiconShape::Chinese))
}

pub fn parse_german(text: &str) -> Result<Table, ParseError> {
    parse_words(text, &ParseOptions::new(LexiconShape::German))
}

pub fn parse_chinese_characters(text: &str) -> Result<Vec<CharacterEntry>, ParseError> {
    let options = ParseOptions::new(LexiconShape::ChineseCharacters);
    characters::character_entries(assembler::raw_lines(text, options.header_lines))
}

/// Parses any supported shape.
pub fn parse_with(text: &str, options: &ParseOptions) -> Result<ParsedLexicon, ParseError> {
    match options.shape {
        LexiconShape::Chinese | LexiconShape::German => {
            parse_words(text, options).map(ParsedLexicon::Words)
        }
        LexiconShape::ChineseCharacters => {
            characters::character_entries(assembler::raw_lines(text, options.header_lines))
                .map(ParsedLexicon::Characters)
        }
    }
}

fn parse_words(text: &str, options: &ParseOptions) -> Result<Table, ParseError> {
    let classifier = LineClassifier::for_shape(options.shape).ok_or_else(|| {
        ParseError::malformed(0, format!("{} is not a word list", options.shape))
    })?;

    let spans = assembler::group_spans(assembler::raw_lines(text, options.header_lines), classifier)?;
    let entries = assembler::assemble(options.shape, spans)?;
    validator::validate_entries(&entries, options.script())?;

    tracing::debug!("parsed {} {} entries", entries.len(), options.shape);
    Ok(Table::new(entries))
}
