pub mod config;
pub mod core;
pub mod domain;
pub mod parser;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, toml_config::TomlConfig};

pub use core::{
    etl::{EtlEngine, EtlReport},
    pipeline::LexiconPipeline,
};
pub use domain::model::{
    CharacterEntry, Entry, Example, LexiconShape, Metrics, OutputFormat, ParsedLexicon,
    PartOfSpeech, Table,
};
pub use parser::{
    parse_chinese, parse_chinese_characters, parse_german, parse_with, ParseError, ParseOptions,
};
pub use utils::error::{EtlError, Result};
