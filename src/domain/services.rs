use crate::domain::model::{CharacterEntry, Entry, ParsedLexicon, SourceText, Table, TransformResult};
use crate::parser::{self, ParseOptions};
use crate::utils::error::{EtlError, Result};
use serde::Serialize;

/// 每組例句一列；德文詞條可能有多列共用同一排名
#[derive(Debug, Serialize)]
struct WordRow<'a> {
    rank: u32,
    sense: usize,
    headword: &'a str,
    headword_traditional: Option<&'a str>,
    pronunciation: &'a str,
    level_tag: Option<u8>,
    part_of_speech: &'static str,
    gloss: &'a str,
    example_source_language_text: &'a str,
    example_target_language_text: &'a str,
    normalized_frequency: f64,
    dispersion_index: f64,
    usage_rate: f64,
    register_code: Option<&'a str>,
}

#[derive(Debug, Serialize)]
struct CharacterRow<'a> {
    rank: u32,
    character: &'a str,
    character_traditional: Option<&'a str>,
    pronunciation: &'a str,
    level_tag: Option<u8>,
    headwords: String,
}

fn word_rows(entry: &Entry) -> impl Iterator<Item = WordRow<'_>> {
    entry
        .examples
        .iter()
        .enumerate()
        .map(move |(index, example)| WordRow {
            rank: entry.rank,
            sense: index + 1,
            headword: &entry.headword,
            headword_traditional: entry.headword_traditional.as_deref(),
            pronunciation: &entry.pronunciation,
            level_tag: entry.level_tag,
            part_of_speech: entry.part_of_speech.label(),
            gloss: &entry.gloss,
            example_source_language_text: &example.source_language_text,
            example_target_language_text: &example.target_language_text,
            normalized_frequency: entry.metrics.normalized_frequency,
            dispersion_index: entry.metrics.dispersion_index,
            usage_rate: entry.metrics.usage_rate,
            register_code: entry.metrics.register_code.as_deref(),
        })
}

fn character_row(entry: &CharacterEntry) -> CharacterRow<'_> {
    let headwords = entry
        .headwords
        .iter()
        .map(|headword| format!("{}{}", headword.word, headword.rank))
        .collect::<Vec<_>>()
        .join(" ");
    CharacterRow {
        rank: entry.rank,
        character: &entry.character,
        character_traditional: entry.character_traditional.as_deref(),
        pronunciation: &entry.pronunciation,
        level_tag: entry.level_tag,
        headwords,
    }
}

/// 以指定分隔符輸出表格（`,` 為 CSV，`\t` 為 TSV）
pub fn render_delimited(lexicon: &ParsedLexicon, delimiter: u8) -> Result<String> {
    let mut writer = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());

    match lexicon {
        ParsedLexicon::Words(table) => {
            for row in table.iter().flat_map(word_rows) {
                writer.serialize(row)?;
            }
        }
        ParsedLexicon::Characters(entries) => {
            for row in entries.iter().map(character_row) {
                writer.serialize(row)?;
            }
        }
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| EtlError::IoError(e.into_error()))?;
    String::from_utf8(bytes).map_err(|e| EtlError::ProcessingError {
        message: format!("rendered table is not UTF-8: {}", e),
    })
}

pub fn render_json(lexicon: &ParsedLexicon) -> Result<String> {
    Ok(serde_json::to_string_pretty(lexicon)?)
}

/// 解析原始文字並產生所有輸出格式
pub fn transform_source(source: SourceText, header_lines: Option<usize>) -> Result<TransformResult> {
    let mut options = ParseOptions::new(source.shape);
    if let Some(header_lines) = header_lines {
        options = options.with_header_lines(header_lines);
    }

    let lexicon = parser::parse_with(&source.text, &options)?;
    tracing::debug!("{}: {} entries parsed", source.name, lexicon.len());

    Ok(TransformResult {
        csv_output: render_delimited(&lexicon, b',')?,
        tsv_output: render_delimited(&lexicon, b'\t')?,
        json_output: render_json(&lexicon)?,
        name: source.name,
        lexicon,
    })
}

/// 前 n 筆詞條的單行摘要
pub fn preview_lines(lexicon: &ParsedLexicon, count: usize) -> Vec<String> {
    match lexicon {
        ParsedLexicon::Words(table) => preview_words(table, count),
        ParsedLexicon::Characters(entries) => entries
            .iter()
            .take(count)
            .map(|entry| {
                let row = character_row(entry);
                format!(
                    "{:>5}  {} /{}/  {}",
                    row.rank, row.character, row.pronunciation, row.headwords
                )
            })
            .collect(),
    }
}

fn preview_words(table: &Table, count: usize) -> Vec<String> {
    table
        .head(count)
        .iter()
        .map(|entry| {
            format!(
                "{:>5}  {} /{}/ [{}] {} | {} | {}",
                entry.rank,
                entry.headword,
                entry.pronunciation,
                entry.part_of_speech,
                entry.gloss,
                entry.example_source_language_text(),
                entry.example_target_language_text()
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{CharacterHeadword, Example, LexiconShape, Metrics, PartOfSpeech};

    fn entry(rank: u32, examples: Vec<Example>) -> Entry {
        Entry {
            rank,
            headword: "的".to_string(),
            headword_traditional: None,
            pronunciation: "de".to_string(),
            level_tag: Some(1),
            part_of_speech: PartOfSpeech::Particle,
            gloss: "of".to_string(),
            examples,
            metrics: Metrics {
                normalized_frequency: 4.5,
                dispersion_index: 0.9,
                usage_rate: 12.0,
                register_code: None,
            },
            line: 5,
        }
    }

    #[test]
    fn test_csv_has_one_row_per_example() {
        let lexicon = ParsedLexicon::Words(Table::new(vec![entry(
            1,
            vec![
                Example::new("她的书。", "Her book."),
                Example::new("我的朋友。", "My friend."),
            ],
        )]));

        let csv = render_delimited(&lexicon, b',').unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("rank,sense,headword,"));
        assert!(lines[1].starts_with("1,1,的,"));
        assert!(lines[2].starts_with("1,2,的,"));
        assert!(lines[2].contains("My friend."));
    }

    #[test]
    fn test_tsv_uses_tabs() {
        let lexicon = ParsedLexicon::Words(Table::new(vec![entry(
            1,
            vec![Example::new("她的书。", "Her book.")],
        )]));
        let tsv = render_delimited(&lexicon, b'\t').unwrap();
        let second = tsv.lines().nth(1).unwrap();
        assert_eq!(second.split('\t').nth(8), Some("她的书。"));
    }

    #[test]
    fn test_character_rows_join_headwords() {
        let lexicon = ParsedLexicon::Characters(vec![CharacterEntry {
            rank: 1,
            character: "的".to_string(),
            character_traditional: None,
            pronunciation: "de".to_string(),
            level_tag: Some(1),
            headwords: vec![
                CharacterHeadword { word: "的".to_string(), rank: 1 },
                CharacterHeadword { word: "目的".to_string(), rank: 980 },
            ],
        }]);
        let csv = render_delimited(&lexicon, b',').unwrap();
        assert!(csv.lines().nth(1).unwrap().ends_with("的1 目的980"));
        assert_eq!(preview_lines(&lexicon, 5).len(), 1);
    }

    #[test]
    fn test_json_keeps_nested_examples() {
        let lexicon = ParsedLexicon::Words(Table::new(vec![entry(
            1,
            vec![Example::new("她的书。", "Her book.")],
        )]));
        let json: serde_json::Value = serde_json::from_str(&render_json(&lexicon).unwrap()).unwrap();
        assert_eq!(json["kind"], "words");
        assert_eq!(
            json["entries"][0]["examples"][0]["target_language_text"],
            "Her book."
        );
    }

    #[test]
    fn test_transform_source_surfaces_parse_errors() {
        let source = SourceText {
            name: "broken".to_string(),
            shape: LexiconShape::German,
            text: "\tcontinuation without header\n".to_string(),
        };
        let err = transform_source(source, None).unwrap_err();
        assert!(matches!(err, EtlError::ParseError(_)));
    }

    #[test]
    fn test_preview_is_limited() {
        let table = Table::new(vec![
            entry(1, vec![Example::new("她的书。", "Her book.")]),
            entry(2, vec![Example::new("她的书。", "Her book.")]),
        ]);
        let preview = preview_lines(&ParsedLexicon::Words(table), 1);
        assert_eq!(preview.len(), 1);
        assert!(preview[0].contains("[particle]"));
        assert!(preview[0].contains("Her book."));
    }
}
