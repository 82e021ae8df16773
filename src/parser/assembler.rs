use crate::domain::model::{Entry, Example, LexiconShape, Metrics};
use crate::parser::classifier::{LineClassifier, LineKind};
use crate::parser::decoration::{strip, strip_optional, Decoration};
use crate::parser::error::{FormatError, ParseError};
use crate::parser::example::split_example;
use crate::parser::metrics::{decode_metrics, METRICS_DELIMITER};
use crate::parser::pos::PosTable;

const CHINESE_FIELD_COUNT: usize = 9;

/// One physical input line with its 1-based line number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawLine<'a> {
    pub number: usize,
    pub text: &'a str,
}

/// 一個詞條的標頭行及其後所有續行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySpan<'a> {
    pub header: RawLine<'a>,
    pub continuations: Vec<RawLine<'a>>,
}

impl<'a> EntrySpan<'a> {
    fn open(header: RawLine<'a>) -> Self {
        Self {
            header,
            continuations: Vec::new(),
        }
    }
}

/// 略過標頭行與空白行
pub fn raw_lines(text: &str, header_lines: usize) -> impl Iterator<Item = RawLine<'_>> {
    text.lines()
        .enumerate()
        .skip(header_lines)
        .map(|(index, text)| RawLine {
            number: index + 1,
            text,
        })
        .filter(|line| !line.text.trim().is_empty())
}

/// Groups classified lines into entry spans.
///
/// A header-shaped line with an unknown part-of-speech code is reported as
/// such rather than being folded into the previous entry.
pub fn group_spans<'a>(
    lines: impl IntoIterator<Item = RawLine<'a>>,
    classifier: &LineClassifier,
) -> Result<Vec<EntrySpan<'a>>, ParseError> {
    let mut spans = Vec::new();
    let mut current: Option<EntrySpan<'a>> = None;

    for line in lines {
        match classifier.classify(line.text) {
            LineKind::StartsEntry => {
                if let Some(span) = current.replace(EntrySpan::open(line)) {
                    spans.push(span);
                }
            }
            LineKind::Continuation => {
                if let Some(code) = classifier.unknown_header_code(line.text) {
                    return Err(ParseError::UnknownPartOfSpeechCode {
                        line: line.number,
                        code: code.to_string(),
                    });
                }
                match current.as_mut() {
                    Some(span) => span.continuations.push(line),
                    None => {
                        return Err(ParseError::malformed(
                            line.number,
                            "continuation line before any entry",
                        ))
                    }
                }
            }
        }
    }

    spans.extend(current);
    Ok(spans)
}

/// 將分組後的詞條轉為 `Entry`
pub fn assemble(shape: LexiconShape, spans: Vec<EntrySpan<'_>>) -> Result<Vec<Entry>, ParseError> {
    match shape {
        LexiconShape::Chinese => spans
            .iter()
            .enumerate()
            .map(|(index, span)| chinese_entry(position_rank(index, span)?, span))
            .collect(),
        LexiconShape::German => spans.iter().map(german_entry).collect(),
        LexiconShape::ChineseCharacters => Err(ParseError::malformed(
            spans.first().map_or(0, |span| span.header.number),
            "character lists have no entry spans",
        )),
    }
}

fn position_rank(index: usize, span: &EntrySpan<'_>) -> Result<u32, ParseError> {
    u32::try_from(index + 1)
        .map_err(|_| FormatError::new("too many entries").at(span.header.number))
}

fn chinese_entry(rank: u32, span: &EntrySpan<'_>) -> Result<Entry, ParseError> {
    if let Some(extra) = span.continuations.first() {
        return Err(ParseError::malformed(
            extra.number,
            "the Chinese word list has no continuation lines",
        ));
    }

    let line = span.header.number;
    let fields: Vec<&str> = span.header.text.split('\t').collect();
    let &[_disk_rank, simplified, traditional, pinyin, level, pos, gloss, example, metrics] =
        fields.as_slice()
    else {
        return Err(ParseError::malformed(
            line,
            format!(
                "expected {} tab-separated fields, found {}",
                CHINESE_FIELD_COUNT,
                fields.len()
            ),
        ));
    };

    let part_of_speech = PosTable::Chinese
        .canonicalize(pos)
        .map_err(|e| e.at(line))?;
    let (source, target) = split_example(example).map_err(|e| e.at(line))?;
    let metrics = decode_metrics(metrics).map_err(|e| e.at(line))?;

    Ok(Entry {
        rank,
        headword: simplified.trim().to_string(),
        headword_traditional: strip_optional(traditional, Decoration::Brackets).map(str::to_string),
        pronunciation: strip(pinyin, Decoration::Slashes).to_string(),
        level_tag: parse_level(level).map_err(|e| e.at(line))?,
        part_of_speech,
        gloss: gloss.trim().to_string(),
        examples: vec![Example::new(source, target)],
        metrics,
        line,
    })
}

/// `(N)` 形式的等級標記，空白表示沒有等級
pub(crate) fn parse_level(raw: &str) -> Result<Option<u8>, FormatError> {
    strip_optional(raw, Decoration::Parens)
        .map(|level| {
            level
                .parse::<u8>()
                .map_err(|_| FormatError::new(format!("level tag '{}' is not a small integer", raw.trim())))
        })
        .transpose()
}

/// Columns of one German line after the metrics tail is split off.
struct GermanRow<'a> {
    pair: Option<(&'a str, &'a str)>,
    metrics: Option<&'a str>,
}

impl<'a> GermanRow<'a> {
    fn read(text: &'a str) -> Self {
        let fields: Vec<&'a str> = text.split('\t').collect();
        let (body, metrics) = match fields.split_last() {
            Some((last, rest)) if last.trim_start().starts_with(METRICS_DELIMITER) => {
                (rest, Some(last.trim_start()[METRICS_DELIMITER.len_utf8()..].trim()))
            }
            _ => (fields.as_slice(), None),
        };
        let sample = body.get(4).map_or("", |field| field.trim());
        let translation = body.get(5).map_or("", |field| field.trim());
        let pair = if sample.is_empty() && translation.is_empty() {
            None
        } else {
            Some((sample, translation))
        };
        Self { pair, metrics }
    }
}

fn german_entry(span: &EntrySpan<'_>) -> Result<Entry, ParseError> {
    let line = span.header.number;
    let fields: Vec<&str> = span.header.text.split('\t').collect();
    let rank = fields[0]
        .trim()
        .parse::<u32>()
        .map_err(|_| FormatError::new(format!("rank '{}' is out of range", fields[0].trim())).at(line))?;
    let headword = fields.get(1).map_or("", |field| field.trim());
    let part_of_speech = PosTable::German
        .canonicalize(fields.get(2).copied().unwrap_or_default())
        .map_err(|e| e.at(line))?;
    let gloss = fields
        .get(3)
        .map(|field| field.trim())
        .filter(|field| !field.starts_with(METRICS_DELIMITER))
        .unwrap_or_default();

    let mut examples = Vec::new();
    let mut metrics: Option<Metrics> = None;

    let rows = std::iter::once((span.header, GermanRow::read(span.header.text))).chain(
        span.continuations
            .iter()
            .map(|continuation| (*continuation, GermanRow::read(continuation.text))),
    );

    for (raw, row) in rows {
        if raw.number != line && row.pair.is_none() && row.metrics.is_none() {
            return Err(ParseError::malformed(
                raw.number,
                "continuation line has neither an example sentence nor a metrics tail",
            ));
        }
        if let Some((sample, translation)) = row.pair {
            examples.push(Example::new(sample, translation));
        }
        // 空的統計欄位不覆蓋先前取得的值
        if let Some(payload) = row.metrics.filter(|payload| !payload.is_empty()) {
            metrics = Some(decode_metrics(payload).map_err(|e| e.at(raw.number))?);
        }
    }

    let metrics = metrics
        .ok_or_else(|| ParseError::validation(rank, "metrics", "entry has no metrics tail"))?;

    Ok(Entry {
        rank,
        headword: headword.to_string(),
        headword_traditional: None,
        pronunciation: String::new(),
        level_tag: None,
        part_of_speech,
        gloss: gloss.to_string(),
        examples,
        metrics,
        line,
    })
}
