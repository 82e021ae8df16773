//! 中文字頻表：每行一個漢字，後接收錄此字的高頻詞與其詞頻排名。

use crate::domain::model::{CharacterEntry, CharacterHeadword};
use crate::parser::assembler::{parse_level, RawLine};
use crate::parser::decoration::{strip, strip_optional, Decoration};
use crate::parser::error::{FormatError, ParseError};
use crate::parser::script::{ScriptProfile, CHINESE_ENGLISH};

pub(crate) fn character_entries<'a>(
    lines: impl IntoIterator<Item = RawLine<'a>>,
) -> Result<Vec<CharacterEntry>, ParseError> {
    let mut entries: Vec<CharacterEntry> = Vec::new();

    for line in lines {
        let entry = character_entry(line)?;
        if let Some(previous) = entries.last() {
            if entry.rank <= previous.rank {
                return Err(ParseError::validation(
                    entry.rank,
                    "rank",
                    format!("rank does not increase after {}", previous.rank),
                ));
            }
        }
        entries.push(entry);
    }

    tracing::debug!("parsed {} character entries", entries.len());
    Ok(entries)
}

fn character_entry(line: RawLine<'_>) -> Result<CharacterEntry, ParseError> {
    let fields: Vec<&str> = line.text.split('\t').collect();
    if fields.len() < 4 {
        return Err(ParseError::malformed(
            line.number,
            format!("expected at least 4 tab-separated fields, found {}", fields.len()),
        ));
    }

    let rank: u32 = fields[0].trim().parse().map_err(|_| {
        ParseError::malformed(line.number, format!("'{}' is not a rank", fields[0].trim()))
    })?;
    let character = fields[1].trim();
    if character.is_empty() {
        return Err(ParseError::validation(rank, "character", "empty character"));
    }

    let level_tag = match fields.get(4) {
        Some(raw) => parse_level(raw).map_err(|e| e.at(line.number))?,
        None => None,
    };
    let headwords = fields
        .iter()
        .skip(5)
        .map(|token| token.trim())
        .filter(|token| !token.is_empty())
        .map(|token| parse_headword(token, &CHINESE_ENGLISH).map_err(|e| e.at(line.number)))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(CharacterEntry {
        rank,
        character: character.to_string(),
        character_traditional: strip_optional(fields[2], Decoration::Brackets).map(str::to_string),
        pronunciation: strip(fields[3], Decoration::Slashes).to_string(),
        level_tag,
        headwords,
    })
}

/// 解析 `的1`、`我们42` 這類「詞＋排名」的標記
fn parse_headword(token: &str, profile: &ScriptProfile) -> Result<CharacterHeadword, FormatError> {
    let word = token.trim_end_matches(|c: char| c.is_ascii_digit());
    let digits = &token[word.len()..];
    let well_formed = !word.is_empty()
        && !digits.is_empty()
        && word
            .chars()
            .all(|c| profile.is_source_char(c) || c == '[' || c == ']');
    if !well_formed {
        return Err(FormatError::new(format!(
            "headword token '{}' is not a word followed by its rank",
            token
        )));
    }

    let rank = digits
        .parse()
        .map_err(|_| FormatError::new(format!("headword rank '{}' is out of range", digits)))?;
    Ok(CharacterHeadword {
        word: word.to_string(),
        rank,
    })
}
