//! Splits a field holding a source-script sentence followed by its
//! target-script translation.
//!
//! The two halves are not reliably delimited: the separating space is
//! optional, the source sentence may contain spaces of its own and may end
//! with a closing quote, and the translation may open with a quote. The split
//! is a greedy longest match:
//!
//! ```text
//! source  := (source char | source punctuation)+ closing-quote?
//! field   := source " "? opening-quote? target-letter rest
//! ```
//!
//! Source text never contains target-script letters, so every candidate
//! boundary lies before the first target letter, and the longest valid
//! prefix is found by walking back from there.

use crate::parser::error::SplitError;
use crate::parser::script::{ScriptProfile, CHINESE_ENGLISH};

/// 以中英文字元表切分例句
pub fn split_example(field: &str) -> Result<(&str, &str), SplitError> {
    split_example_with(field, &CHINESE_ENGLISH)
}

pub fn split_example_with<'a>(
    field: &'a str,
    profile: &ScriptProfile,
) -> Result<(&'a str, &'a str), SplitError> {
    let field = field.trim();

    // 第一個非來源側字元之前的區段即為最長可能前綴
    let scan_end = field
        .char_indices()
        .find(|&(_, c)| !profile.is_source_side(c))
        .map(|(index, _)| index)
        .ok_or_else(|| SplitError::new(field, "no target-script text"))?;

    if !profile.contains_source_char(&field[..scan_end]) {
        return Err(SplitError::new(field, "no source-script text before the translation"));
    }

    let candidates = field[..scan_end]
        .char_indices()
        .map(|(index, c)| index + c.len_utf8())
        .rev();

    for end in candidates {
        let source = &field[..end];
        if !is_source_end(source, profile) {
            continue;
        }
        if let Some(target) = target_start(&field[end..], profile) {
            return Ok((source.trim(), target.trim()));
        }
    }

    Err(SplitError::new(field, "no boundary before a target-script letter"))
}

/// 前綴須以漢字或中文標點結尾，其後至多一個結尾引號
fn is_source_end(source: &str, profile: &ScriptProfile) -> bool {
    let mut chars = source.chars().rev();
    match chars.next() {
        None => false,
        Some(c) if c == profile.closing_quote => {
            chars.next().is_some_and(|prev| profile.ends_source_text(prev))
        }
        Some(c) => profile.ends_source_text(c),
    }
}

/// Consumes at most one space and at most one opening quote; the remainder
/// must begin with a target letter. The quote stays with the translation.
fn target_start<'a>(rest: &'a str, profile: &ScriptProfile) -> Option<&'a str> {
    let rest = match rest.chars().next() {
        Some(c) if c.is_whitespace() => &rest[c.len_utf8()..],
        _ => rest,
    };
    let body = rest.strip_prefix(profile.opening_quote).unwrap_or(rest);
    match body.chars().next() {
        Some(c) if profile.is_target_letter(c) => Some(rest),
        _ => None,
    }
}
