use crate::domain::model::{Entry, Metrics};
use crate::parser::error::ParseError;
use crate::parser::script::ScriptProfile;

/// 檢查整張表的不變量，任何違反都直接回報，不做修正。
///
/// `script` 為 `None` 時（例如德英語對，兩者同為拉丁字母）略過文字系統互斥檢查。
pub fn validate_entries(entries: &[Entry], script: Option<&ScriptProfile>) -> Result<(), ParseError> {
    let mut previous_rank: Option<u32> = None;

    for entry in entries {
        let rank = entry.rank;
        if rank == 0 {
            return Err(ParseError::validation(rank, "rank", "rank must be positive"));
        }
        if let Some(previous) = previous_rank {
            if rank <= previous {
                return Err(ParseError::validation(
                    rank,
                    "rank",
                    format!("rank does not increase after {}", previous),
                ));
            }
        }
        previous_rank = Some(rank);

        if entry.headword.trim().is_empty() {
            return Err(ParseError::validation(rank, "headword", "empty headword"));
        }

        validate_examples(entry, script)?;
        validate_metrics(rank, &entry.metrics)?;
    }

    Ok(())
}

fn validate_examples(entry: &Entry, script: Option<&ScriptProfile>) -> Result<(), ParseError> {
    let rank = entry.rank;
    if entry.examples.is_empty() {
        return Err(ParseError::validation(rank, "examples", "no example sentence"));
    }

    for example in &entry.examples {
        let source = example.source_language_text.as_str();
        let target = example.target_language_text.as_str();
        if source.trim().is_empty() {
            return Err(ParseError::validation(
                rank,
                "example_source_language_text",
                format!("empty example sentence (translation '{}')", target),
            ));
        }
        if target.trim().is_empty() {
            return Err(ParseError::validation(
                rank,
                "example_target_language_text",
                format!("empty translation of '{}'", source),
            ));
        }
        if let Some(script) = script {
            if script.contains_target_letter(source) {
                return Err(ParseError::validation(
                    rank,
                    "example_source_language_text",
                    format!("'{}' contains target-script letters", source),
                ));
            }
            if script.contains_source_char(target) {
                return Err(ParseError::validation(
                    rank,
                    "example_target_language_text",
                    format!("'{}' contains source-script characters", target),
                ));
            }
        }
    }

    Ok(())
}

fn validate_metrics(rank: u32, metrics: &Metrics) -> Result<(), ParseError> {
    let fields = [
        ("normalized_frequency", metrics.normalized_frequency),
        ("dispersion_index", metrics.dispersion_index),
        ("usage_rate", metrics.usage_rate),
    ];
    for (field, value) in fields {
        if !value.is_finite() || value < 0.0 {
            return Err(ParseError::validation(
                rank,
                field,
                format!("{} is not a finite non-negative number", value),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Example, PartOfSpeech};
    use crate::parser::script::CHINESE_ENGLISH;

    fn entry(rank: u32, source: &str, target: &str) -> Entry {
        Entry {
            rank,
            headword: "的".to_string(),
            headword_traditional: None,
            pronunciation: "de".to_string(),
            level_tag: None,
            part_of_speech: PartOfSpeech::Particle,
            gloss: "of".to_string(),
            examples: vec![Example::new(source, target)],
            metrics: Metrics {
                normalized_frequency: 1.0,
                dispersion_index: 0.9,
                usage_rate: 0.9,
                register_code: None,
            },
            line: 5,
        }
    }

    fn field_of(err: ParseError) -> &'static str {
        match err {
            ParseError::Validation { field, .. } => field,
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_valid_entries_pass() {
        let entries = [entry(1, "她的书。", "Her book."), entry(2, "我的。", "Mine.")];
        assert!(validate_entries(&entries, Some(&CHINESE_ENGLISH)).is_ok());
    }

    #[test]
    fn test_script_leak_is_rejected() {
        let entries = [entry(1, "我有PC。", "I have a PC.")];
        let err = validate_entries(&entries, Some(&CHINESE_ENGLISH)).unwrap_err();
        assert_eq!(err.rank(), Some(1));
        assert_eq!(field_of(err), "example_source_language_text");

        let entries = [entry(3, "好。", "Good 好.")];
        let err = validate_entries(&entries, Some(&CHINESE_ENGLISH)).unwrap_err();
        assert_eq!(field_of(err), "example_target_language_text");

        // 不檢查文字系統時允許
        assert!(validate_entries(&entries, None).is_ok());
    }

    #[test]
    fn test_empty_example_is_rejected() {
        let entries = [entry(1, "Der Mann.", "")];
        let err = validate_entries(&entries, None).unwrap_err();
        assert_eq!(field_of(err), "example_target_language_text");

        let mut bare = entry(2, "x", "y");
        bare.examples.clear();
        assert_eq!(field_of(validate_entries(&[bare], None).unwrap_err()), "examples");
    }

    #[test]
    fn test_rank_order_is_enforced() {
        let entries = [entry(2, "好。", "Good."), entry(2, "好。", "Good.")];
        assert_eq!(field_of(validate_entries(&entries, None).unwrap_err()), "rank");
        let entries = [entry(0, "好。", "Good.")];
        assert_eq!(field_of(validate_entries(&entries, None).unwrap_err()), "rank");
    }

    #[test]
    fn test_non_finite_metrics_are_rejected() {
        let mut bad = entry(4, "好。", "Good.");
        bad.metrics.usage_rate = f64::NAN;
        assert_eq!(field_of(validate_entries(&[bad], None).unwrap_err()), "usage_rate");
    }
}
