use thiserror::Error;

/// 詞頻表解析錯誤。每個錯誤都帶有行號或詞條排名。
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: malformed line: {reason}")]
    MalformedLine { line: usize, reason: String },

    #[error("line {line}: unknown part-of-speech code '{code}'")]
    UnknownPartOfSpeechCode { line: usize, code: String },

    #[error("line {line}: {error}")]
    Split {
        line: usize,
        #[source]
        error: SplitError,
    },

    #[error("line {line}: {error}")]
    Format {
        line: usize,
        #[source]
        error: FormatError,
    },

    #[error("entry {rank}: invalid {field}: {reason}")]
    Validation {
        rank: u32,
        field: &'static str,
        reason: String,
    },
}

impl ParseError {
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        ParseError::MalformedLine {
            line,
            reason: reason.into(),
        }
    }

    pub(crate) fn validation(rank: u32, field: &'static str, reason: impl Into<String>) -> Self {
        ParseError::Validation {
            rank,
            field,
            reason: reason.into(),
        }
    }

    /// 來源行號（驗證錯誤沒有行號）
    pub fn line(&self) -> Option<usize> {
        match self {
            ParseError::MalformedLine { line, .. }
            | ParseError::UnknownPartOfSpeechCode { line, .. }
            | ParseError::Split { line, .. }
            | ParseError::Format { line, .. } => Some(*line),
            ParseError::Validation { .. } => None,
        }
    }

    pub fn rank(&self) -> Option<u32> {
        match self {
            ParseError::Validation { rank, .. } => Some(*rank),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown part-of-speech code '{code}'")]
pub struct UnknownCodeError {
    pub code: String,
}

impl UnknownCodeError {
    pub(crate) fn at(self, line: usize) -> ParseError {
        ParseError::UnknownPartOfSpeechCode {
            line,
            code: self.code,
        }
    }
}

/// The bilingual example field has no valid source/target boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("cannot split bilingual example '{field}': {reason}")]
pub struct SplitError {
    pub field: String,
    pub reason: &'static str,
}

impl SplitError {
    pub(crate) fn new(field: &str, reason: &'static str) -> Self {
        Self {
            field: field.to_string(),
            reason,
        }
    }

    pub(crate) fn at(self, line: usize) -> ParseError {
        ParseError::Split { line, error: self }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason}")]
pub struct FormatError {
    pub reason: String,
}

impl FormatError {
    pub(crate) fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub(crate) fn at(self, line: usize) -> ParseError {
        ParseError::Format { line, error: self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_location() {
        let err = FormatError::new("expected 3 or 4 metrics, found 2").at(12);
        assert_eq!(err.line(), Some(12));
        assert_eq!(
            err.to_string(),
            "line 12: expected 3 or 4 metrics, found 2"
        );

        let err = ParseError::validation(7, "example_target_language_text", "empty");
        assert_eq!(err.rank(), Some(7));
        assert_eq!(err.line(), None);
        assert_eq!(
            err.to_string(),
            "entry 7: invalid example_target_language_text: empty"
        );
    }
}
