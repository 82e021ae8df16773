use crate::domain::model::OutputFormat;
use crate::utils::error::{EtlError, Result};
use std::collections::HashSet;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(EtlError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_output_formats(field_name: &str, formats: &[OutputFormat]) -> Result<()> {
    if formats.is_empty() {
        return Err(EtlError::MissingConfigError {
            field: field_name.to_string(),
        });
    }
    Ok(())
}

/// 名稱用於輸出檔名，必須唯一且不含路徑分隔符
pub fn validate_unique_names<'a>(
    field_name: &str,
    names: impl IntoIterator<Item = &'a str>,
) -> Result<()> {
    let mut seen = HashSet::new();
    for name in names {
        validate_non_empty_string(field_name, name)?;
        if name.contains(['/', '\\']) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Name is used as a file name and cannot contain path separators"
                    .to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(EtlError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: name.to_string(),
                reason: "Name is used more than once".to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("input", "data/routledge_chinese_word_frequency.txt").is_ok());
        assert!(validate_path("input", "").is_err());
        assert!(validate_path("input", "  ").is_err());
        assert!(validate_path("input", "a\0b").is_err());
    }

    #[test]
    fn test_validate_output_formats() {
        assert!(validate_output_formats("load.output_formats", &[OutputFormat::Csv]).is_ok());
        assert!(matches!(
            validate_output_formats("load.output_formats", &[]),
            Err(EtlError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_unique_names() {
        assert!(validate_unique_names("sources.name", ["chinese", "german"]).is_ok());
        assert!(validate_unique_names("sources.name", ["chinese", "chinese"]).is_err());
        assert!(validate_unique_names("sources.name", ["a/b"]).is_err());
        assert!(validate_unique_names("sources.name", [""]).is_err());
    }
}
