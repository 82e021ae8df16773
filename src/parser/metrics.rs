use crate::domain::model::Metrics;
use crate::parser::error::FormatError;

pub const METRICS_DELIMITER: char = '|';

/// 解析 `frequency|dispersion|usage[|register]` 格式的統計欄位
pub fn decode_metrics(field: &str) -> Result<Metrics, FormatError> {
    let parts: Vec<&str> = field.trim().split(METRICS_DELIMITER).collect();
    let (frequency, dispersion, usage, register) = match parts.as_slice() {
        &[frequency, dispersion, usage] => (frequency, dispersion, usage, None),
        &[frequency, dispersion, usage, register] => {
            (frequency, dispersion, usage, Some(register))
        }
        other => {
            return Err(FormatError::new(format!(
                "expected 3 or 4 '{}'-delimited metrics in '{}', found {}",
                METRICS_DELIMITER,
                field.trim(),
                other.len()
            )))
        }
    };

    Ok(Metrics {
        normalized_frequency: parse_metric("normalized_frequency", frequency)?,
        dispersion_index: parse_metric("dispersion_index", dispersion)?,
        usage_rate: parse_metric("usage_rate", usage)?,
        register_code: register
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string),
    })
}

fn parse_metric(name: &str, raw: &str) -> Result<f64, FormatError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| FormatError::new(format!("{} '{}' is not a number", name, raw.trim())))?;
    // f64 的 parse 接受 "inf" 與 "NaN"
    if !value.is_finite() || value < 0.0 {
        return Err(FormatError::new(format!(
            "{} '{}' is not a finite non-negative number",
            name,
            raw.trim()
        )));
    }
    Ok(value)
}
