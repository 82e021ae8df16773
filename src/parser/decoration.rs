/// In-band wrappers around optional field values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decoration {
    /// `[...]`, traditional headwords
    Brackets,
    /// `/.../`, pronunciation
    Slashes,
    /// `(...)`, level tags
    Parens,
}

impl Decoration {
    pub const fn delimiters(self) -> (char, char) {
        match self {
            Decoration::Brackets => ('[', ']'),
            Decoration::Slashes => ('/', '/'),
            Decoration::Parens => ('(', ')'),
        }
    }
}

/// 去除欄位外層的裝飾字元。
///
/// 只移除成對的外層裝飾；沒有裝飾的值原樣保留，不會被丟棄。
/// 多層相同裝飾（如 `[[x]]`）會一次全部移除，因此
/// `strip(strip(x, d), d) == strip(x, d)` 恆成立。
pub fn strip(raw: &str, decoration: Decoration) -> &str {
    let (open, close) = decoration.delimiters();
    let mut value = raw.trim();
    while let Some(inner) = value
        .strip_prefix(open)
        .and_then(|rest| rest.strip_suffix(close))
    {
        value = inner.trim();
    }
    value
}

/// `strip`, mapping an empty result to `None`.
pub fn strip_optional(raw: &str, decoration: Decoration) -> Option<&str> {
    Some(strip(raw, decoration)).filter(|value| !value.is_empty())
}
