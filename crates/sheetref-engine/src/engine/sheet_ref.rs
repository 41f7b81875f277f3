//! Sheet references: the part of an address before the `!`.

use std::fmt;

/// How an address names its sheet.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub enum SheetRef {
    /// `#N`: the Nth sheet (1-based) in fetch-time order.
    Ordinal(usize),
    /// A literal sheet title.
    Title(String),
    /// A numeric sheet id, as handed over by API callers.
    Id(i64),
    /// No sheet given; the first sheet is used.
    Default,
}

impl SheetRef {
    /// Interpret the textual sheet part of an address.
    ///
    /// `#N` becomes [`SheetRef::Ordinal`], an empty or missing part becomes
    /// [`SheetRef::Default`], and anything else is a title. Digits alone are
    /// still a title (`"2021"` is a common tab name); ids only enter through
    /// [`SheetRef::Id`] or `From<i64>`.
    pub fn parse(text: Option<&str>) -> SheetRef {
        let Some(text) = text else {
            return SheetRef::Default;
        };
        if text.is_empty() {
            return SheetRef::Default;
        }
        if let Some(digits) = text.strip_prefix('#')
            && !digits.is_empty()
            && digits.bytes().all(|b| b.is_ascii_digit())
            && let Ok(n) = digits.parse::<usize>()
        {
            return SheetRef::Ordinal(n);
        }
        SheetRef::Title(text.to_string())
    }

    pub fn is_default(&self) -> bool {
        matches!(self, SheetRef::Default)
    }
}

impl From<i64> for SheetRef {
    fn from(id: i64) -> Self {
        SheetRef::Id(id)
    }
}

impl From<&str> for SheetRef {
    fn from(text: &str) -> Self {
        SheetRef::parse(Some(text))
    }
}

impl From<String> for SheetRef {
    fn from(text: String) -> Self {
        SheetRef::parse(Some(&text))
    }
}

impl fmt::Display for SheetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SheetRef::Ordinal(n) => write!(f, "#{}", n),
            SheetRef::Title(title) => write!(f, "{}", title),
            SheetRef::Id(id) => write!(f, "{}", id),
            SheetRef::Default => write!(f, "(default)"),
        }
    }
}

/// Quote a sheet title for use in an A1 address when it needs it.
///
/// Titles made only of letters, digits and underscores are left alone;
/// anything else is wrapped in single quotes with embedded quotes doubled.
pub fn quote_title(title: &str) -> String {
    let plain = !title.is_empty()
        && title
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_');
    if plain {
        title.to_string()
    } else {
        format!("'{}'", title.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ordinal() {
        assert_eq!(SheetRef::parse(Some("#1")), SheetRef::Ordinal(1));
        assert_eq!(SheetRef::parse(Some("#12")), SheetRef::Ordinal(12));
    }

    #[test]
    fn test_parse_default() {
        assert_eq!(SheetRef::parse(None), SheetRef::Default);
        assert_eq!(SheetRef::parse(Some("")), SheetRef::Default);
    }

    #[test]
    fn test_parse_title() {
        assert_eq!(
            SheetRef::parse(Some("Sheet1")),
            SheetRef::Title("Sheet1".to_string())
        );
        assert_eq!(
            SheetRef::parse(Some("2021")),
            SheetRef::Title("2021".to_string())
        );
        assert_eq!(SheetRef::parse(Some("#")), SheetRef::Title("#".to_string()));
        assert_eq!(
            SheetRef::parse(Some("#2b")),
            SheetRef::Title("#2b".to_string())
        );
    }

    #[test]
    fn test_id_from_integer() {
        assert_eq!(SheetRef::from(42), SheetRef::Id(42));
    }

    #[test]
    fn test_quote_title() {
        assert_eq!(quote_title("Sheet1"), "Sheet1");
        assert_eq!(quote_title("My Sheet"), "'My Sheet'");
        assert_eq!(quote_title("Bob's"), "'Bob''s'");
    }
}
