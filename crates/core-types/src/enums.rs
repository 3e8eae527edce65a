use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The direction of a position.
///
/// Raw input is coerced exactly once through [`Side::parse_lenient`]: anything
/// that case-insensitively equals `short` is `Short`, everything else is `Long`.
/// Surrounding whitespace is not stripped, so `" short"` is `Long`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Long,
    Short,
}

impl Side {
    pub fn parse_lenient(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("short") {
            Side::Short
        } else {
            Side::Long
        }
    }

    /// The canonical lowercase form used in storage and on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Long => "long",
            Side::Short => "short",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Side {
    fn from(raw: &str) -> Self {
        Side::parse_lenient(raw)
    }
}

// Deserialization applies the same coercion as CSV input so callers never see
// an "unknown side" error.
impl<'de> Deserialize<'de> for Side {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Side::parse_lenient(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_is_case_insensitive() {
        assert_eq!(Side::parse_lenient("short"), Side::Short);
        assert_eq!(Side::parse_lenient("SHORT"), Side::Short);
        assert_eq!(Side::parse_lenient("Short"), Side::Short);
    }

    #[test]
    fn anything_else_is_long() {
        assert_eq!(Side::parse_lenient("long"), Side::Long);
        assert_eq!(Side::parse_lenient(""), Side::Long);
        assert_eq!(Side::parse_lenient("sell"), Side::Long);
    }

    #[test]
    fn padded_short_is_long() {
        assert_eq!(Side::parse_lenient(" short"), Side::Long);
        assert_eq!(Side::parse_lenient("short "), Side::Long);
        assert_eq!(Side::parse_lenient("\tSHORT"), Side::Long);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Side::Short).unwrap(), "\"short\"");
        let side: Side = serde_json::from_str("\"SHORT\"").unwrap();
        assert_eq!(side, Side::Short);
        let side: Side = serde_json::from_str("\"buy\"").unwrap();
        assert_eq!(side, Side::Long);
    }
}
