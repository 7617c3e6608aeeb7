//! Literal parsing for expression-vs-literal classification.
//!
//! When a host needs to decide whether typed text is a plain literal of
//! the target type or a real expression, it consults this closed table
//! of parsers keyed by a type tag. There is no reflection and no open
//! dispatch: a type either maps to a tag or literal classification is
//! not attempted for it at all.

/// Tag for the closed set of literal-capable types.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LiteralKind {
    Bool,
    Char,
    String,
    Int,
    Float,
    DateTime,
    TimeSpan,
}

impl LiteralKind {
    /// Map a fully-qualified type name to its literal tag.
    ///
    /// Returns `None` for types that do not support literal
    /// classification (notably `System.Object`), in which case the text
    /// must be treated as an expression.
    pub fn for_type_name(full_name: &str) -> Option<Self> {
        match full_name {
            "System.Boolean" => Some(Self::Bool),
            "System.Char" => Some(Self::Char),
            "System.String" => Some(Self::String),
            "System.Int32" | "System.Int64" | "System.Int16" | "System.Byte" => Some(Self::Int),
            "System.Double" | "System.Single" => Some(Self::Float),
            "System.DateTime" => Some(Self::DateTime),
            "System.TimeSpan" => Some(Self::TimeSpan),
            _ => None,
        }
    }
}

/// A parsed literal value.
#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Bool(bool),
    Char(char),
    String(String),
    Int(i64),
    Float(f64),
    /// Calendar date plus time of day.
    DateTime {
        year: i32,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    },
    TimeSpan(TimeSpanValue),
}

/// A span of time as total seconds (may be negative).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeSpanValue {
    pub total_seconds: i64,
}

/// Try to interpret `text` as a literal of the tagged kind.
///
/// `None` means "not a literal" and the caller falls back to treating
/// the text as a full expression. Booleans are intentionally stricter
/// than the rest: only exact-case `true`/`false` qualify, so that
/// convertible-but-miscased tokens like `True` stay expressions.
pub fn try_parse_literal(kind: LiteralKind, text: &str) -> Option<LiteralValue> {
    match kind {
        LiteralKind::Bool => match text {
            "true" => Some(LiteralValue::Bool(true)),
            "false" => Some(LiteralValue::Bool(false)),
            _ => None,
        },
        LiteralKind::Char => parse_char(text),
        LiteralKind::String => parse_string(text),
        LiteralKind::Int => text.trim().parse::<i64>().ok().map(LiteralValue::Int),
        LiteralKind::Float => text.trim().parse::<f64>().ok().map(LiteralValue::Float),
        LiteralKind::DateTime => parse_date_time(text.trim()),
        LiteralKind::TimeSpan => parse_time_span(text.trim()),
    }
}

/// A char literal must be exactly one character between single quotes.
fn parse_char(text: &str) -> Option<LiteralValue> {
    let inner = text.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    let c = chars.next()?;
    if chars.next().is_some() || c == '\'' {
        return None;
    }
    Some(LiteralValue::Char(c))
}

/// A string literal must begin and end with a double quote, with no
/// interior quote and no backslash anywhere. Anything else is assumed
/// to be an expression.
fn parse_string(text: &str) -> Option<LiteralValue> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    if inner.contains('"') || text.contains('\\') {
        return None;
    }
    Some(LiteralValue::String(inner.to_string()))
}

/// `YYYY-MM-DD`, optionally followed by ` hh:mm` or ` hh:mm:ss`.
fn parse_date_time(text: &str) -> Option<LiteralValue> {
    let (date, time) = match text.split_once(' ') {
        Some((d, t)) => (d, Some(t)),
        None => (text, None),
    };

    let mut parts = date.split('-');
    let year: i32 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }

    let (hour, minute, second) = match time {
        None => (0, 0, 0),
        Some(t) => {
            let mut hms = t.split(':');
            let hour: u8 = hms.next()?.parse().ok()?;
            let minute: u8 = hms.next()?.parse().ok()?;
            let second: u8 = match hms.next() {
                Some(s) => s.parse().ok()?,
                None => 0,
            };
            if hms.next().is_some() || hour > 23 || minute > 59 || second > 59 {
                return None;
            }
            (hour, minute, second)
        }
    };

    Some(LiteralValue::DateTime {
        year,
        month,
        day,
        hour,
        minute,
        second,
    })
}

/// `[-][d.]hh:mm[:ss]`.
fn parse_time_span(text: &str) -> Option<LiteralValue> {
    let (negative, rest) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };

    let (days, clock) = match rest.split_once('.') {
        Some((d, c)) => (d.parse::<i64>().ok()?, c),
        None => (0, rest),
    };

    let mut hms = clock.split(':');
    let hours: i64 = hms.next()?.parse().ok()?;
    let minutes: i64 = hms.next()?.parse().ok()?;
    let seconds: i64 = match hms.next() {
        Some(s) => s.parse().ok()?,
        None => 0,
    };
    if hms.next().is_some() || hours > 23 || minutes > 59 || seconds > 59 {
        return None;
    }
    if days < 0 || hours < 0 || minutes < 0 || seconds < 0 {
        return None;
    }

    let mut total = ((days * 24 + hours) * 60 + minutes) * 60 + seconds;
    if negative {
        total = -total;
    }
    Some(LiteralValue::TimeSpan(TimeSpanValue {
        total_seconds: total,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_bool_is_case_sensitive() {
        assert_eq!(
            try_parse_literal(LiteralKind::Bool, "true"),
            Some(LiteralValue::Bool(true))
        );
        assert_eq!(
            try_parse_literal(LiteralKind::Bool, "false"),
            Some(LiteralValue::Bool(false))
        );
        // Convertible but miscased: stays an expression
        assert_eq!(try_parse_literal(LiteralKind::Bool, "True"), None);
        assert_eq!(try_parse_literal(LiteralKind::Bool, "FALSE"), None);
    }

    #[rstest]
    #[case("'a'", Some('a'))]
    #[case("'.'", Some('.'))]
    #[case("'ab'", None)]
    #[case("a", None)]
    #[case("''", None)]
    #[case("'''", None)]
    fn test_char_literals(#[case] text: &str, #[case] expected: Option<char>) {
        assert_eq!(
            try_parse_literal(LiteralKind::Char, text),
            expected.map(LiteralValue::Char)
        );
    }

    #[rstest]
    #[case(r#""hello""#, Some("hello"))]
    #[case(r#""""#, Some(""))]
    #[case(r#""a"b""#, None)]
    #[case(r#""a\nb""#, None)]
    #[case("hello", None)]
    fn test_string_literals(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(
            try_parse_literal(LiteralKind::String, text),
            expected.map(|s| LiteralValue::String(s.to_string()))
        );
    }

    #[test]
    fn test_numeric_literals() {
        assert_eq!(
            try_parse_literal(LiteralKind::Int, " 42 "),
            Some(LiteralValue::Int(42))
        );
        assert_eq!(try_parse_literal(LiteralKind::Int, "4.2"), None);
        assert_eq!(
            try_parse_literal(LiteralKind::Float, "4.25"),
            Some(LiteralValue::Float(4.25))
        );
        assert_eq!(try_parse_literal(LiteralKind::Float, "x"), None);
    }

    #[test]
    fn test_date_time_literals() {
        assert_eq!(
            try_parse_literal(LiteralKind::DateTime, "2024-02-29 13:45:10"),
            Some(LiteralValue::DateTime {
                year: 2024,
                month: 2,
                day: 29,
                hour: 13,
                minute: 45,
                second: 10
            })
        );
        assert!(try_parse_literal(LiteralKind::DateTime, "2024-13-01").is_none());
        assert!(try_parse_literal(LiteralKind::DateTime, "not a date").is_none());
    }

    #[test]
    fn test_time_span_literals() {
        assert_eq!(
            try_parse_literal(LiteralKind::TimeSpan, "1.02:30:15"),
            Some(LiteralValue::TimeSpan(TimeSpanValue {
                total_seconds: 24 * 3600 + 2 * 3600 + 30 * 60 + 15
            }))
        );
        assert_eq!(
            try_parse_literal(LiteralKind::TimeSpan, "-00:01"),
            Some(LiteralValue::TimeSpan(TimeSpanValue { total_seconds: -60 }))
        );
        assert!(try_parse_literal(LiteralKind::TimeSpan, "25:00").is_none());
    }

    #[test]
    fn test_for_type_name() {
        assert_eq!(
            LiteralKind::for_type_name("System.Boolean"),
            Some(LiteralKind::Bool)
        );
        assert_eq!(
            LiteralKind::for_type_name("System.TimeSpan"),
            Some(LiteralKind::TimeSpan)
        );
        // Object never classifies as a literal
        assert_eq!(LiteralKind::for_type_name("System.Object"), None);
    }
}
