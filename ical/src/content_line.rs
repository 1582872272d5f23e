// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Splitter for a single iCalendar content line.
//!
//! Per RFC 5545, a content line has the format:
//! ```text
//! contentline = name *(";" param) ":" value CRLF
//! ```
//!
//! The scanner unfolds the line, walks the token stream for the name and the
//! parameters, and hands back the value as the raw text after the first
//! unquoted colon. The value is not interpreted here.

use std::borrow::Cow;
use std::iter::Peekable;

use crate::lexer::{Span, SpannedToken, Token, tokenize};

/// A scanned iCalendar content line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// Property name, original casing preserved
    pub name: String,

    /// Property parameters in source order
    pub parameters: Vec<ContentLineParameter>,

    /// Raw property value
    pub value: String,
}

/// A scanned parameter from a content line.
///
/// Parameters have the format: `name=value` or `name=value1,value2`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLineParameter {
    /// Parameter name (e.g., "TZID", "VALUE")
    pub name: String,

    /// Parameter values (comma-separated)
    pub values: Vec<ContentLineParameterValue>,
}

/// A single parameter value with optional quoting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLineParameterValue {
    /// The parameter value, without the surrounding quotes
    pub value: String,

    /// Whether the value was quoted in the source
    pub quoted: bool,
}

/// Errors that can occur when scanning a content line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentLineError {
    /// Empty content line.
    #[error("empty content line")]
    EmptyLine,

    /// The line does not start with a property name.
    ///
    /// Example: `:FREQ=DAILY`
    #[error("missing property name")]
    MissingName {
        /// Span where the name was expected
        span: Span,
    },

    /// Missing colon separator.
    ///
    /// Example: `RRULE FREQ=DAILY` instead of `RRULE:FREQ=DAILY`
    #[error("missing colon in property{}", .found.as_ref().map(|f| format!(", found {f}")).unwrap_or_default())]
    MissingColon {
        /// Span where colon was expected
        expected_at: Span,
        /// Description of what was found instead
        found: Option<String>,
    },

    /// Invalid parameter syntax.
    #[error("{kind}")]
    InvalidParameter {
        /// Span of the invalid parameter
        span: Span,
        /// Specific error details
        kind: ParameterErrorKind,
    },

    /// A character that is not allowed in a name or parameter.
    #[error("invalid character in content line")]
    InvalidCharacter {
        /// Span of the offending character
        span: Span,
    },
}

/// Specific parameter parsing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParameterErrorKind {
    /// Missing equals sign.
    ///
    /// Example: `TZID America/New_York`
    #[error("missing equals in parameter")]
    MissingEquals,

    /// Missing parameter value.
    ///
    /// Example: `TZID=`
    #[error("missing parameter value")]
    MissingValue,

    /// Empty parameter name.
    ///
    /// Example: `;=value`
    #[error("empty parameter name")]
    EmptyName,

    /// Unterminated quoted string.
    ///
    /// Example: `PARAM="unclosed value`
    #[error("unterminated quoted string")]
    UnterminatedQuote,
}

/// Remove RFC 5545 line folding (a line break followed by one space or tab).
///
/// Both CRLF and bare LF line breaks are accepted. Borrows when nothing is folded.
#[must_use]
pub fn unfold(src: &str) -> Cow<'_, str> {
    if !src.contains("\n ") && !src.contains("\n\t") {
        return Cow::Borrowed(src);
    }

    let mut out = String::with_capacity(src.len());
    let mut rest = src;
    while let Some((head, after)) = rest.split_once('\n') {
        if let Some(continued) = after.strip_prefix([' ', '\t']) {
            out.push_str(head.strip_suffix('\r').unwrap_or(head));
            rest = continued;
        } else {
            out.push_str(head);
            out.push('\n');
            rest = after;
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Split a content line into its name, parameters and raw value.
///
/// Trailing line breaks are ignored. Any other control character, except a
/// horizontal tab, is rejected.
///
/// ## Errors
///
/// Returns a [`ContentLineError`] if the line is not a well-formed content line.
///
/// ## Examples
///
/// ```
/// # use recur_ical::content_line::parse_property;
/// let line = parse_property("RRULE;X-SOURCE=\"a:b\":FREQ=DAILY;COUNT=3\r\n").unwrap();
/// assert_eq!(line.name, "RRULE");
/// assert_eq!(line.parameters[0].values[0].value, "a:b");
/// assert_eq!(line.value, "FREQ=DAILY;COUNT=3");
/// ```
pub fn parse_property(src: &str) -> Result<ContentLine, ContentLineError> {
    let unfolded = unfold(src);
    let line = unfolded.trim_end_matches(['\r', '\n']);

    if line.trim().is_empty() {
        return Err(ContentLineError::EmptyLine);
    }

    let mut tokens = tokenize(line).peekable();

    let name = scan_name(line, &mut tokens)?;

    let mut parameters = Vec::new();
    while let Some(&SpannedToken(Token::Semicolon, semi_span)) = tokens.peek() {
        tokens.next(); // consume semicolon
        parameters.push(scan_parameter(line, semi_span, &mut tokens)?);
    }

    match tokens.next() {
        Some(SpannedToken(Token::Colon, span)) => Ok(ContentLine {
            name,
            parameters,
            value: scan_value(line, span.end)?.to_owned(),
        }),
        Some(SpannedToken(Token::Error | Token::Newline, span)) => {
            Err(ContentLineError::InvalidCharacter { span })
        }
        Some(SpannedToken(token, span)) => Err(ContentLineError::MissingColon {
            expected_at: span,
            found: Some(token.to_string()),
        }),
        None => Err(ContentLineError::MissingColon {
            expected_at: Span::new(line.len(), line.len()),
            found: None,
        }),
    }
}

/// The raw value after the colon, free of control characters other than HTAB.
fn scan_value(line: &str, start: usize) -> Result<&str, ContentLineError> {
    let value = line.get(start..).unwrap_or_default();
    match value.char_indices().find(|&(_, c)| c.is_control() && c != '\t') {
        Some((i, c)) => Err(ContentLineError::InvalidCharacter {
            span: Span::new(start + i, start + i + c.len_utf8()),
        }),
        None => Ok(value),
    }
}

fn scan_name<'src>(
    line: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<String, ContentLineError> {
    match tokens.peek() {
        Some(&SpannedToken(Token::Word(_), _)) => {}
        Some(&SpannedToken(Token::Error, span)) => {
            return Err(ContentLineError::InvalidCharacter { span });
        }
        Some(&SpannedToken(_, span)) => return Err(ContentLineError::MissingName { span }),
        None => return Err(ContentLineError::EmptyLine),
    }

    let span = collect_words(tokens);
    Ok(slice(line, span).to_owned())
}

/// Scan a single parameter.
///
/// Format: `name=value` or `name=value1,value2`
fn scan_parameter<'src>(
    line: &'src str,
    semi_span: Span,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<ContentLineParameter, ContentLineError> {
    let invalid = |kind| ContentLineError::InvalidParameter {
        span: semi_span,
        kind,
    };

    if !matches!(tokens.peek(), Some(SpannedToken(Token::Word(_), _))) {
        return Err(invalid(ParameterErrorKind::EmptyName));
    }
    let name = slice(line, collect_words(tokens)).to_owned();

    match tokens.next() {
        Some(SpannedToken(Token::Equal, _)) => {}
        Some(_) | None => return Err(invalid(ParameterErrorKind::MissingEquals)),
    }

    let mut values = Vec::new();
    loop {
        match scan_parameter_value(line, tokens)? {
            Some(value) => values.push(value),
            None => return Err(invalid(ParameterErrorKind::MissingValue)),
        }

        match tokens.peek() {
            Some(&SpannedToken(Token::Comma, _)) => {
                tokens.next(); // consume comma
            }
            _ => break,
        }
    }

    Ok(ContentLineParameter { name, values })
}

/// Scan a single parameter value.
///
/// ```txt
/// param-value = paramtext / quoted-string
/// paramtext   = *SAFE-CHAR
/// SAFE-CHAR   = WSP / %x21 / %x23-2B / %x2D-39 / %x3C-7E / NON-US-ASCII
/// ```
///
/// Returns `Ok(None)` if there's no value to scan.
fn scan_parameter_value<'src>(
    line: &'src str,
    tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>,
) -> Result<Option<ContentLineParameterValue>, ContentLineError> {
    if let Some(&SpannedToken(Token::DQuote, open)) = tokens.peek() {
        tokens.next(); // consume opening quote
        for SpannedToken(token, span) in tokens.by_ref() {
            match token {
                Token::DQuote => {
                    return Ok(Some(ContentLineParameterValue {
                        value: slice(line, Span::new(open.end, span.start)).to_owned(),
                        quoted: true,
                    }));
                }
                Token::Error | Token::Newline => {
                    return Err(ContentLineError::InvalidCharacter { span });
                }
                _ => {}
            }
        }
        return Err(ContentLineError::InvalidParameter {
            span: open,
            kind: ParameterErrorKind::UnterminatedQuote,
        });
    }

    let mut span: Option<Span> = None;
    while let Some(&SpannedToken(token, token_span)) = tokens.peek() {
        match token {
            Token::Semicolon | Token::Colon | Token::Comma | Token::DQuote | Token::Newline => {
                break;
            }
            Token::Error => return Err(ContentLineError::InvalidCharacter { span: token_span }),
            _ => {
                tokens.next();
                span = Some(span.map_or(token_span, |s| Span::new(s.start, token_span.end)));
            }
        }
    }

    Ok(span.map(|span| ContentLineParameterValue {
        value: slice(line, span).to_owned(),
        quoted: false,
    }))
}

/// Consume consecutive word tokens, returning the span they cover.
fn collect_words<'src>(tokens: &mut Peekable<impl Iterator<Item = SpannedToken<'src>>>) -> Span {
    let mut covered = Span::default();
    let mut first = true;
    while let Some(&SpannedToken(Token::Word(_), span)) = tokens.peek() {
        if first {
            covered = span;
            first = false;
        } else {
            covered.end = span.end;
        }
        tokens.next();
    }
    covered
}

fn slice(line: &str, span: Span) -> &str {
    line.get(span.into_range()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_name_and_value() {
        let line = parse_property("RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10").unwrap();
        assert_eq!(line.name, "RRULE");
        assert!(line.parameters.is_empty());
        assert_eq!(line.value, "FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10");
    }

    #[test]
    fn keeps_name_casing() {
        let line = parse_property("rRule:FREQ=DAILY").unwrap();
        assert_eq!(line.name, "rRule");
    }

    #[test]
    fn strips_trailing_line_terminators() {
        for src in [
            "RRULE:FREQ=DAILY\r\n",
            "RRULE:FREQ=DAILY\n",
            "RRULE:FREQ=DAILY\r\n\r\n",
            "RRULE:FREQ=DAILY\n\n",
        ] {
            assert_eq!(parse_property(src).unwrap().value, "FREQ=DAILY", "{src:?}");
        }
    }

    #[test]
    fn rejects_control_characters() {
        let cases = [
            ("RRULE:FREQ=DAILY\r\nCOUNT=2", 16),
            ("RRULE:FREQ=DAILY\nCOUNT=2", 16),
            ("RRULE:FREQ=DA\x00ILY", 13),
        ];
        for (src, at) in cases {
            assert_eq!(
                parse_property(src),
                Err(ContentLineError::InvalidCharacter {
                    span: Span::new(at, at + 1)
                }),
                "{src:?}"
            );
        }

        assert_eq!(
            parse_property("RR\r\nULE:FREQ=DAILY"),
            Err(ContentLineError::InvalidCharacter {
                span: Span::new(2, 4)
            })
        );
        assert_eq!(
            parse_property("RRULE;X-A=a\r\nb:FREQ=DAILY"),
            Err(ContentLineError::InvalidCharacter {
                span: Span::new(11, 13)
            })
        );

        let line = parse_property("X-NOTE:a\tb").unwrap();
        assert_eq!(line.value, "a\tb");
    }

    #[test]
    fn keeps_colons_in_value() {
        let line = parse_property("X-URL:http://example.com/a:b").unwrap();
        assert_eq!(line.value, "http://example.com/a:b");
    }

    #[test]
    fn allows_empty_value() {
        let line = parse_property("RRULE:").unwrap();
        assert_eq!(line.value, "");
    }

    #[test]
    fn scans_parameters() {
        let line =
            parse_property(r#"RRULE;X-A=one,two;X-B="quoted;value:here":FREQ=DAILY"#).unwrap();
        assert_eq!(line.parameters.len(), 2);

        let a = &line.parameters[0];
        assert_eq!(a.name, "X-A");
        let values: Vec<_> = a.values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, ["one", "two"]);
        assert!(a.values.iter().all(|v| !v.quoted));

        let b = &line.parameters[1];
        assert_eq!(b.name, "X-B");
        assert_eq!(b.values[0].value, "quoted;value:here");
        assert!(b.values[0].quoted);

        assert_eq!(line.value, "FREQ=DAILY");
    }

    #[test]
    fn keeps_equals_in_parameter_values() {
        let line = parse_property("RRULE;X-A=a=b,=c;X-B=\"k=v\":FREQ=DAILY").unwrap();
        let values: Vec<_> = line.parameters[0].values.iter().map(|v| v.value.as_str()).collect();
        assert_eq!(values, ["a=b", "=c"]);
        assert_eq!(line.parameters[1].values[0].value, "k=v");
        assert_eq!(line.value, "FREQ=DAILY");
    }

    #[test]
    fn unfolds_before_scanning() {
        let line = parse_property("RRULE:FREQ=WEEK\r\n LY;BY\r\n\tDAY=MO\r\n").unwrap();
        assert_eq!(line.value, "FREQ=WEEKLY;BYDAY=MO");

        let line = parse_property("RRU\n LE:FREQ=DAILY").unwrap();
        assert_eq!(line.name, "RRULE");
    }

    #[test]
    fn unfold_borrows_when_nothing_folded() {
        assert!(matches!(unfold("RRULE:FREQ=DAILY"), Cow::Borrowed(_)));
        assert_eq!(unfold("A\r\n B\r\nC"), "AB\r\nC");
        assert_eq!(unfold("A\n\tB"), "AB");
    }

    #[test]
    fn rejects_malformed_lines() {
        assert_eq!(parse_property(""), Err(ContentLineError::EmptyLine));
        assert_eq!(parse_property("  \r\n"), Err(ContentLineError::EmptyLine));
        assert!(matches!(
            parse_property(":FREQ=DAILY"),
            Err(ContentLineError::MissingName { .. })
        ));
        assert!(matches!(
            parse_property("RRULE"),
            Err(ContentLineError::MissingColon { found: None, .. })
        ));
        assert!(matches!(
            parse_property("RRULE FREQ=DAILY"),
            Err(ContentLineError::MissingColon { found: Some(_), .. })
        ));
        assert!(matches!(
            parse_property("RR\x01ULE:FREQ=DAILY"),
            Err(ContentLineError::InvalidCharacter { .. })
        ));
    }

    #[test]
    fn rejects_malformed_parameters() {
        let cases = [
            ("RRULE;=x:FREQ=DAILY", ParameterErrorKind::EmptyName),
            ("RRULE;X-A:FREQ=DAILY", ParameterErrorKind::MissingEquals),
            ("RRULE;X-A=:FREQ=DAILY", ParameterErrorKind::MissingValue),
            ("RRULE;X-A=a,:FREQ=DAILY", ParameterErrorKind::MissingValue),
            (r#"RRULE;X-A="open:FREQ=DAILY"#, ParameterErrorKind::UnterminatedQuote),
        ];
        for (src, expected) in cases {
            match parse_property(src) {
                Err(ContentLineError::InvalidParameter { kind, .. }) => {
                    assert_eq!(kind, expected, "for {src}");
                }
                other => panic!("expected parameter error for {src}, got {other:?}"),
            }
        }

        for (src, at) in [
            ("RRULE;X-A=a\x01b:FREQ=DAILY", 11),
            ("RRULE;X-A=\x7F:FREQ=DAILY", 10),
            ("RRULE;X-A=\"a\x01b\":FREQ=DAILY", 12),
        ] {
            assert_eq!(
                parse_property(src),
                Err(ContentLineError::InvalidCharacter {
                    span: Span::new(at, at + 1)
                }),
                "{src:?}"
            );
        }
    }

    #[test]
    fn error_messages_are_readable() {
        let err = parse_property("RRULE FREQ=DAILY").unwrap_err();
        assert_eq!(err.to_string(), "missing colon in property, found Symbol( )");

        let err = parse_property("RRULE;X-A:FREQ").unwrap_err();
        assert_eq!(err.to_string(), "missing equals in parameter");
    }
}
