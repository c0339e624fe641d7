//! Path parser turning raw paths into token sequences

use super::error::{PathError, PathResult};
use super::token::{RawPath, Token};
use crate::value::Value;

/// Default segment delimiter
pub const DEFAULT_DELIMITER: &str = ".";

/// Splits and classifies raw paths
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathParser {
    delimiter: String,
}

impl Default for PathParser {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER.to_string(),
        }
    }
}

impl PathParser {
    /// Parser splitting on `delimiter`
    pub fn new(delimiter: impl Into<String>) -> PathResult<Self> {
        let delimiter = delimiter.into();
        if delimiter.is_empty() {
            return Err(PathError::invalid_path("delimiter must not be empty", ""));
        }
        Ok(Self { delimiter })
    }

    pub fn delimiter(&self) -> &str {
        &self.delimiter
    }

    /// Parse a raw path into tokens; an empty path yields no tokens
    pub fn parse(&self, raw: impl Into<RawPath>) -> PathResult<Vec<Token>> {
        match raw.into() {
            RawPath::Empty => Ok(Vec::new()),
            RawPath::Text(text) => Ok(self.split(&text)),
            RawPath::Key(key) => Ok(vec![Token::Key(key)]),
            RawPath::Segments(segments) => {
                Ok(segments.iter().map(|s| Token::classify(s)).collect())
            }
            RawPath::Tokens(tokens) => Ok(tokens),
            RawPath::Value(value) => self.parse_value(&value),
        }
    }

    fn split(&self, text: &str) -> Vec<Token> {
        if text.is_empty() {
            return Vec::new();
        }
        text.split(self.delimiter.as_str()).map(Token::classify).collect()
    }

    fn parse_value(&self, value: &Value) -> PathResult<Vec<Token>> {
        match value {
            Value::Null => Ok(Vec::new()),
            Value::String(text) => Ok(self.split(text)),
            Value::Number(n) => Ok(vec![Token::Key(n.to_string())]),
            Value::List(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(segment) => Ok(Token::classify(segment)),
                    Value::Number(n) => Ok(Token::Key(n.to_string())),
                    other => Err(PathError::invalid_path(
                        format!("path segment must be a string or number, found {}", other.type_name()),
                        value.to_string(),
                    )),
                })
                .collect(),
            other => Err(PathError::invalid_path(
                format!("path must be a string, number or list, found {}", other.type_name()),
                other.to_string(),
            )),
        }
    }

    /// Join tokens back into a path string
    pub fn join(&self, tokens: &[Token]) -> String {
        tokens
            .iter()
            .map(Token::to_string)
            .collect::<Vec<_>>()
            .join(&self.delimiter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn key(k: &str) -> Token {
        Token::Key(k.to_string())
    }

    #[test]
    fn test_split_and_classify() {
        let parser = PathParser::default();
        assert_eq!(
            parser.parse("a.*.b.>.|.0").unwrap(),
            vec![key("a"), Token::Wildcard, key("b"), Token::Flatten, Token::Cancel, key("0")]
        );
    }

    #[test]
    fn test_empty_inputs() {
        let parser = PathParser::default();
        assert!(parser.parse("").unwrap().is_empty());
        assert!(parser.parse(RawPath::Empty).unwrap().is_empty());
        assert!(parser.parse(None::<&str>).unwrap().is_empty());
        assert!(parser.parse(Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_scalar_becomes_single_key() {
        let parser = PathParser::default();
        assert_eq!(parser.parse(3usize).unwrap(), vec![key("3")]);
        assert_eq!(parser.parse(Value::from(json!(7))).unwrap(), vec![key("7")]);
    }

    #[test]
    fn test_segments_are_not_split() {
        let parser = PathParser::default();
        assert_eq!(
            parser.parse(vec!["a.b", "*"]).unwrap(),
            vec![key("a.b"), Token::Wildcard]
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let parser = PathParser::new("/").unwrap();
        assert_eq!(parser.parse("a/b.c/*").unwrap(), vec![key("a"), key("b.c"), Token::Wildcard]);
        assert_eq!(parser.join(&[key("a"), Token::Flatten]), "a/>");
        assert!(PathParser::new("").is_err());
    }

    #[test]
    fn test_invalid_shapes() {
        let parser = PathParser::default();
        let err = parser.parse(Value::from(json!({"a": 1}))).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::InvalidPath);
        assert!(parser.parse(Value::Bool(true)).is_err());
        assert!(parser.parse(Value::from(json!(["a", ["b"]]))).is_err());
    }
}
