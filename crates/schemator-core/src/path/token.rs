//! Path tokens and raw path inputs

use crate::access::parse_index;
use crate::value::Value;
use std::fmt;

/// One segment of a parsed path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    /// Literal key; numeric keys index lists
    Key(String),
    /// `*`: resolve the following segments against every element
    Wildcard,
    /// `>`: like `*`, splicing each element's result one level
    Flatten,
    /// `|`: close the innermost open fan-out
    Cancel,
}

impl Token {
    pub const WILDCARD: &'static str = "*";
    pub const FLATTEN: &'static str = ">";
    pub const CANCEL: &'static str = "|";

    /// Classify a raw segment
    pub fn classify(segment: &str) -> Token {
        match segment {
            Self::WILDCARD => Token::Wildcard,
            Self::FLATTEN => Token::Flatten,
            Self::CANCEL => Token::Cancel,
            key => Token::Key(key.to_string()),
        }
    }

    pub fn as_key(&self) -> Option<&str> {
        match self {
            Token::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_index(&self) -> Option<usize> {
        self.as_key().and_then(parse_index)
    }

    /// Fan-out, flatten and cancel are operators; keys are not
    pub fn is_operator(&self) -> bool {
        !matches!(self, Token::Key(_))
    }

    /// Whether this token opens a fan-out group
    pub fn opens_group(&self) -> bool {
        matches!(self, Token::Wildcard)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Key(key) => f.write_str(key),
            Token::Wildcard => f.write_str(Self::WILDCARD),
            Token::Flatten => f.write_str(Self::FLATTEN),
            Token::Cancel => f.write_str(Self::CANCEL),
        }
    }
}

impl From<&str> for Token {
    fn from(segment: &str) -> Self {
        Token::classify(segment)
    }
}

/// A path before parsing
#[derive(Debug, Clone, PartialEq)]
pub enum RawPath {
    /// No path: the whole container
    Empty,
    /// Delimiter-joined segments
    Text(String),
    /// A single scalar key, never split
    Key(String),
    /// Explicit segments, classified but not split
    Segments(Vec<String>),
    /// Already parsed tokens
    Tokens(Vec<Token>),
    /// A dynamic value whose shape is checked when parsed
    Value(Value),
}

impl From<&str> for RawPath {
    fn from(path: &str) -> Self {
        RawPath::Text(path.to_string())
    }
}

impl From<String> for RawPath {
    fn from(path: String) -> Self {
        RawPath::Text(path)
    }
}

impl From<&String> for RawPath {
    fn from(path: &String) -> Self {
        RawPath::Text(path.clone())
    }
}

impl From<usize> for RawPath {
    fn from(index: usize) -> Self {
        RawPath::Key(index.to_string())
    }
}

impl From<i64> for RawPath {
    fn from(key: i64) -> Self {
        RawPath::Key(key.to_string())
    }
}

impl From<Vec<&str>> for RawPath {
    fn from(segments: Vec<&str>) -> Self {
        RawPath::Segments(segments.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for RawPath {
    fn from(segments: &[&str]) -> Self {
        RawPath::Segments(segments.iter().map(|s| s.to_string()).collect())
    }
}

impl From<Vec<String>> for RawPath {
    fn from(segments: Vec<String>) -> Self {
        RawPath::Segments(segments)
    }
}

impl From<Vec<Token>> for RawPath {
    fn from(tokens: Vec<Token>) -> Self {
        RawPath::Tokens(tokens)
    }
}

impl From<&[Token]> for RawPath {
    fn from(tokens: &[Token]) -> Self {
        RawPath::Tokens(tokens.to_vec())
    }
}

impl<T: Into<RawPath>> From<Option<T>> for RawPath {
    fn from(path: Option<T>) -> Self {
        path.map(Into::into).unwrap_or(RawPath::Empty)
    }
}

impl From<Value> for RawPath {
    fn from(value: Value) -> Self {
        RawPath::Value(value)
    }
}

impl From<&Value> for RawPath {
    fn from(value: &Value) -> Self {
        RawPath::Value(value.clone())
    }
}
