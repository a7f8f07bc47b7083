//! Named-argument values and their conversions.
//!
//! A named argument is a `(key, value)` pair. The value decides how the pair is
//! rendered on the command line: a flag that is present or absent, an option
//! with one value, or an option repeated once per value. Conversions from
//! ordinary Rust values (and from JSON) pick the variant once, at the boundary.

use serde_json::Value;

/// The value half of a named argument.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    /// `true` emits the option alone, `false` emits nothing.
    Flag(bool),

    /// Emits the option followed by the value.
    Scalar(String),

    /// Emits the option followed by each element, repeating the option.
    List(Vec<String>),

    /// A value of a kind the command line has no rendering for.
    /// Dropped from the argument vector without an error.
    Unrecognized,
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Flag(value)
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Scalar(value)
    }
}

impl From<&String> for ArgValue {
    fn from(value: &String) -> Self {
        Self::Scalar(value.clone())
    }
}

impl From<char> for ArgValue {
    fn from(value: char) -> Self {
        Self::Scalar(value.to_string())
    }
}

impl<T: Into<String>> From<Vec<T>> for ArgValue {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<String>, const N: usize> From<[T; N]> for ArgValue {
    fn from(values: [T; N]) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<String> + Clone> From<&[T]> for ArgValue {
    fn from(values: &[T]) -> Self {
        Self::List(values.iter().cloned().map(Into::into).collect())
    }
}

/// `None` has no command-line rendering and is dropped.
impl<T: Into<ArgValue>> From<Option<T>> for ArgValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Unrecognized, Into::into)
    }
}

/// Booleans become flags, strings become scalars and arrays of strings
/// become lists. Everything else (null, numbers, objects, arrays holding a
/// non-string) is unrecognized.
impl From<Value> for ArgValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Bool(present) => Self::Flag(present),
            Value::String(s) => Self::Scalar(s),
            Value::Array(items) => items
                .into_iter()
                .map(|item| match item {
                    Value::String(s) => Some(s),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()
                .map_or(Self::Unrecognized, Self::List),
            Value::Null | Value::Number(_) | Value::Object(_) => Self::Unrecognized,
        }
    }
}

/// One `(key, value)` pair, in the order the caller supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedArg {
    /// Untranslated key; `__` still stands for `-` here.
    pub key: String,
    pub value: ArgValue,
}

impl NamedArg {
    pub fn new(key: impl Into<String>, value: impl Into<ArgValue>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

impl<K: Into<String>, V: Into<ArgValue>> From<(K, V)> for NamedArg {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
