//! Core, format-agnostic types for localefmt.
//! Catalog parsers decode into [`MessageCatalog`]; the formatting entry points
//! consume [`Args`] made of [`Value`]s.

use std::{
    collections::{BTreeMap, btree_map},
    fmt::Display,
};

use serde::{Deserialize, Serialize};

use crate::plural::PluralRules;

/// A flat key-value table holding one locale's translated strings.
///
/// Keys are the source format strings; values are their translations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Inserts a message, returning the previous value for `key` if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.messages.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.messages.remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, String> {
        self.messages.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.messages
    }
}

impl From<BTreeMap<String, String>> for MessageCatalog {
    fn from(messages: BTreeMap<String, String>) -> Self {
        MessageCatalog { messages }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        MessageCatalog {
            messages: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a MessageCatalog {
    type Item = (&'a String, &'a String);
    type IntoIter = btree_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.messages.iter()
    }
}

/// A single formatting argument.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Uint(u64),
    Float(f64),
    Str(String),
    Bool(bool),
    Char(char),
}

impl Value {
    /// Name of the value's type as shown in formatting diagnostics (`%!d(string=x)`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float64",
            Value::Str(_) => "string",
            Value::Bool(_) => "bool",
            Value::Char(_) => "char",
        }
    }

    /// Returns the value widened to `i128` when it is an integer.
    pub fn as_integer(&self) -> Option<i128> {
        match self {
            Value::Int(v) => Some(i128::from(*v)),
            Value::Uint(v) => Some(i128::from(*v)),
            _ => None,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Uint(v) => write!(f, "{}", v),
            Value::Float(v) => write!(f, "{}", v),
            Value::Str(v) => write!(f, "{}", v),
            Value::Bool(v) => write!(f, "{}", v),
            Value::Char(v) => write!(f, "{}", v),
        }
    }
}

macro_rules! impl_value_from {
    ($variant:ident as $target:ty: $($source:ty),+) => {
        $(
            impl From<$source> for Value {
                fn from(value: $source) -> Self {
                    Value::$variant(value as $target)
                }
            }
        )+
    };
}

impl_value_from!(Int as i64: i8, i16, i32, i64, isize);
impl_value_from!(Uint as u64: u8, u16, u32, u64, usize);
impl_value_from!(Float as f64: f32, f64);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Char(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Str(value.clone())
    }
}

/// The argument list of a formatting call.
///
/// A plural rule set travels next to the values instead of hiding in the last
/// position, so preprocessing never inspects argument types at runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Args {
    Plain(Vec<Value>),
    Plural {
        values: Vec<Value>,
        rules: PluralRules,
    },
}

impl Args {
    pub fn new() -> Self {
        Args::Plain(Vec::new())
    }

    /// Attaches a plural rule set, replacing any previously attached one.
    pub fn with_plural(self, rules: PluralRules) -> Self {
        Args::Plural {
            values: self.into_values(),
            rules,
        }
    }

    pub fn values(&self) -> &[Value] {
        match self {
            Args::Plain(values) | Args::Plural { values, .. } => values,
        }
    }

    pub fn rules(&self) -> Option<&PluralRules> {
        match self {
            Args::Plain(_) => None,
            Args::Plural { rules, .. } => Some(rules),
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        match self {
            Args::Plain(values) | Args::Plural { values, .. } => values,
        }
    }
}

impl Default for Args {
    fn default() -> Self {
        Args::new()
    }
}

impl From<Vec<Value>> for Args {
    fn from(values: Vec<Value>) -> Self {
        Args::Plain(values)
    }
}

impl From<()> for Args {
    fn from(_: ()) -> Self {
        Args::new()
    }
}

/// Builds a plain [`Args`] list, converting each expression into a [`Value`].
///
/// ```rust
/// use localefmt::{Args, Value, args};
/// let args = args!["Lukin", 2];
/// assert_eq!(args, Args::Plain(vec![Value::from("Lukin"), Value::Int(2)]));
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::Plain(::std::vec::Vec::new())
    };
    ($($value:expr),+ $(,)?) => {
        $crate::Args::Plain(::std::vec![$($crate::Value::from($value)),+])
    };
}
