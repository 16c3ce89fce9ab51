//! Override arguments supplied by a caller.
//!
//! [`Arguments`] behaves like an ordered key/value array: entries are either
//! index-keyed or name-keyed and keep their insertion order. Whether a call is
//! bound positionally or by name is decided once, from the key of the first
//! entry.

use crate::value::Value;
use std::collections::VecDeque;
use std::fmt;

/// The key of one argument entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgKey {
    /// A positional slot.
    Index(usize),
    /// A named slot.
    Name(String),
}

impl fmt::Display for ArgKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgKey::Index(i) => write!(f, "{i}"),
            ArgKey::Name(name) => f.write_str(name),
        }
    }
}

/// An ordered list of caller-supplied arguments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    entries: VecDeque<(ArgKey, Value)>,
    next_index: usize,
}

impl Arguments {
    /// An empty argument list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a positional list from `values`.
    pub fn positional<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let mut args = Self::new();
        for value in values {
            args.push(value);
        }
        args
    }

    /// Build a name-keyed map from `pairs`.
    pub fn named<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut args = Self::new();
        for (name, value) in pairs {
            args.insert(name, value);
        }
        args
    }

    /// Append a value under the next free index.
    pub fn push(&mut self, value: impl Into<Value>) -> &mut Self {
        let index = self.next_index;
        self.next_index += 1;
        self.entries.push_back((ArgKey::Index(index), value.into()));
        self
    }

    /// Set a named value, replacing an existing entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> &mut Self {
        let key = ArgKey::Name(name.into());
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push_back((key, value)),
        }
        self
    }

    /// Set a value under an explicit index, replacing an existing entry in place.
    pub fn insert_at(&mut self, index: usize, value: impl Into<Value>) -> &mut Self {
        let key = ArgKey::Index(index);
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.entries.push_back((key, value)),
        }
        self.next_index = self.next_index.max(index + 1);
        self
    }

    /// Builder form of [`push`](Self::push).
    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Whether the list binds positionally: its first entry is keyed by index 0.
    pub fn is_positional(&self) -> bool {
        matches!(self.entries.front(), Some((ArgKey::Index(0), _)))
    }

    /// Number of remaining entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no entries remain.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The first remaining value, whatever its key.
    pub fn front(&self) -> Option<&Value> {
        self.entries.front().map(|(_, v)| v)
    }

    /// Remove and return the first remaining value, whatever its key.
    pub fn shift(&mut self) -> Option<Value> {
        self.entries.pop_front().map(|(_, v)| v)
    }

    /// Look up a named value.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.entries.iter().find_map(|(k, v)| match k {
            ArgKey::Name(n) if n == name => Some(v),
            _ => None,
        })
    }

    /// Whether a named value is present.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterate over the remaining entries in order.
    pub fn iter(&self) -> impl Iterator<Item = (&ArgKey, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

impl From<Vec<Value>> for Arguments {
    fn from(values: Vec<Value>) -> Self {
        Arguments::positional(values)
    }
}

impl FromIterator<Value> for Arguments {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Arguments::positional(iter)
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Arguments {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Arguments::named(iter)
    }
}
