//! Structured query state.
//!
//! # Invariants
//!
//! 1. Fields keep insertion order; replacing a field keeps its position.
//! 2. `parse(&serialize(s)) == s` for states whose lists and maps are
//!    non-empty. Empty containers have no textual form and are dropped
//!    on serialization.

use indexmap::IndexMap;
use indexmap::map::Iter;

/// One field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// `name=value`
    Scalar(String),
    /// `name[]=a&name[]=b`, order preserved.
    List(Vec<String>),
    /// `name[key]=...`
    Map(QueryState),
}

impl QueryValue {
    #[must_use]
    pub fn scalar(value: impl Into<String>) -> Self {
        Self::Scalar(value.into())
    }

    pub fn list<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(values.into_iter().map(Into::into).collect())
    }

    /// String values of a scalar (one element) or a list.
    #[must_use]
    pub fn values(&self) -> Option<&[String]> {
        match self {
            Self::Scalar(value) => Some(std::slice::from_ref(value)),
            Self::List(values) => Some(values),
            Self::Map(_) => None,
        }
    }

    #[must_use]
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&QueryState> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        Self::Scalar(value.to_owned())
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        Self::List(values)
    }
}

impl From<QueryState> for QueryValue {
    fn from(map: QueryState) -> Self {
        Self::Map(map)
    }
}

/// Ordered mapping from field name to [`QueryValue`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    pub(crate) fields: IndexMap<String, QueryValue>,
}

impl QueryState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field, returning the value it replaced.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        self.fields.insert(name.into(), value.into())
    }

    /// Set a nested field, creating intermediate maps.
    ///
    /// An intermediate field holding a scalar or list is replaced by a map.
    /// An empty path is a no-op.
    pub fn set_path(&mut self, path: &[&str], value: QueryValue) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };
        let mut node = self;
        for segment in parents {
            let slot = node
                .fields
                .entry((*segment).to_owned())
                .or_insert_with(|| QueryValue::Map(QueryState::new()));
            if !matches!(slot, QueryValue::Map(_)) {
                *slot = QueryValue::Map(QueryState::new());
            }
            node = match slot {
                QueryValue::Map(map) => map,
                _ => return,
            };
        }
        node.insert(*last, value);
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&QueryValue> {
        self.fields.get(name)
    }

    /// Follow `path` through nested maps.
    #[must_use]
    pub fn get_path(&self, path: &[&str]) -> Option<&QueryValue> {
        let (first, rest) = path.split_first()?;
        rest.iter().try_fold(self.get(first)?, |value, segment| {
            value.as_map()?.get(segment)
        })
    }

    pub fn remove(&mut self, name: &str) -> Option<QueryValue> {
        self.fields.shift_remove(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields in insertion order.
    pub fn iter(&self) -> Iter<'_, String, QueryValue> {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a QueryState {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryState {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
