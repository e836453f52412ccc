//! Ordered property bag for events and profile updates.

use serde::Serialize;
use serde_json::{Map, Value};

/// Custom properties attached to an event or a profile update.
///
/// # Example
///
/// ```
/// use mixpanel::Properties;
///
/// let props = Properties::new()
///     .insert("plan", "pro")
///     .insert("seats", 5)
///     .insert("trial", false);
/// assert_eq!(props.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Properties {
    inner: Map<String, Value>,
}

impl Properties {
    /// Creates an empty property bag.
    pub fn new() -> Self {
        Self { inner: Map::new() }
    }

    /// Inserts a key-value pair, replacing any previous value for the key.
    pub fn insert<K, V>(mut self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.inner.insert(key.into(), value.into());
        self
    }

    /// Inserts in place.
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.inner.insert(key.into(), value.into());
    }

    /// Merges `other` into this bag. Keys present in both take the value from `other`.
    pub fn merge(mut self, other: Properties) -> Self {
        self.inner.extend(other.inner);
        self
    }

    /// Returns true if no properties are set.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the number of properties.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Gets a value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.inner.get(key)
    }

    /// Iterates over the properties.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.inner.iter()
    }

    /// Converts the bag into a JSON object.
    pub fn into_value(self) -> Value {
        Value::Object(self.inner)
    }
}

impl From<Properties> for Value {
    fn from(props: Properties) -> Self {
        props.into_value()
    }
}

impl From<Map<String, Value>> for Properties {
    fn from(map: Map<String, Value>) -> Self {
        Self { inner: map }
    }
}

impl<K, V> FromIterator<(K, V)> for Properties
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            inner: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}
