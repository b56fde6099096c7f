//! Ordered query string parameters.

/// Query parameters in insertion order.
///
/// Only filters that are actually set get pushed, so an unfiltered list
/// request goes out without a query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    /// Create an empty parameter list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn push(mut self, key: &str, value: impl ToString) -> Self {
        self.pairs.push((key.to_string(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    pub fn push_opt<V: ToString>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.push(key, v),
            None => self,
        }
    }

    /// Append a string parameter only when it is non-empty after trimming.
    pub fn push_non_empty(self, key: &str, value: Option<&str>) -> Self {
        self.push_opt(key, value.map(str::trim).filter(|v| !v.is_empty()))
    }

    /// Whether no parameters were set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Look up the first value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterate over the pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}
