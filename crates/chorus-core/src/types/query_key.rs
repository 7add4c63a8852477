//! Composite keys for cached query responses.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Key of a cached server response: a query name plus ordered parameters.
///
/// Two keys are equal only if the name and every parameter match in order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct QueryKey {
    /// Query name, e.g. `"current-user"`.
    pub name: String,
    /// Parameters in the order the caller supplied them.
    pub params: Vec<(String, String)>,
}

impl QueryKey {
    /// Key without parameters.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            params: Vec::new(),
        }
    }

    /// Appends a parameter.
    pub fn with_param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        for (i, (k, v)) in self.params.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{sep}{k}={v}")?;
        }
        Ok(())
    }
}
