use crate::shared::error::QueryError;
use std::collections::BTreeMap;

/// Filter mapping handed to a session's list operation
///
/// Ordered so that the generated request URL is the same on every run.
pub type Conditions = BTreeMap<String, String>;

/// Parameters a caller supplied for one query
///
/// Unset and blank values are never stored, so "present" always means
/// "has a usable value".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParameters {
    values: BTreeMap<String, String>,
}

impl QueryParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`QueryParameters::set`]
    pub fn with<V: Into<String>>(mut self, name: &str, value: Option<V>) -> Self {
        self.set(name, value);
        self
    }

    /// Stores `value` under `name`; `None` and blank strings remove the parameter
    pub fn set<V: Into<String>>(&mut self, name: &str, value: Option<V>) {
        match value.map(Into::into) {
            Some(value) if !value.trim().is_empty() => {
                self.values.insert(name.to_string(), value);
            }
            _ => {
                self.values.remove(name);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Value of a parameter the operation cannot run without
    ///
    /// # Errors
    /// Returns [`QueryError::MissingRequired`] naming `name` if it is unset
    pub fn require(&self, spec: &ParameterSpec, name: &str) -> Result<&str, QueryError> {
        self.get(name).ok_or_else(|| QueryError::MissingRequired {
            query: spec.name.to_string(),
            required: vec![name.to_string()],
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Checks the parameters against an allow-list before anything touches the network
    ///
    /// # Errors
    /// - [`QueryError::UnknownParameter`] if a parameter is outside the allow-list
    /// - [`QueryError::NoParameters`] if no allow-listed parameter is set
    /// - [`QueryError::MissingRequired`] if none of the selecting parameters is set
    pub fn validate(&self, spec: &ParameterSpec) -> Result<(), QueryError> {
        if let Some(unknown) = self.names().find(|name| !spec.allows(name)) {
            return Err(QueryError::UnknownParameter {
                query: spec.name.to_string(),
                parameter: unknown.to_string(),
                allowed: spec.allowed_list(),
            });
        }

        if spec.needs_parameters && self.is_empty() {
            return Err(QueryError::NoParameters {
                query: spec.name.to_string(),
                allowed: spec.allowed_list(),
            });
        }

        if !spec.required.is_empty() && !spec.required.iter().any(|name| self.contains(name)) {
            return Err(QueryError::MissingRequired {
                query: spec.name.to_string(),
                required: spec.required.iter().map(|s| s.to_string()).collect(),
            });
        }

        Ok(())
    }

    /// Builds a fresh condition mapping from the given `(parameter, field)` pairs
    ///
    /// Only parameters that are set end up in the mapping, renamed to the
    /// upstream field name.
    pub fn conditions(&self, mapping: &[(&str, &str)]) -> Conditions {
        mapping
            .iter()
            .filter_map(|(parameter, field)| {
                self.get(parameter)
                    .map(|value| (field.to_string(), value.to_string()))
            })
            .collect()
    }
}

/// Declares which parameters a query or entity operation accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterSpec {
    /// Name used in error messages
    pub name: &'static str,
    /// Every parameter the operation accepts
    pub allowed: &'static [&'static str],
    /// At least one of these must be set; empty means no selecting parameter is needed
    pub required: &'static [&'static str],
    /// Whether a call with no parameters at all is a caller error
    pub needs_parameters: bool,
}

impl ParameterSpec {
    pub fn allows(&self, name: &str) -> bool {
        self.allowed.contains(&name)
    }

    fn allowed_list(&self) -> Vec<String> {
        self.allowed.iter().map(|s| s.to_string()).collect()
    }
}
