//! Reference list of countries offered by the form.

use serde::Serialize;

use crate::error::ReferenceDataError;

/// Ordered, non-empty, read-only list of country names.
///
/// Built once at startup and shared (`Arc<CountryList>`) by every session;
/// nothing mutates it after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CountryList {
    names: Vec<String>,
}

impl CountryList {
    /// Build a list from names in display order.
    ///
    /// Names are trimmed, blank entries are dropped. Fails if nothing is left.
    pub fn new<I, S>(names: I) -> Result<Self, ReferenceDataError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let names: Vec<String> = names
            .into_iter()
            .map(|n| n.as_ref().trim().to_string())
            .filter(|n| !n.is_empty())
            .collect();

        if names.is_empty() {
            return Err(ReferenceDataError::Empty);
        }

        Ok(Self { names })
    }

    /// The first country, preselected by the form.
    pub fn first(&self) -> &str {
        // Non-empty by construction.
        &self.names[0]
    }

    /// Whether `name` is one of the known countries (exact match).
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Position of `name` in the list, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.names.iter().position(|n| n == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
