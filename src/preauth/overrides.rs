//! Header override table construction.
//!
//! # Format
//! ```text
//! header names:  name1;name2;name3          (trailing empty segments dropped)
//! header values: v1;v2a,v2b;v3              (trailing empty segments kept at
//!                                            both the ';' and ',' level)
//! ```
//!
//! # Design Decisions
//! - Built once at setup, immutable afterwards, shared through `Arc`
//! - Insertion order of names is kept; a repeated name replaces the earlier
//!   values in place
//! - A count mismatch between names and value groups is fatal

use crate::error::{Error, Result};

/// Identity and header values reported in place of the underlying request's.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OverrideTable {
    identity: Option<String>,
    headers: Vec<(String, Vec<String>)>,
}

impl OverrideTable {
    /// Create a table with no identity and no header overrides.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from the raw `names` / `values` configuration strings.
    ///
    /// Either side being absent yields an empty header mapping.
    pub fn parse(identity: Option<String>, names: Option<&str>, values: Option<&str>) -> Result<Self> {
        let mut table = Self {
            identity,
            headers: Vec::new(),
        };

        let (Some(names), Some(values)) = (names, values) else {
            return Ok(table);
        };

        let names = split_dropping_trailing(names, ';');
        let groups: Vec<&str> = values.split(';').collect();

        if names.len() != groups.len() {
            return Err(Error::Configuration {
                names: names.len(),
                values: groups.len(),
            });
        }

        for (name, group) in names.into_iter().zip(groups) {
            let values = group.split(',').map(str::to_string).collect();
            table.insert(name, values);
        }

        Ok(table)
    }

    /// Set the identity override.
    pub fn with_identity(mut self, identity: impl Into<String>) -> Self {
        self.identity = Some(identity.into());
        self
    }

    /// Add (or replace) the override values for a header.
    pub fn with_header<I, V>(mut self, name: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        self.insert(name.into(), values.into_iter().map(Into::into).collect());
        self
    }

    fn insert(&mut self, name: String, values: Vec<String>) {
        match self.headers.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = values,
            None => self.headers.push((name, values)),
        }
    }

    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Override values for `name` (case-sensitive), if the header is overridden.
    pub fn values(&self, name: &str) -> Option<&[String]> {
        self.headers
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, values)| values.as_slice())
    }

    /// First override value for `name`. An empty entry counts as no override.
    pub fn first_value(&self, name: &str) -> Option<&str> {
        self.values(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// Overridden header names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.headers.iter().map(|(name, _)| name.as_str())
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identity.is_none() && self.headers.is_empty()
    }
}

/// Split on `delimiter`, removing trailing empty segments. Input without any
/// delimiter is returned whole, even when empty.
fn split_dropping_trailing(input: &str, delimiter: char) -> Vec<String> {
    if !input.contains(delimiter) {
        return vec![input.to_string()];
    }

    let mut parts: Vec<String> = input.split(delimiter).map(str::to_string).collect();
    while parts.last().is_some_and(|last| last.is_empty()) {
        parts.pop();
    }
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(names: &str, values: &str) -> Result<OverrideTable> {
        OverrideTable::parse(None, Some(names), Some(values))
    }

    #[test]
    fn test_example_configuration() {
        let table = parse("header1;header2;header3", "value1;mvalue2a,mvalue2b;value3").unwrap();

        assert_eq!(table.values("header1").unwrap(), ["value1"]);
        assert_eq!(table.values("header2").unwrap(), ["mvalue2a", "mvalue2b"]);
        assert_eq!(table.values("header3").unwrap(), ["value3"]);
        assert_eq!(table.first_value("header2"), Some("mvalue2a"));
    }

    #[test]
    fn test_empty_value_groups_keep_a_segment() {
        let table = parse("header1;header2;header3", ";,;").unwrap();

        assert_eq!(table.values("header1").unwrap(), [""]);
        assert_eq!(table.values("header2").unwrap(), ["", ""]);
        assert_eq!(table.values("header3").unwrap(), [""]);
    }

    #[test]
    fn test_mismatched_lengths_fail_either_way() {
        let err = parse("header1;header2;header3", "value1;mvalue2a,mvalue2b").unwrap_err();
        assert!(matches!(err, Error::Configuration { names: 3, values: 2 }));

        let err = parse("header1", "value1;value2").unwrap_err();
        assert!(matches!(err, Error::Configuration { names: 1, values: 2 }));
    }

    #[test]
    fn test_trailing_delimiters() {
        // Trailing ';' on names is dropped, on values it adds an empty group.
        let table = parse("a;b;;", "1;2").unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["a", "b"]);

        let err = parse("a;b", "1;2;").unwrap_err();
        assert!(matches!(err, Error::Configuration { names: 2, values: 3 }));

        let table = parse("a;b", "1,;2").unwrap();
        assert_eq!(table.values("a").unwrap(), ["1", ""]);
    }

    #[test]
    fn test_absent_inputs_yield_empty_headers() {
        let table = OverrideTable::parse(Some("bob".into()), None, Some("x")).unwrap();
        assert_eq!(table.header_count(), 0);
        assert_eq!(table.identity(), Some("bob"));

        let table = OverrideTable::parse(None, Some("x"), None).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_duplicate_name_last_wins_in_place() {
        let table = parse("a;b;a", "1;2;3").unwrap();
        assert_eq!(table.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(table.values("a").unwrap(), ["3"]);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let table = parse("X-User", "alice").unwrap();
        assert_eq!(table.first_value("X-User"), Some("alice"));
        assert_eq!(table.first_value("x-user"), None);
    }

    #[test]
    fn test_empty_entry_is_not_an_override() {
        let table = OverrideTable::new().with_header("a", Vec::<String>::new());
        assert!(table.values("a").is_some());
        assert_eq!(table.first_value("a"), None);
    }

    #[test]
    fn test_split_dropping_trailing() {
        assert_eq!(split_dropping_trailing("", ';'), [""]);
        assert!(split_dropping_trailing(";;", ';').is_empty());
        assert_eq!(split_dropping_trailing("a;;b;;", ';'), ["a", "", "b"]);
    }
}
