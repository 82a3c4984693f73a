//! Field records exchanged between benchmark workloads and the bindings.
//!
//! A [`Record`] is the row shape every workload operation works with: a set of
//! uniquely named fields, each holding an opaque byte value. Iteration follows
//! insertion order so that positional layouts (such as time-series rows) are
//! stable, but two records compare equal whenever they hold the same fields
//! with the same bytes, regardless of order.

use std::collections::HashSet;

use bytes::Bytes;

/// Set of field names used to project a record down to a subset of fields.
pub type FieldSet = HashSet<String>;

/// A single named field of a [`Record`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// The field name.
    pub name: String,
    /// The field value. Never interpreted by the bindings.
    pub value: Bytes,
}

/// An insertion-ordered mapping from field name to field value.
///
/// # Example
///
/// ```
/// use common::Record;
///
/// let mut record = Record::new();
/// record.insert("first_name", "Dave");
/// record.insert("last_name", "Parfitt");
///
/// assert_eq!(record.len(), 2);
/// assert_eq!(record.get("first_name").unwrap().as_ref(), b"Dave");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Inserts a field, returning the previous value if the name was present.
    ///
    /// Replacing an existing field keeps its original position.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Bytes>) -> Option<Bytes> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|f| f.name == name) {
            Some(field) => Some(std::mem::replace(&mut field.value, value)),
            None => {
                self.fields.push(Field { name, value });
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Bytes> {
        self.fields.iter().find(|f| f.name == name).map(|f| &f.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<Bytes> {
        let pos = self.fields.iter().position(|f| f.name == name)?;
        Some(self.fields.remove(pos).value)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Bytes)> {
        self.fields.iter().map(|f| (f.name.as_str(), &f.value))
    }

    /// Iterates over field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    /// Returns the fields in insertion order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Merges `updates` into this record.
    ///
    /// Fields present in `updates` overwrite existing values (or are appended
    /// when new); all other fields are left untouched.
    pub fn merge(&mut self, updates: Record) {
        for field in updates.fields {
            self.insert(field.name, field.value);
        }
    }

    /// Returns a copy containing only the fields named in `names`.
    pub fn project(&self, names: &FieldSet) -> Record {
        self.fields
            .iter()
            .filter(|f| names.contains(&f.name))
            .cloned()
            .collect()
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .fields
                .iter()
                .all(|f| other.get(&f.name) == Some(&f.value))
    }
}

impl Eq for Record {}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut record = Record::new();
        for field in iter {
            record.insert(field.name, field.value);
        }
        record
    }
}

impl<K, V> FromIterator<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Bytes>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        record.extend(iter);
        record
    }
}

impl<K, V> Extend<(K, V)> for Record
where
    K: Into<String>,
    V: Into<Bytes>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.insert(name, value);
        }
    }
}

impl IntoIterator for Record {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
