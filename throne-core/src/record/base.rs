//! Base implementation of records.
//!
//! A [`Record`] is a flat map from string keys to [`RecordValue`]s. It is the
//! structured counterpart of a log line: environments fill it during a tick,
//! recorders decide what to do with it.
use crate::error::ThroneError;
use chrono::prelude::{DateTime, Local};
use std::collections::{
    hash_map::{IntoIter, Iter, Keys},
    HashMap,
};

/// Represents possible types of values that can be stored in a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValue {
    /// A single floating-point value, e.g., a reward component or a health reading.
    Scalar(f32),

    /// A timestamp with local timezone.
    DateTime(DateTime<Local>),

    /// A 1-dimensional array of floating-point values.
    Array1(Vec<f32>),

    /// A text value, e.g., the name of the dispatched action.
    String(String),
}

/// A container for storing key-value pairs of various data types.
///
/// # Examples
///
/// ```rust
/// use throne_core::record::{Record, RecordValue};
///
/// let mut record = Record::from_scalar("survival", 8.0);
/// record.insert("combat", RecordValue::Scalar(2.0));
///
/// let total: f32 = ["survival", "combat"]
///     .iter()
///     .map(|k| record.get_scalar(k).unwrap())
///     .sum();
/// assert_eq!(total, 10.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Record(HashMap<String, RecordValue>);

impl Record {
    /// Creates an empty record.
    pub fn empty() -> Self {
        Self(HashMap::new())
    }

    /// Creates a record containing a single scalar value.
    pub fn from_scalar(name: impl Into<String>, value: f32) -> Self {
        Self(HashMap::from([(name.into(), RecordValue::Scalar(value))]))
    }

    /// Creates a record from a slice of key-value pairs.
    pub fn from_slice<K: Into<String> + Clone>(s: &[(K, RecordValue)]) -> Self {
        Self(
            s.iter()
                .map(|(k, v)| (k.clone().into(), v.clone()))
                .collect(),
        )
    }

    /// Returns an iterator over the keys in the record.
    pub fn keys(&self) -> Keys<String, RecordValue> {
        self.0.keys()
    }

    /// Inserts a key-value pair into the record.
    pub fn insert(&mut self, k: impl Into<String>, v: RecordValue) {
        self.0.insert(k.into(), v);
    }

    /// Returns an iterator over the key-value pairs in the record.
    pub fn iter(&self) -> Iter<'_, String, RecordValue> {
        self.0.iter()
    }

    /// Returns an iterator that consumes the record.
    pub fn into_iter_in_record(self) -> IntoIter<String, RecordValue> {
        self.0.into_iter()
    }

    /// Gets a reference to the value associated with the given key.
    pub fn get(&self, k: &str) -> Option<&RecordValue> {
        self.0.get(k)
    }

    /// Merges two records, consuming both.
    ///
    /// Values of `record` overwrite values of `self` sharing the same key.
    pub fn merge(self, record: Record) -> Self {
        Record(self.0.into_iter().chain(record.0).collect())
    }

    /// Merges another record into this one in place.
    pub fn merge_inplace(&mut self, record: Record) {
        self.0.extend(record.0);
    }

    /// Gets a scalar value from the record.
    ///
    /// # Errors
    ///
    /// Returns an error if the key does not exist or the value is not a scalar.
    pub fn get_scalar(&self, k: &str) -> Result<f32, ThroneError> {
        match self.0.get(k) {
            Some(RecordValue::Scalar(v)) => Ok(*v),
            Some(_) => Err(ThroneError::RecordValueTypeError("Scalar".to_string())),
            None => Err(ThroneError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a 1-dimensional array from the record.
    pub fn get_array1(&self, k: &str) -> Result<Vec<f32>, ThroneError> {
        match self.0.get(k) {
            Some(RecordValue::Array1(v)) => Ok(v.clone()),
            Some(_) => Err(ThroneError::RecordValueTypeError("Array1".to_string())),
            None => Err(ThroneError::RecordKeyError(k.to_string())),
        }
    }

    /// Gets a string value from the record.
    pub fn get_string(&self, k: &str) -> Result<String, ThroneError> {
        match self.0.get(k) {
            Some(RecordValue::String(s)) => Ok(s.clone()),
            Some(_) => Err(ThroneError::RecordValueTypeError("String".to_string())),
            None => Err(ThroneError::RecordKeyError(k.to_string())),
        }
    }

    /// Checks if the record is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_get_scalar_reports_key_and_type_errors() {
        let mut record = Record::from_scalar("reward", 1.5);
        record.insert("action", RecordValue::String("jump".to_string()));

        assert_eq!(record.get_scalar("reward").unwrap(), 1.5);
        assert!(matches!(
            record.get_scalar("missing"),
            Err(ThroneError::RecordKeyError(k)) if k == "missing"
        ));
        assert!(matches!(
            record.get_scalar("action"),
            Err(ThroneError::RecordValueTypeError(_))
        ));
        assert_eq!(record.get_string("action").unwrap(), "jump");
    }

    #[test]
    fn test_get_array1() {
        let record = Record::from_slice(&[
            ("returns", RecordValue::Array1(vec![1.0, -2.5])),
            ("reward", RecordValue::Scalar(1.0)),
        ]);

        assert_eq!(record.get_array1("returns").unwrap(), vec![1.0, -2.5]);
        assert!(matches!(
            record.get_array1("reward"),
            Err(ThroneError::RecordValueTypeError(t)) if t == "Array1"
        ));
        assert!(matches!(
            record.get_array1("missing"),
            Err(ThroneError::RecordKeyError(_))
        ));
    }

    #[test]
    fn test_merge_overwrites_shared_keys() {
        let a = Record::from_slice(&[
            ("reward", RecordValue::Scalar(1.0)),
            ("combat", RecordValue::Scalar(3.0)),
        ]);
        let b = Record::from_scalar("reward", -10.0);
        let merged = a.merge(b);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get_scalar("reward").unwrap(), -10.0);
        assert_eq!(merged.get_scalar("combat").unwrap(), 3.0);

        let mut c = Record::empty();
        assert!(c.is_empty());
        c.merge_inplace(merged);
        assert_eq!(c.get_scalar("combat").unwrap(), 3.0);
    }
}
