//! Peeling nested sequences down to their first usable value
//!
//! Pipelines often hand back values wrapped in one or more single-element
//! sequences (model outputs, batched results). [`untuple`] keeps taking the
//! first element until it reaches something that is not a sequence.

use log::trace;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AeiouError, Result};

/// A value that may be wrapped in arbitrarily nested sequences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    Seq(Vec<Nested<T>>),
    Leaf(T),
}

impl<T> Nested<T> {
    pub fn leaf(value: T) -> Self {
        Nested::Leaf(value)
    }

    pub fn seq(items: impl IntoIterator<Item = Nested<T>>) -> Self {
        Nested::Seq(items.into_iter().collect())
    }
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Nested::Leaf(value)
    }
}

/// Return the first non-sequence value, descending through first elements
///
/// # Errors
/// `EmptySequence` if an empty sequence is met on the way down.
pub fn untuple<T: std::fmt::Debug>(x: &Nested<T>) -> Result<&T> {
    match x {
        Nested::Seq(items) => {
            trace!("untuple: descending into sequence of {}", items.len());
            let first = items.first().ok_or(AeiouError::EmptySequence)?;
            untuple(first)
        }
        Nested::Leaf(value) => {
            trace!("untuple: reached {:?}", value);
            Ok(value)
        }
    }
}

/// [`untuple`] for JSON values: arrays are sequences, everything else is a leaf
pub fn untuple_json(x: &Value) -> Result<&Value> {
    match x {
        Value::Array(items) => {
            let first = items.first().ok_or(AeiouError::EmptySequence)?;
            untuple_json(first)
        }
        other => Ok(other),
    }
}
