//! Error types for trace generation
//!
//! A [`GenerateError`] never crosses the public generation boundary: the
//! generator turns it into a one-step trace whose message is the error's
//! `Display` text.

use crate::step::AlgorithmId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    /// Collection, graph or tree has nothing to trace
    #[error("{algorithm} needs at least one element to work on.")]
    EmptyInput { algorithm: &'static str },

    /// Search requested without a target value
    #[error("Please enter a valid target value.")]
    MissingTarget,

    /// Input shape does not match the algorithm family
    #[error("{algorithm} expects {expected} input, but was given {found} input.")]
    InputMismatch {
        algorithm: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    /// Family generator asked to trace an algorithm from another family
    #[error("{algorithm} is not a {family} algorithm.")]
    WrongFamily {
        algorithm: &'static str,
        family: &'static str,
    },

    /// Source vertex id outside the graph
    #[error("Source vertex {source_id} is not part of the graph.")]
    UnknownSource { source_id: usize },

    /// Shortest paths are only defined here for non-negative weights
    #[error("Edge {from}-{to} has negative weight {weight}; Dijkstra's algorithm needs non-negative weights.")]
    NegativeWeight {
        from: String,
        to: String,
        weight: i64,
    },

    /// Path length does not fit in an `i64`
    #[error("Path length from {from} to {to} is too large to represent.")]
    DistanceOverflow { from: String, to: String },
}

impl GenerateError {
    pub fn empty(algorithm: AlgorithmId) -> Self {
        GenerateError::EmptyInput {
            algorithm: algorithm.title(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GenerateError::empty(AlgorithmId::MergeSort).to_string(),
            "Merge Sort needs at least one element to work on."
        );
        assert_eq!(
            GenerateError::NegativeWeight {
                from: "A".to_string(),
                to: "B".to_string(),
                weight: -2
            }
            .to_string(),
            "Edge A-B has negative weight -2; Dijkstra's algorithm needs non-negative weights."
        );
    }
}
