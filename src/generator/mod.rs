//! Trace generation
//!
//! [`generate`] is the single entry point: it dispatches on the
//! [`AlgorithmId`] to one pure generator per family and returns the complete
//! [`Trace`]:
//!
//! - [`sorting`]: bubble, insertion, selection, merge and quick sort
//! - [`searching`]: linear and binary search
//! - [`graph`]: depth-first, breadth-first and Dijkstra
//! - [`tree`]: in-order, pre-order and post-order walks
//!
//! Generators never fail across this boundary. A malformed request (empty
//! collection, missing target, wrong input shape) produces a one-step trace
//! whose message explains the problem, so playback never special-cases
//! "no trace".
//!
//! Every generator pushes into a single [`StepSink`] threaded through its
//! helpers (including recursive ones), so steps are recorded in execution order.

pub mod errors;
pub mod graph;
pub mod searching;
pub mod sorting;
pub mod tree;

use crate::input::Input;
use crate::step::{
    AlgorithmId, Family, GraphStep, HighlightRoles, SearchStep, SortStep, Step, StepAction,
    StepState, Trace, TreeStep,
};
use errors::GenerateError;
use tracing::{debug, warn};

/// Step accumulator shared by all recursive calls of one generator run
#[derive(Debug, Default)]
pub struct StepSink {
    steps: Vec<Step>,
}

impl StepSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, step: Step) {
        self.steps.push(step);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Finish the run
    pub fn into_trace(self, algorithm: AlgorithmId) -> Trace {
        Trace::from_steps(algorithm, self.steps)
    }
}

/// Produce the trace for one `(algorithm, input[, target])` request
pub fn generate(algorithm: AlgorithmId, input: &Input, target: Option<i64>) -> Trace {
    match try_generate(algorithm, input, target) {
        Ok(trace) => {
            debug!(
                algorithm = %algorithm,
                steps = trace.len(),
                "generated trace"
            );
            trace
        }
        Err(err) => {
            warn!(algorithm = %algorithm, error = %err, "returning degenerate trace");
            degenerate(algorithm, input, target, err.to_string())
        }
    }
}

/// Same as [`generate`] but reports malformed requests as errors
pub fn try_generate(
    algorithm: AlgorithmId,
    input: &Input,
    target: Option<i64>,
) -> Result<Trace, GenerateError> {
    match (algorithm.family(), input) {
        (Family::Sorting, Input::Array(values)) => sorting::generate(algorithm, values),
        (Family::Searching, Input::Array(values)) => {
            let target = target.ok_or(GenerateError::MissingTarget)?;
            searching::generate(algorithm, values, target)
        }
        (Family::Graph, Input::Graph(graph)) => graph::generate(algorithm, graph),
        (Family::Tree, Input::Tree(binary_tree)) => tree::generate(algorithm, binary_tree),
        (family, other) => Err(GenerateError::InputMismatch {
            algorithm: algorithm.title(),
            expected: expected_shape(family),
            found: other.shape(),
        }),
    }
}

/// `[5, 2, 8]` -> `"5, 2, 8"`
pub(crate) fn join_values(values: &[i64]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn expected_shape(family: Family) -> &'static str {
    match family {
        Family::Sorting | Family::Searching => "array",
        Family::Graph => "graph",
        Family::Tree => "tree",
    }
}

/// One-step trace carrying an explanatory message
///
/// The step shows the unmodified input (when it has a shape the algorithm's
/// family can display) and no highlighting.
fn degenerate(algorithm: AlgorithmId, input: &Input, target: Option<i64>, message: String) -> Trace {
    let array = match input {
        Input::Array(values) => values.clone(),
        Input::Graph(_) | Input::Tree(_) => Vec::new(),
    };

    let state = match algorithm.family() {
        Family::Sorting => StepState::Sort(SortStep {
            array,
            auxiliary: None,
        }),
        Family::Searching => StepState::Search(SearchStep {
            array,
            target,
            low: None,
            high: None,
            mid: None,
        }),
        Family::Graph => StepState::Graph(GraphStep::default()),
        Family::Tree => StepState::Tree(TreeStep::default()),
    };

    let mut sink = StepSink::new();
    sink.push(Step::new(
        message,
        StepAction::Invalid,
        HighlightRoles::new(),
        state,
    ));
    sink.into_trace(algorithm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{BinaryTree, Graph};

    #[test]
    fn test_missing_target_is_degenerate() {
        let trace = generate(AlgorithmId::BinarySearch, &Input::Array(vec![1, 2, 3]), None);

        assert!(trace.is_degenerate());
        assert_eq!(trace.len(), 1);
        let step = &trace.steps()[0];
        assert_eq!(step.message, "Please enter a valid target value.");
        assert!(step.roles.is_empty());
        assert_eq!(step.array(), Some(&[1, 2, 3][..]));
    }

    #[test]
    fn test_empty_array_is_degenerate() {
        for algorithm in [AlgorithmId::BubbleSort, AlgorithmId::LinearSearch] {
            let trace = generate(algorithm, &Input::Array(Vec::new()), Some(4));
            assert!(trace.is_degenerate(), "{algorithm} should not trace an empty array");
            assert_eq!(trace.algorithm(), algorithm);
        }
    }

    #[test]
    fn test_shape_mismatch_is_degenerate() {
        let graph = Graph::parse("A-B", None).unwrap();
        let trace = generate(AlgorithmId::QuickSort, &Input::Graph(graph), None);
        assert!(trace.is_degenerate());
        assert_eq!(
            trace.steps()[0].message,
            "Quick Sort expects array input, but was given graph input."
        );

        let trace = generate(
            AlgorithmId::BreadthFirstSearch,
            &Input::Tree(BinaryTree::from_values(&[1])),
            None,
        );
        assert!(matches!(trace.steps()[0].state, StepState::Graph(_)));
    }

    #[test]
    fn test_try_generate_reports_errors() {
        assert_eq!(
            try_generate(AlgorithmId::LinearSearch, &Input::Array(vec![1, 2]), None),
            Err(GenerateError::MissingTarget)
        );
        assert_eq!(
            try_generate(AlgorithmId::InOrder, &Input::Tree(BinaryTree::default()), None),
            Err(GenerateError::empty(AlgorithmId::InOrder))
        );
    }

    #[test]
    fn test_huge_weights_give_degenerate_trace() {
        let graph = Graph::parse("A-B:9223372036854775807, B-C:1", None).unwrap();
        let trace = generate(AlgorithmId::Dijkstra, &Input::Graph(graph), None);

        assert!(trace.is_degenerate());
        assert_eq!(
            trace.steps()[0].message,
            "Path length from B to C is too large to represent."
        );
    }
}
