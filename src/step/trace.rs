//! Trace: the ordered step history of one algorithm run

use super::{Step, StepAction};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Algorithm family, which fixes the shape of the input a generator accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    Sorting,
    Searching,
    Graph,
    Tree,
}

/// Every algorithm the generator can trace
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlgorithmId {
    BubbleSort,
    InsertionSort,
    SelectionSort,
    MergeSort,
    QuickSort,
    LinearSearch,
    BinarySearch,
    DepthFirstSearch,
    BreadthFirstSearch,
    Dijkstra,
    InOrder,
    PreOrder,
    PostOrder,
}

impl AlgorithmId {
    pub const ALL: [AlgorithmId; 13] = [
        AlgorithmId::BubbleSort,
        AlgorithmId::InsertionSort,
        AlgorithmId::SelectionSort,
        AlgorithmId::MergeSort,
        AlgorithmId::QuickSort,
        AlgorithmId::LinearSearch,
        AlgorithmId::BinarySearch,
        AlgorithmId::DepthFirstSearch,
        AlgorithmId::BreadthFirstSearch,
        AlgorithmId::Dijkstra,
        AlgorithmId::InOrder,
        AlgorithmId::PreOrder,
        AlgorithmId::PostOrder,
    ];

    pub fn family(self) -> Family {
        match self {
            AlgorithmId::BubbleSort
            | AlgorithmId::InsertionSort
            | AlgorithmId::SelectionSort
            | AlgorithmId::MergeSort
            | AlgorithmId::QuickSort => Family::Sorting,
            AlgorithmId::LinearSearch | AlgorithmId::BinarySearch => Family::Searching,
            AlgorithmId::DepthFirstSearch
            | AlgorithmId::BreadthFirstSearch
            | AlgorithmId::Dijkstra => Family::Graph,
            AlgorithmId::InOrder | AlgorithmId::PreOrder | AlgorithmId::PostOrder => Family::Tree,
        }
    }

    /// Identifier used on the command line and in serialized traces
    pub fn slug(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "bubble-sort",
            AlgorithmId::InsertionSort => "insertion-sort",
            AlgorithmId::SelectionSort => "selection-sort",
            AlgorithmId::MergeSort => "merge-sort",
            AlgorithmId::QuickSort => "quick-sort",
            AlgorithmId::LinearSearch => "linear-search",
            AlgorithmId::BinarySearch => "binary-search",
            AlgorithmId::DepthFirstSearch => "depth-first-search",
            AlgorithmId::BreadthFirstSearch => "breadth-first-search",
            AlgorithmId::Dijkstra => "dijkstra",
            AlgorithmId::InOrder => "in-order",
            AlgorithmId::PreOrder => "pre-order",
            AlgorithmId::PostOrder => "post-order",
        }
    }

    /// Human readable name
    pub fn title(self) -> &'static str {
        match self {
            AlgorithmId::BubbleSort => "Bubble Sort",
            AlgorithmId::InsertionSort => "Insertion Sort",
            AlgorithmId::SelectionSort => "Selection Sort",
            AlgorithmId::MergeSort => "Merge Sort",
            AlgorithmId::QuickSort => "Quick Sort",
            AlgorithmId::LinearSearch => "Linear Search",
            AlgorithmId::BinarySearch => "Binary Search",
            AlgorithmId::DepthFirstSearch => "Depth-First Search",
            AlgorithmId::BreadthFirstSearch => "Breadth-First Search",
            AlgorithmId::Dijkstra => "Dijkstra's Shortest Paths",
            AlgorithmId::InOrder => "In-Order Traversal",
            AlgorithmId::PreOrder => "Pre-Order Traversal",
            AlgorithmId::PostOrder => "Post-Order Traversal",
        }
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

/// Returned when parsing an unknown algorithm name
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown algorithm '{0}' (expected one of: {list})", list = AlgorithmId::ALL.map(AlgorithmId::slug).join(", "))]
pub struct UnknownAlgorithm(pub String);

impl FromStr for AlgorithmId {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('_', "-");
        let alias = match wanted.as_str() {
            "bubble" => Some(AlgorithmId::BubbleSort),
            "insertion" => Some(AlgorithmId::InsertionSort),
            "selection" => Some(AlgorithmId::SelectionSort),
            "merge" => Some(AlgorithmId::MergeSort),
            "quick" => Some(AlgorithmId::QuickSort),
            "linear" => Some(AlgorithmId::LinearSearch),
            "binary" => Some(AlgorithmId::BinarySearch),
            "dfs" => Some(AlgorithmId::DepthFirstSearch),
            "bfs" => Some(AlgorithmId::BreadthFirstSearch),
            "inorder" => Some(AlgorithmId::InOrder),
            "preorder" => Some(AlgorithmId::PreOrder),
            "postorder" => Some(AlgorithmId::PostOrder),
            _ => None,
        };

        alias
            .or_else(|| {
                AlgorithmId::ALL
                    .into_iter()
                    .find(|id| id.slug() == wanted)
            })
            .ok_or_else(|| UnknownAlgorithm(s.to_string()))
    }
}

/// Ordered, finite step history for one `(algorithm, input[, target])` request
///
/// A trace always holds at least one step. It exposes read access only; a new
/// request produces a new trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    algorithm: AlgorithmId,
    steps: Vec<Step>,
}

impl Trace {
    /// Wrap generated steps. `steps` must not be empty.
    pub(crate) fn from_steps(algorithm: AlgorithmId, steps: Vec<Step>) -> Self {
        debug_assert!(!steps.is_empty(), "a trace needs at least one step");
        Trace { algorithm, steps }
    }

    pub fn algorithm(&self) -> AlgorithmId {
        self.algorithm
    }

    /// Get a step by index
    pub fn get(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }

    /// Get the number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false for generated traces
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn first(&self) -> Option<&Step> {
        self.steps.first()
    }

    pub fn last(&self) -> Option<&Step> {
        self.steps.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Whether the trace is the single explanatory step produced for a malformed request
    pub fn is_degenerate(&self) -> bool {
        self.steps.len() == 1 && self.steps[0].action == StepAction::Invalid
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.steps.iter()
    }
}
