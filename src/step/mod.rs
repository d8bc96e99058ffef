//! Step model shared by every trace generator
//!
//! A [`Step`] is one immutable snapshot of an algorithm run. Every step carries
//! the same base (a message, the [`HighlightRoles`] in effect and the
//! [`StepAction`] that produced it) plus a family-specific [`StepState`]:
//!
//! - [`SortStep`]: full copy of the working array
//! - [`SearchStep`]: the array being searched, the target and the search window
//! - [`GraphStep`]: traversal bookkeeping over a fixed vertex/edge set
//! - [`TreeStep`]: position and output of a binary tree walk
//!
//! Steps are grouped into a [`Trace`], which is produced in one go by the
//! generator and never patched afterwards.

mod trace;

pub use trace::{AlgorithmId, Family, Trace, UnknownAlgorithm};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Semantic tag attached to array indices or node ids within a step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Comparing,
    Swapping,
    Sorted,
    Visited,
    Current,
    Frontier,
    Eliminated,
    Found,
    /// Quick sort pivot, or the right half of a merge sort split
    Pivot,
    /// Active window: binary search range, partition range, merge range
    Range,
}

impl Role {
    /// Roles ordered from most to least visually dominant
    pub const PRIORITY: [Role; 10] = [
        Role::Found,
        Role::Swapping,
        Role::Comparing,
        Role::Current,
        Role::Pivot,
        Role::Sorted,
        Role::Frontier,
        Role::Visited,
        Role::Range,
        Role::Eliminated,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Role::Comparing => "comparing",
            Role::Swapping => "swapping",
            Role::Sorted => "sorted",
            Role::Visited => "visited",
            Role::Current => "current",
            Role::Frontier => "frontier",
            Role::Eliminated => "eliminated",
            Role::Found => "found",
            Role::Pivot => "pivot",
            Role::Range => "range",
        }
    }
}

/// Mapping from role to the set of indices / node ids holding it
///
/// Empty sets are never stored, so a step with no highlighting compares equal
/// to `HighlightRoles::default()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighlightRoles(FxHashMap<Role, BTreeSet<usize>>);

impl HighlightRoles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`HighlightRoles::set`]
    pub fn with(mut self, role: Role, ids: impl IntoIterator<Item = usize>) -> Self {
        self.set(role, ids);
        self
    }

    /// Replace the ids holding `role`
    pub fn set(&mut self, role: Role, ids: impl IntoIterator<Item = usize>) {
        let ids: BTreeSet<usize> = ids.into_iter().collect();
        if ids.is_empty() {
            self.0.remove(&role);
        } else {
            self.0.insert(role, ids);
        }
    }

    pub fn get(&self, role: Role) -> Option<&BTreeSet<usize>> {
        self.0.get(&role)
    }

    pub fn contains(&self, role: Role, id: usize) -> bool {
        self.0.get(&role).is_some_and(|ids| ids.contains(&id))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The most dominant role held by `id`, if any
    pub fn primary_role(&self, id: usize) -> Option<Role> {
        Role::PRIORITY
            .into_iter()
            .find(|role| self.contains(*role, id))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Role, &BTreeSet<usize>)> {
        self.0.iter().map(|(role, ids)| (*role, ids))
    }
}

/// What happened in a step
///
/// Mutating actions carry enough data to replay them against the previous
/// array state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepAction {
    Start,
    Compare { left: usize, right: usize },
    Swap { i: usize, j: usize },
    Assign { index: usize, value: i64 },
    MarkSorted,
    Split { start: usize, mid: usize, end: usize },
    Merging { start: usize, mid: usize, end: usize },
    Merged { start: usize, end: usize },
    Partition { low: usize, high: usize },
    Probe { index: usize },
    Narrow,
    Found { index: usize },
    NotFound,
    Enter { vertex: usize },
    Examine { from: usize, to: usize },
    Enqueue { vertex: usize },
    Dequeue { vertex: usize },
    Backtrack { vertex: usize },
    Settle { vertex: usize, distance: i64 },
    Relax { from: usize, to: usize, distance: i64 },
    Descend { from: Option<usize>, to: usize },
    Visit { node: usize },
    Complete,
    /// The request could not be traced; the message explains why
    Invalid,
}

impl StepAction {
    /// Whether this action changes the working array
    pub fn is_mutation(&self) -> bool {
        matches!(self, StepAction::Swap { .. } | StepAction::Assign { .. })
    }

    /// Apply a mutating action to `array`. Non-mutating actions are ignored.
    pub fn apply(&self, array: &mut [i64]) {
        match *self {
            StepAction::Swap { i, j } => array.swap(i, j),
            StepAction::Assign { index, value } => array[index] = value,
            _ => {}
        }
    }
}

/// Snapshot of a sorting run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortStep {
    pub array: Vec<i64>,
    /// Array as it was before the current merge began; compare roles of merge
    /// steps index into this copy
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auxiliary: Option<Vec<i64>>,
}

/// Snapshot of a search run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStep {
    pub array: Vec<i64>,
    pub target: Option<i64>,
    pub low: Option<usize>,
    pub high: Option<usize>,
    pub mid: Option<usize>,
}

/// Snapshot of a graph traversal
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GraphStep {
    /// Vertices in the order the traversal discovered them
    pub order: Vec<usize>,
    /// Queue (BFS) or recursion stack (DFS) contents, front first
    pub pending: Vec<usize>,
    /// Tree edges taken so far, normalized as `(min, max)` for undirected graphs
    pub traversed: BTreeSet<(usize, usize)>,
    /// Edge under consideration in this step
    pub examining: Option<(usize, usize)>,
    /// Tentative distances, `None` meaning infinity. Only shortest-path traces set this.
    pub distances: Option<Vec<Option<i64>>>,
}

/// Snapshot of a binary tree walk
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TreeStep {
    /// Node the walk is positioned at
    pub at: Option<usize>,
    /// Ancestors of `at`, root first
    pub path: Vec<usize>,
    /// Values emitted so far, in traversal order
    pub output: Vec<i64>,
}

/// Family-specific state of a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "family", rename_all = "snake_case")]
pub enum StepState {
    Sort(SortStep),
    Search(SearchStep),
    Graph(GraphStep),
    Tree(TreeStep),
}

/// One immutable snapshot of algorithm state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub message: String,
    pub roles: HighlightRoles,
    pub action: StepAction,
    pub state: StepState,
}

impl Step {
    pub fn new(
        message: impl Into<String>,
        action: StepAction,
        roles: HighlightRoles,
        state: StepState,
    ) -> Self {
        Step {
            message: message.into(),
            roles,
            action,
            state,
        }
    }

    /// The array shown by sort and search steps
    pub fn array(&self) -> Option<&[i64]> {
        match &self.state {
            StepState::Sort(s) => Some(&s.array),
            StepState::Search(s) => Some(&s.array),
            StepState::Graph(_) | StepState::Tree(_) => None,
        }
    }

    pub fn role(&self, role: Role) -> Option<&BTreeSet<usize>> {
        self.roles.get(role)
    }

    /// Index tagged `found`, if this step reports a match
    pub fn found_index(&self) -> Option<usize> {
        self.roles
            .get(Role::Found)
            .and_then(|ids| ids.iter().next().copied())
    }
}
