//! Input side of the trace pipeline
//!
//! Generators consume an [`Input`] whose shape is fixed by the algorithm family:
//!
//! - [`Input::Array`]: numeric sequence for sorting and searching
//! - [`Input::Graph`]: vertices, edges and a source vertex ([`graph`])
//! - [`Input::Tree`]: binary tree node list ([`tree`])
//!
//! User-entered data goes through [`parse_values`], [`parse_target`] and the
//! graph/tree builders, which report problems as [`InputError`]. Demo data comes
//! from [`random::DemoInputs`], which draws from an explicitly seeded RNG.

pub mod graph;
pub mod random;
pub mod tree;

pub use graph::{Edge, Graph, GraphBuilder};
pub use random::DemoInputs;
pub use tree::{BinaryTree, TreeNode};

use serde::Serialize;
use thiserror::Error;

/// Errors raised while parsing or building inputs
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// A token in a comma separated list is not an integer
    #[error("'{0}' is not a valid integer")]
    InvalidNumber(String),

    /// Too few values for a meaningful run
    #[error("please enter at least {required} values (got {found})")]
    TooFewValues { found: usize, required: usize },

    /// Graph has no vertices
    #[error("graph has no vertices")]
    EmptyGraph,

    /// Edge or source names a vertex that was never declared
    #[error("unknown vertex '{0}'")]
    UnknownVertex(String),

    /// Vertex declared twice
    #[error("duplicate vertex '{0}'")]
    DuplicateVertex(String),

    /// Edge text is not of the form `A-B` or `A-B:weight`
    #[error("malformed edge '{0}' (expected A-B or A-B:weight)")]
    MalformedEdge(String),

    /// Edge weight is not an integer
    #[error("invalid weight '{weight}' on edge '{edge}'")]
    InvalidWeight { edge: String, weight: String },

    /// Tree node list is inconsistent
    #[error("invalid tree: {0}")]
    InvalidTree(String),
}

/// Raw data handed to a trace generator
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "shape", content = "data", rename_all = "snake_case")]
pub enum Input {
    Array(Vec<i64>),
    Graph(Graph),
    Tree(BinaryTree),
}

impl Input {
    /// Short description of the input shape, used in diagnostics
    pub fn shape(&self) -> &'static str {
        match self {
            Input::Array(_) => "array",
            Input::Graph(_) => "graph",
            Input::Tree(_) => "tree",
        }
    }
}

impl From<Vec<i64>> for Input {
    fn from(values: Vec<i64>) -> Self {
        Input::Array(values)
    }
}

impl From<Graph> for Input {
    fn from(graph: Graph) -> Self {
        Input::Graph(graph)
    }
}

impl From<BinaryTree> for Input {
    fn from(tree: BinaryTree) -> Self {
        Input::Tree(tree)
    }
}

/// Minimum number of values accepted from user input
pub const MIN_USER_VALUES: usize = 2;

/// Parse a comma separated list of integers such as `"5, 2, 8, 1"`
///
/// Blank entries (for example a trailing comma) are skipped; any other
/// token that does not parse is rejected.
pub fn parse_values(text: &str) -> Result<Vec<i64>, InputError> {
    let values = text
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<i64>()
                .map_err(|_| InputError::InvalidNumber(token.to_string()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() < MIN_USER_VALUES {
        return Err(InputError::TooFewValues {
            found: values.len(),
            required: MIN_USER_VALUES,
        });
    }

    Ok(values)
}

/// Parse a search target
pub fn parse_target(text: &str) -> Result<i64, InputError> {
    let token = text.trim();
    token
        .parse::<i64>()
        .map_err(|_| InputError::InvalidNumber(token.to_string()))
}
