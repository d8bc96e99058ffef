//! Command-line configuration
//!
//! [`Args`] is the raw clap surface of the `algotrace` binary. It is checked
//! and converted into a [`ViewerConfig`], which knows how to build the
//! generator input either from user data or from seeded demo data.

use crate::constants::{
    DEFAULT_ARRAY_SIZE, DEFAULT_GRAPH_SIZE, DEFAULT_SPEED, DEFAULT_TREE_SIZE, MAX_DEMO_SIZE,
    MAX_SPEED, MIN_SPEED,
};
use crate::input::{parse_target, parse_values, BinaryTree, DemoInputs, Graph, Input, InputError};
use crate::step::{AlgorithmId, Family};
use clap::Parser;
use thiserror::Error;
use tracing::warn;

/// Step-by-step algorithm traces in the terminal
#[derive(Debug, Clone, Parser)]
#[command(name = "algotrace", version, about)]
pub struct Args {
    /// Algorithm to trace, e.g. bubble-sort, binary-search, bfs, dijkstra, in-order
    pub algorithm: AlgorithmId,

    /// Comma separated integers for sorting, searching or tree building
    #[arg(short, long, allow_hyphen_values = true)]
    pub values: Option<String>,

    /// Edge list for graph algorithms, e.g. "A-B, A-C:4, B-D"
    #[arg(short, long)]
    pub edges: Option<String>,

    /// Start vertex label for graph algorithms (default: first vertex)
    #[arg(long)]
    pub source: Option<String>,

    /// Search target
    #[arg(short, long, allow_hyphen_values = true)]
    pub target: Option<String>,

    /// Seed for random demo inputs
    #[arg(long)]
    pub seed: Option<u64>,

    /// Size of the random demo input
    #[arg(long)]
    pub size: Option<usize>,

    /// Playback speed from 1 (slowest) to 100 (fastest)
    #[arg(long, default_value_t = DEFAULT_SPEED)]
    pub speed: u32,

    /// Print the trace as JSON and exit instead of starting the viewer
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Input(#[from] InputError),

    /// Flag only meaningful for another algorithm family
    #[error("--{flag} cannot be used with {algorithm}")]
    UnusedFlag {
        flag: &'static str,
        algorithm: &'static str,
    },
}

/// Where the generator input comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// User supplied values (array algorithms, or BST insertion order for trees)
    Values(Vec<i64>),
    /// User supplied edge list plus optional source label
    Edges { edges: String, source: Option<String> },
    /// Seeded demo data of the given size
    Random { size: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerConfig {
    pub algorithm: AlgorithmId,
    pub data: DataSource,
    /// Raw target text; unparsable targets yield a degenerate trace, not an error
    pub target: Option<String>,
    pub seed: u64,
    pub speed: u32,
    pub json: bool,
}

impl TryFrom<Args> for ViewerConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let algorithm = args.algorithm;
        let family = algorithm.family();
        let unused = |flag| ConfigError::UnusedFlag {
            flag,
            algorithm: algorithm.title(),
        };

        if family != Family::Graph {
            if args.edges.is_some() {
                return Err(unused("edges"));
            }
            if args.source.is_some() {
                return Err(unused("source"));
            }
        }
        if family == Family::Graph && args.values.is_some() {
            return Err(unused("values"));
        }
        if family != Family::Searching && args.target.is_some() {
            return Err(unused("target"));
        }

        let data = match (args.values, args.edges) {
            (Some(values), _) => DataSource::Values(parse_values(&values)?),
            (None, Some(edges)) => {
                // Parse once up front so malformed edges are reported before the viewer starts
                Graph::parse(&edges, args.source.as_deref())?;
                DataSource::Edges {
                    edges,
                    source: args.source,
                }
            }
            (None, None) => DataSource::Random {
                size: args
                    .size
                    .unwrap_or_else(|| default_size(family))
                    .clamp(1, MAX_DEMO_SIZE),
            },
        };

        Ok(ViewerConfig {
            algorithm,
            data,
            target: args.target,
            seed: args.seed.unwrap_or_else(rand::random),
            speed: args.speed.clamp(MIN_SPEED, MAX_SPEED),
            json: args.json,
        })
    }
}

impl ViewerConfig {
    /// Build the generator input and search target
    ///
    /// Random data is drawn from `demo`, so repeated calls walk through the
    /// seeded sequence of demo inputs.
    pub fn build_input(&self, demo: &mut DemoInputs) -> Result<(Input, Option<i64>), InputError> {
        let family = self.algorithm.family();

        let input = match &self.data {
            DataSource::Values(values) if family == Family::Tree => {
                Input::Tree(BinaryTree::from_values(values))
            }
            DataSource::Values(values) => Input::Array(values.clone()),
            DataSource::Edges { edges, source } => {
                Input::Graph(Graph::parse(edges, source.as_deref())?)
            }
            DataSource::Random { size } => random_input(self.algorithm, *size, demo)?,
        };

        let target = match (&input, family) {
            (Input::Array(values), Family::Searching) => match &self.target {
                Some(text) => match parse_target(text) {
                    Ok(target) => Some(target),
                    Err(err) => {
                        warn!(error = %err, "ignoring invalid search target");
                        None
                    }
                },
                None => Some(demo.target_for(values)),
            },
            _ => None,
        };

        Ok((input, target))
    }

    /// Same algorithm with fresh demo data of the default size
    pub fn with_random_data(&self) -> ViewerConfig {
        let size = match self.data {
            DataSource::Random { size } => size,
            _ => default_size(self.algorithm.family()),
        };
        ViewerConfig {
            data: DataSource::Random { size },
            target: None,
            ..self.clone()
        }
    }
}

fn default_size(family: Family) -> usize {
    match family {
        Family::Sorting | Family::Searching => DEFAULT_ARRAY_SIZE,
        Family::Graph => DEFAULT_GRAPH_SIZE,
        Family::Tree => DEFAULT_TREE_SIZE,
    }
}

fn random_input(
    algorithm: AlgorithmId,
    size: usize,
    demo: &mut DemoInputs,
) -> Result<Input, InputError> {
    Ok(match algorithm.family() {
        Family::Sorting => Input::Array(demo.array(size)),
        Family::Searching if algorithm == AlgorithmId::BinarySearch => {
            Input::Array(demo.sorted_array(size))
        }
        Family::Searching => Input::Array(demo.array(size)),
        Family::Graph => Input::Graph(demo.graph(size)?),
        Family::Tree => Input::Tree(demo.tree(size)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<ViewerConfig, ConfigError> {
        let args = Args::try_parse_from(argv).unwrap();
        ViewerConfig::try_from(args)
    }

    #[test]
    fn test_user_values() {
        let config = parse(&["algotrace", "bubble", "--values", "5,2,8,1", "--seed", "1"]).unwrap();
        assert_eq!(config.algorithm, AlgorithmId::BubbleSort);
        assert_eq!(config.data, DataSource::Values(vec![5, 2, 8, 1]));
        assert_eq!(config.speed, DEFAULT_SPEED);

        let (input, target) = config.build_input(&mut DemoInputs::new(1)).unwrap();
        assert_eq!(input, Input::Array(vec![5, 2, 8, 1]));
        assert_eq!(target, None);
    }

    #[test]
    fn test_values_build_tree() {
        let config = parse(&["algotrace", "in-order", "-v", "5,3,8"]).unwrap();
        let (input, _) = config.build_input(&mut DemoInputs::new(0)).unwrap();
        assert_eq!(input, Input::Tree(BinaryTree::from_values(&[5, 3, 8])));
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert_eq!(
            parse(&["algotrace", "quick-sort", "--values", "5,x,2"]),
            Err(ConfigError::Input(InputError::InvalidNumber("x".to_string())))
        );
        assert_eq!(
            parse(&["algotrace", "quick-sort", "--values", "5"]),
            Err(ConfigError::Input(InputError::TooFewValues {
                found: 1,
                required: 2
            }))
        );
    }

    #[test]
    fn test_flags_for_other_families() {
        assert_eq!(
            parse(&["algotrace", "bfs", "--values", "1,2"]),
            Err(ConfigError::UnusedFlag {
                flag: "values",
                algorithm: "Breadth-First Search"
            })
        );
        assert!(matches!(
            parse(&["algotrace", "merge-sort", "--target", "3"]),
            Err(ConfigError::UnusedFlag { flag: "target", .. })
        ));
    }

    #[test]
    fn test_invalid_target_becomes_none() {
        let config = parse(&["algotrace", "binary-search", "-v", "1,2,3", "-t", "abc"]).unwrap();
        let (_, target) = config.build_input(&mut DemoInputs::new(0)).unwrap();
        assert_eq!(target, None);

        let config = parse(&["algotrace", "linear-search", "-v", "1,2,3", "-t", "-4"]).unwrap();
        let (_, target) = config.build_input(&mut DemoInputs::new(0)).unwrap();
        assert_eq!(target, Some(-4));
    }

    #[test]
    fn test_edges_and_source() {
        let config = parse(&["algotrace", "dfs", "--edges", "A-B, B-C", "--source", "B"]).unwrap();
        let (input, _) = config.build_input(&mut DemoInputs::new(0)).unwrap();
        match input {
            Input::Graph(graph) => assert_eq!(graph.source(), 1),
            other => panic!("expected graph, got {:?}", other),
        }

        assert_eq!(
            parse(&["algotrace", "dfs", "--edges", "A-B", "--source", "Q"]),
            Err(ConfigError::Input(InputError::UnknownVertex("Q".to_string())))
        );
    }

    #[test]
    fn test_random_input_is_seeded() {
        let config = parse(&["algotrace", "dijkstra", "--seed", "9", "--size", "5"]).unwrap();
        assert_eq!(config.data, DataSource::Random { size: 5 });

        let first = config.build_input(&mut DemoInputs::new(config.seed)).unwrap();
        let second = config.build_input(&mut DemoInputs::new(config.seed)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_speed_is_clamped() {
        let config = parse(&["algotrace", "bubble", "--speed", "250"]).unwrap();
        assert_eq!(config.speed, MAX_SPEED);
    }

    #[test]
    fn test_with_random_data() {
        let config = parse(&["algotrace", "linear-search", "-v", "4,5", "-t", "5"]).unwrap();
        let random = config.with_random_data();
        assert_eq!(random.data, DataSource::Random { size: DEFAULT_ARRAY_SIZE });
        assert_eq!(random.target, None);
        assert_eq!(random.seed, config.seed);
    }
}
