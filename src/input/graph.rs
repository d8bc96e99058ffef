//! Graph input for traversal and shortest-path traces
//!
//! Vertices are identified by dense ids `0..n` in declaration order, each with
//! a display label. Adjacency lists keep edge insertion order, which is the
//! order traversals examine neighbours in.

use super::InputError;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// A (possibly weighted) edge between two vertex ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Edge {
    pub from: usize,
    pub to: usize,
    pub weight: i64,
}

/// Graph with a designated source vertex
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Graph {
    labels: Vec<String>,
    edges: Vec<Edge>,
    directed: bool,
    source: usize,
    #[serde(skip)]
    adjacency: Vec<Vec<(usize, i64)>>,
}

impl Graph {
    /// Parse an undirected edge list such as `"A-B, A-C:4, B-D"`
    ///
    /// Vertices are declared in order of first appearance. Weights default to 1.
    /// The source defaults to the first vertex.
    pub fn parse(edges: &str, source: Option<&str>) -> Result<Graph, InputError> {
        let mut builder = GraphBuilder::undirected();

        for raw in edges.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (pair, weight) = match raw.split_once(':') {
                Some((pair, weight)) => {
                    let weight = weight.trim().parse::<i64>().map_err(|_| {
                        InputError::InvalidWeight {
                            edge: raw.to_string(),
                            weight: weight.trim().to_string(),
                        }
                    })?;
                    (pair, weight)
                }
                None => (raw, 1),
            };

            let (from, to) = pair
                .split_once('-')
                .map(|(a, b)| (a.trim(), b.trim()))
                .filter(|(a, b)| !a.is_empty() && !b.is_empty())
                .ok_or_else(|| InputError::MalformedEdge(raw.to_string()))?;

            builder.ensure_vertex(from);
            builder.ensure_vertex(to);
            builder.edge(from, to, weight)?;
        }

        if let Some(source) = source {
            builder.source(source)?;
        }
        builder.build()
    }

    pub fn builder(directed: bool) -> GraphBuilder {
        if directed {
            GraphBuilder::directed()
        } else {
            GraphBuilder::undirected()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Label of a vertex id. Unknown ids render as `?`.
    pub fn label(&self, id: usize) -> &str {
        self.labels.get(id).map(String::as_str).unwrap_or("?")
    }

    pub fn id_of(&self, label: &str) -> Option<usize> {
        self.labels.iter().position(|l| l == label)
    }

    /// Neighbours of `id` with edge weights, in insertion order
    pub fn neighbors(&self, id: usize) -> &[(usize, i64)] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn source(&self) -> usize {
        self.source
    }

    /// Same graph, traversed from a different vertex
    pub fn with_source(mut self, label: &str) -> Result<Graph, InputError> {
        self.source = self
            .id_of(label)
            .ok_or_else(|| InputError::UnknownVertex(label.to_string()))?;
        Ok(self)
    }

    /// Canonical key for the edge `from -> to`; undirected edges are stored as `(min, max)`
    pub fn edge_key(&self, from: usize, to: usize) -> (usize, usize) {
        if self.directed {
            (from, to)
        } else {
            (from.min(to), from.max(to))
        }
    }
}

/// Incremental graph construction with label lookup
#[derive(Debug, Clone, Default)]
pub struct GraphBuilder {
    labels: Vec<String>,
    index: FxHashMap<String, usize>,
    edges: Vec<Edge>,
    directed: bool,
    source: Option<usize>,
}

impl GraphBuilder {
    pub fn undirected() -> Self {
        Self::default()
    }

    pub fn directed() -> Self {
        GraphBuilder {
            directed: true,
            ..Self::default()
        }
    }

    /// Declare a new vertex, returning its id
    pub fn vertex(&mut self, label: &str) -> Result<usize, InputError> {
        if self.index.contains_key(label) {
            return Err(InputError::DuplicateVertex(label.to_string()));
        }
        Ok(self.ensure_vertex(label))
    }

    /// Id of `label`, declaring it first if needed
    pub fn ensure_vertex(&mut self, label: &str) -> usize {
        if let Some(&id) = self.index.get(label) {
            return id;
        }
        let id = self.labels.len();
        self.labels.push(label.to_string());
        self.index.insert(label.to_string(), id);
        id
    }

    /// Add an edge between two declared vertices
    pub fn edge(&mut self, from: &str, to: &str, weight: i64) -> Result<&mut Self, InputError> {
        let from = self.lookup(from)?;
        let to = self.lookup(to)?;
        self.edges.push(Edge { from, to, weight });
        Ok(self)
    }

    pub fn source(&mut self, label: &str) -> Result<&mut Self, InputError> {
        self.source = Some(self.lookup(label)?);
        Ok(self)
    }

    pub fn build(self) -> Result<Graph, InputError> {
        if self.labels.is_empty() {
            return Err(InputError::EmptyGraph);
        }

        let mut adjacency = vec![Vec::new(); self.labels.len()];
        for edge in &self.edges {
            adjacency[edge.from].push((edge.to, edge.weight));
            if !self.directed && edge.from != edge.to {
                adjacency[edge.to].push((edge.from, edge.weight));
            }
        }

        Ok(Graph {
            labels: self.labels,
            edges: self.edges,
            directed: self.directed,
            source: self.source.unwrap_or(0),
            adjacency,
        })
    }

    fn lookup(&self, label: &str) -> Result<usize, InputError> {
        self.index
            .get(label)
            .copied()
            .ok_or_else(|| InputError::UnknownVertex(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_keeps_adjacency_order() {
        let graph = Graph::parse("A-B, A-C, B-D", None).unwrap();

        assert_eq!(graph.labels(), ["A", "B", "C", "D"]);
        assert_eq!(graph.source(), 0);
        assert_eq!(graph.neighbors(0), [(1, 1), (2, 1)]);
        assert_eq!(graph.neighbors(1), [(0, 1), (3, 1)]);
        assert_eq!(graph.neighbors(3), [(1, 1)]);
    }

    #[test]
    fn test_parse_weights_and_source() {
        let graph = Graph::parse("A-B:4, A-C:2, C-B:1", Some("C")).unwrap();
        assert_eq!(graph.source(), 2);
        assert_eq!(graph.neighbors(2), [(0, 2), (1, 1)]);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Graph::parse("A-B, AC", None),
            Err(InputError::MalformedEdge("AC".to_string()))
        );
        assert_eq!(
            Graph::parse("A-B:x", None),
            Err(InputError::InvalidWeight {
                edge: "A-B:x".to_string(),
                weight: "x".to_string()
            })
        );
        assert_eq!(
            Graph::parse("A-B", Some("Z")),
            Err(InputError::UnknownVertex("Z".to_string()))
        );
        assert_eq!(Graph::parse("", None), Err(InputError::EmptyGraph));
    }

    #[test]
    fn test_directed_builder() {
        let mut builder = GraphBuilder::directed();
        builder.vertex("s").unwrap();
        builder.vertex("t").unwrap();
        assert_eq!(
            builder.vertex("s"),
            Err(InputError::DuplicateVertex("s".to_string()))
        );
        builder.edge("s", "t", 3).unwrap();
        let graph = builder.build().unwrap();

        assert!(graph.is_directed());
        assert_eq!(graph.neighbors(0), [(1, 3)]);
        assert!(graph.neighbors(1).is_empty());
        assert_eq!(graph.edge_key(1, 0), (1, 0));
    }

    #[test]
    fn test_with_source() {
        let graph = Graph::parse("A-B", None).unwrap().with_source("B").unwrap();
        assert_eq!(graph.source(), 1);
        assert_eq!(graph.edge_key(1, 0), (0, 1));
    }
}
