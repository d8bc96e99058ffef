//! Seeded demo inputs built on `ChaCha8Rng`

use super::graph::{Graph, GraphBuilder};
use super::tree::BinaryTree;
use super::InputError;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (inclusive) for random array values, matching the bar heights of the viewer
pub const MAX_RANDOM_VALUE: i64 = 99;

/// Reproducible source of demo arrays, graphs and trees
///
/// Two instances created with the same seed produce the same sequence of
/// inputs, so a demo session can be replayed exactly.
#[derive(Debug, Clone)]
pub struct DemoInputs {
    seed: u64,
    rng: ChaCha8Rng,
}

impl DemoInputs {
    pub fn new(seed: u64) -> Self {
        DemoInputs {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// `len` values in `1..=MAX_RANDOM_VALUE`
    pub fn array(&mut self, len: usize) -> Vec<i64> {
        (0..len)
            .map(|_| self.rng.gen_range(1..=MAX_RANDOM_VALUE))
            .collect()
    }

    /// Ascending array, for binary search demos
    pub fn sorted_array(&mut self, len: usize) -> Vec<i64> {
        let mut values = self.array(len);
        values.sort_unstable();
        values
    }

    /// A target that is present in `values` roughly two times out of three
    pub fn target_for(&mut self, values: &[i64]) -> i64 {
        match values.choose(&mut self.rng) {
            Some(&hit) if self.rng.gen_bool(2.0 / 3.0) => hit,
            _ => self.rng.gen_range(1..=MAX_RANDOM_VALUE),
        }
    }

    /// Connected undirected graph with `vertices` vertices labelled `A`, `B`, ...
    ///
    /// A random spanning tree guarantees connectivity; a few extra edges add
    /// cycles. Weights are in `1..=9`.
    pub fn graph(&mut self, vertices: usize) -> Result<Graph, InputError> {
        let vertices = vertices.clamp(1, 26);
        let mut builder = GraphBuilder::undirected();
        let labels: Vec<String> = (0..vertices)
            .map(|i| char::from(b'A' + i as u8).to_string())
            .collect();
        for label in &labels {
            builder.vertex(label)?;
        }

        let mut edges: Vec<(usize, usize)> = Vec::new();
        for child in 1..vertices {
            let parent = self.rng.gen_range(0..child);
            edges.push((parent, child));
        }

        let extra = vertices / 3;
        for _ in 0..extra {
            let a = self.rng.gen_range(0..vertices);
            let b = self.rng.gen_range(0..vertices);
            let (a, b) = (a.min(b), a.max(b));
            if a != b && !edges.contains(&(a, b)) {
                edges.push((a, b));
            }
        }

        for (a, b) in edges {
            let weight = self.rng.gen_range(1..=9);
            builder.edge(&labels[a], &labels[b], weight)?;
        }
        builder.build()
    }

    /// Binary search tree built from `nodes` distinct values
    pub fn tree(&mut self, nodes: usize) -> BinaryTree {
        let mut pool: Vec<i64> = (1..=MAX_RANDOM_VALUE).collect();
        pool.shuffle(&mut self.rng);
        pool.truncate(nodes.min(pool.len()));
        BinaryTree::from_values(&pool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_inputs() {
        let mut a = DemoInputs::new(42);
        let mut b = DemoInputs::new(42);

        assert_eq!(a.array(10), b.array(10));
        assert_eq!(a.graph(6).unwrap(), b.graph(6).unwrap());
        assert_eq!(a.tree(7), b.tree(7));
    }

    #[test]
    fn test_array_bounds() {
        let mut demo = DemoInputs::new(7);
        let values = demo.array(50);
        assert_eq!(values.len(), 50);
        assert!(values.iter().all(|v| (1..=MAX_RANDOM_VALUE).contains(v)));

        let sorted = demo.sorted_array(20);
        assert!(sorted.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn test_random_graph_is_connected() {
        let mut demo = DemoInputs::new(3);
        let graph = demo.graph(8).unwrap();
        assert_eq!(graph.vertex_count(), 8);

        let mut seen = vec![false; 8];
        let mut stack = vec![graph.source()];
        while let Some(v) = stack.pop() {
            if !std::mem::replace(&mut seen[v], true) {
                stack.extend(graph.neighbors(v).iter().map(|(n, _)| *n));
            }
        }
        assert!(seen.into_iter().all(|s| s));
    }

    #[test]
    fn test_random_tree_has_distinct_values() {
        let mut demo = DemoInputs::new(11);
        let tree = demo.tree(9);
        assert_eq!(tree.len(), 9);

        let mut values: Vec<i64> = tree.nodes().iter().map(|n| n.value).collect();
        values.sort_unstable();
        values.dedup();
        assert_eq!(values.len(), 9);
    }
}
