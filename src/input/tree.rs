//! Binary tree input for traversal traces
//!
//! The tree is a flat node list: each [`TreeNode`] records its id (its index
//! in the list), value, parent/left/right links and depth. Trees are either
//! built by binary-search-tree insertion ([`BinaryTree::from_values`]) or
//! checked for consistency when supplied directly ([`BinaryTree::from_nodes`]).

use super::InputError;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub id: usize,
    pub value: i64,
    pub parent: Option<usize>,
    pub left: Option<usize>,
    pub right: Option<usize>,
    pub depth: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct BinaryTree {
    nodes: Vec<TreeNode>,
    root: Option<usize>,
}

impl BinaryTree {
    /// Build a binary search tree by inserting `values` in order
    ///
    /// Smaller values go left, equal or larger values go right.
    pub fn from_values(values: &[i64]) -> BinaryTree {
        let mut tree = BinaryTree::default();
        for &value in values {
            tree.insert(value);
        }
        tree
    }

    /// Validate a node list supplied by the caller
    pub fn from_nodes(nodes: Vec<TreeNode>) -> Result<BinaryTree, InputError> {
        if nodes.is_empty() {
            return Ok(BinaryTree::default());
        }

        for (index, node) in nodes.iter().enumerate() {
            if node.id != index {
                return Err(InputError::InvalidTree(format!(
                    "node at position {} has id {}",
                    index, node.id
                )));
            }
        }

        let mut roots = nodes.iter().filter(|n| n.parent.is_none());
        let root = match (roots.next(), roots.next()) {
            (Some(root), None) => root.id,
            (None, _) => return Err(InputError::InvalidTree("no root node".to_string())),
            (Some(_), Some(_)) => {
                return Err(InputError::InvalidTree("more than one root node".to_string()))
            }
        };

        if nodes[root].depth != 0 {
            return Err(InputError::InvalidTree(format!(
                "root node {} has depth {}",
                root, nodes[root].depth
            )));
        }

        // Every child link must point back at its parent one level down
        for node in &nodes {
            for child in [node.left, node.right].into_iter().flatten() {
                let Some(child_node) = nodes.get(child) else {
                    return Err(InputError::InvalidTree(format!(
                        "node {} links to missing node {}",
                        node.id, child
                    )));
                };
                if child_node.parent != Some(node.id) {
                    return Err(InputError::InvalidTree(format!(
                        "node {} lists {} as a child, but its parent is {:?}",
                        node.id, child, child_node.parent
                    )));
                }
                if child_node.depth != node.depth + 1 {
                    return Err(InputError::InvalidTree(format!(
                        "node {} has depth {}, expected {}",
                        child,
                        child_node.depth,
                        node.depth + 1
                    )));
                }
            }
            if node.left.is_some() && node.left == node.right {
                return Err(InputError::InvalidTree(format!(
                    "node {} uses the same child twice",
                    node.id
                )));
            }
        }

        let tree = BinaryTree {
            nodes,
            root: Some(root),
        };

        // Parent links that are not mirrored by a child link leave nodes unreachable
        let reachable = tree.subtree_size(root);
        if reachable != tree.nodes.len() {
            return Err(InputError::InvalidTree(format!(
                "{} of {} nodes are unreachable from the root",
                tree.nodes.len() - reachable,
                tree.nodes.len()
            )));
        }

        Ok(tree)
    }

    /// Insert a value using binary-search-tree ordering, returning the new node id
    pub fn insert(&mut self, value: i64) -> usize {
        let id = self.nodes.len();
        let Some(mut current) = self.root else {
            self.nodes.push(TreeNode {
                id,
                value,
                parent: None,
                left: None,
                right: None,
                depth: 0,
            });
            self.root = Some(id);
            return id;
        };

        loop {
            let node = &self.nodes[current];
            let next = if value < node.value {
                node.left
            } else {
                node.right
            };
            match next {
                Some(child) => current = child,
                None => break,
            }
        }

        let depth = self.nodes[current].depth + 1;
        self.nodes.push(TreeNode {
            id,
            value,
            parent: Some(current),
            left: None,
            right: None,
            depth,
        });
        let parent = &mut self.nodes[current];
        if value < parent.value {
            parent.left = Some(id);
        } else {
            parent.right = Some(id);
        }
        id
    }

    pub fn root(&self) -> Option<usize> {
        self.root
    }

    pub fn node(&self, id: usize) -> Option<&TreeNode> {
        self.nodes.get(id)
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of levels; 0 for an empty tree
    pub fn height(&self) -> usize {
        self.nodes
            .iter()
            .map(|n| n.depth + 1)
            .max()
            .unwrap_or(0)
    }

    fn subtree_size(&self, id: usize) -> usize {
        let mut stack = vec![id];
        let mut count = 0;
        while let Some(current) = stack.pop() {
            count += 1;
            let node = &self.nodes[current];
            stack.extend(node.left);
            stack.extend(node.right);
        }
        count
    }
}
