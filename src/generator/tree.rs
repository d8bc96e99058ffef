//! Binary tree traversal trace generators
//!
//! All three walks are recursive and record one step per move to a child
//! (plus the initial arrival at the root) and one step per visit. A visit
//! appends the node's value to the step's output.

use super::errors::GenerateError;
use super::{join_values, StepSink};
use crate::input::BinaryTree;
use crate::step::{AlgorithmId, HighlightRoles, Role, Step, StepAction, StepState, Trace, TreeStep};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Order {
    Pre,
    In,
    Post,
}

pub fn generate(algorithm: AlgorithmId, tree: &BinaryTree) -> Result<Trace, GenerateError> {
    let order = match algorithm {
        AlgorithmId::PreOrder => Order::Pre,
        AlgorithmId::InOrder => Order::In,
        AlgorithmId::PostOrder => Order::Post,
        other => {
            return Err(GenerateError::WrongFamily {
                algorithm: other.title(),
                family: "tree traversal",
            })
        }
    };
    let Some(root) = tree.root() else {
        return Err(GenerateError::empty(algorithm));
    };

    let mut run = TreeRun {
        tree,
        order,
        sink: StepSink::new(),
        visited: BTreeSet::new(),
        state: TreeStep::default(),
    };

    let rule = match order {
        Order::Pre => "root, left, right",
        Order::In => "left, root, right",
        Order::Post => "left, right, root",
    };
    run.sink.push(Step::new(
        format!("Starting {} ({}).", algorithm.title().to_lowercase(), rule),
        StepAction::Start,
        HighlightRoles::new(),
        StepState::Tree(TreeStep::default()),
    ));

    run.walk(root, None);

    run.state.at = None;
    run.state.path.clear();
    let output = join_values(&run.state.output);
    run.emit(
        StepAction::Complete,
        HighlightRoles::new(),
        format!("{} complete. Output: {}", algorithm.title(), output),
    );

    Ok(run.sink.into_trace(algorithm))
}

struct TreeRun<'a> {
    tree: &'a BinaryTree,
    order: Order,
    sink: StepSink,
    visited: BTreeSet<usize>,
    state: TreeStep,
}

impl TreeRun<'_> {
    fn emit(&mut self, action: StepAction, roles: HighlightRoles, message: String) {
        let ancestors = self
            .state
            .path
            .iter()
            .copied()
            .filter(|&id| Some(id) != self.state.at);
        let roles = roles
            .with(Role::Visited, self.visited.iter().copied())
            .with(Role::Frontier, ancestors);
        self.sink.push(Step::new(
            message,
            action,
            roles,
            StepState::Tree(self.state.clone()),
        ));
    }

    fn value(&self, id: usize) -> i64 {
        self.tree.node(id).map_or(0, |n| n.value)
    }

    fn walk(&mut self, id: usize, from: Option<usize>) {
        let tree = self.tree;
        let Some(node) = tree.node(id) else {
            return;
        };
        let (left, right) = (node.left, node.right);

        self.state.path.push(id);
        self.state.at = Some(id);
        let message = match from {
            None => format!("Starting at the root node with value {}.", node.value),
            Some(parent) => {
                let side = if tree.node(parent).and_then(|p| p.left) == Some(id) {
                    "left"
                } else {
                    "right"
                };
                format!(
                    "Moving to the {} child of {}: node with value {}.",
                    side,
                    self.value(parent),
                    node.value
                )
            }
        };
        self.emit(
            StepAction::Descend { from, to: id },
            HighlightRoles::new().with(Role::Current, [id]),
            message,
        );

        if self.order == Order::Pre {
            self.visit(id);
        }
        if let Some(left) = left {
            self.walk(left, Some(id));
        }
        if self.order == Order::In {
            self.visit(id);
        }
        if let Some(right) = right {
            self.walk(right, Some(id));
        }
        if self.order == Order::Post {
            self.visit(id);
        }

        self.state.path.pop();
    }

    fn visit(&mut self, id: usize) {
        let value = self.value(id);
        self.state.at = Some(id);
        self.state.output.push(value);
        self.visited.insert(id);

        let message = format!(
            "Visiting node with value {}. Output so far: {}",
            value,
            join_values(&self.state.output)
        );
        self.emit(
            StepAction::Visit { node: id },
            HighlightRoles::new().with(Role::Current, [id]),
            message,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(trace: &Trace) -> Vec<i64> {
        match &trace.last().unwrap().state {
            StepState::Tree(tree) => tree.output.clone(),
            other => panic!("expected tree state, got {:?}", other),
        }
    }

    fn sample() -> BinaryTree {
        //        5
        //      3   8
        //     1 4    9
        BinaryTree::from_values(&[5, 3, 8, 1, 4, 9])
    }

    #[test]
    fn test_in_order_is_ascending() {
        let trace = generate(AlgorithmId::InOrder, &sample()).unwrap();
        assert_eq!(output(&trace), vec![1, 3, 4, 5, 8, 9]);
        assert!(trace.steps()[0].roles.is_empty());
        assert_eq!(
            trace.last().unwrap().role(Role::Visited).map(|v| v.len()),
            Some(6)
        );
    }

    #[test]
    fn test_pre_and_post_order() {
        let pre = generate(AlgorithmId::PreOrder, &sample()).unwrap();
        assert_eq!(output(&pre), vec![5, 3, 1, 4, 8, 9]);

        let post = generate(AlgorithmId::PostOrder, &sample()).unwrap();
        assert_eq!(output(&post), vec![1, 4, 3, 9, 8, 5]);
    }

    #[test]
    fn test_step_counts() {
        let trace = generate(AlgorithmId::InOrder, &sample()).unwrap();
        let descends = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Descend { .. }))
            .count();
        let visits = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Visit { .. }))
            .count();

        assert_eq!(descends, 6);
        assert_eq!(visits, 6);
        // start + descends + visits + complete
        assert_eq!(trace.len(), 14);
    }

    #[test]
    fn test_descend_messages() {
        let trace = generate(AlgorithmId::PreOrder, &sample()).unwrap();
        assert_eq!(
            trace.steps()[1].message,
            "Starting at the root node with value 5."
        );
        assert_eq!(
            trace.steps()[3].message,
            "Moving to the left child of 5: node with value 3."
        );
    }

    #[test]
    fn test_single_node() {
        let tree = BinaryTree::from_values(&[7]);
        let trace = generate(AlgorithmId::PostOrder, &tree).unwrap();
        assert_eq!(output(&trace), vec![7]);
        assert_eq!(trace.len(), 4);
    }
}
