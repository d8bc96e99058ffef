//! Graph trace generators
//!
//! Vertices are examined in adjacency-list order. The `visited` role always
//! reflects every vertex discovered so far; `frontier` is the DFS call stack,
//! the BFS queue, or the Dijkstra vertices with a finite tentative distance
//! that are not yet settled.

use super::errors::GenerateError;
use super::StepSink;
use crate::input::Graph;
use crate::step::{AlgorithmId, GraphStep, HighlightRoles, Role, Step, StepAction, StepState, Trace};
use std::collections::{BTreeSet, VecDeque};

pub fn generate(algorithm: AlgorithmId, graph: &Graph) -> Result<Trace, GenerateError> {
    if graph.vertex_count() == 0 {
        return Err(GenerateError::empty(algorithm));
    }
    if graph.source() >= graph.vertex_count() {
        return Err(GenerateError::UnknownSource {
            source_id: graph.source(),
        });
    }

    let mut run = GraphRun::new(graph);
    match algorithm {
        AlgorithmId::DepthFirstSearch => depth_first(&mut run),
        AlgorithmId::BreadthFirstSearch => breadth_first(&mut run),
        AlgorithmId::Dijkstra => dijkstra(&mut run)?,
        other => {
            return Err(GenerateError::WrongFamily {
                algorithm: other.title(),
                family: "graph",
            })
        }
    }
    Ok(run.sink.into_trace(algorithm))
}

/// Recorder for one traversal: the evolving step state plus the visited set
struct GraphRun<'a> {
    graph: &'a Graph,
    sink: StepSink,
    visited: BTreeSet<usize>,
    state: GraphStep,
}

impl<'a> GraphRun<'a> {
    fn new(graph: &'a Graph) -> Self {
        GraphRun {
            graph,
            sink: StepSink::new(),
            visited: BTreeSet::new(),
            state: GraphStep::default(),
        }
    }

    fn emit(&mut self, action: StepAction, roles: HighlightRoles, message: String) {
        let roles = roles
            .with(Role::Visited, self.visited.iter().copied())
            .with(Role::Frontier, self.state.pending.iter().copied());
        self.sink.push(Step::new(
            message,
            action,
            roles,
            StepState::Graph(self.state.clone()),
        ));
    }

    /// Start step: no highlighting, nothing traversed
    fn start(&mut self, message: String) {
        self.sink.push(Step::new(
            message,
            StepAction::Start,
            HighlightRoles::new(),
            StepState::Graph(self.state.clone()),
        ));
    }

    fn label(&self, id: usize) -> &'a str {
        self.graph.label(id)
    }

    fn labels(&self, ids: &[usize]) -> String {
        ids.iter()
            .map(|&id| self.graph.label(id))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn depth_first(run: &mut GraphRun) {
    let source = run.graph.source();
    run.start(format!(
        "Starting depth-first search from vertex {}. We'll go as deep as possible before backtracking.",
        run.label(source)
    ));

    let mut stack = Vec::new();
    visit(run, source, &mut stack);

    run.state.examining = None;
    let order = run.labels(&run.state.order);
    run.emit(
        StepAction::Complete,
        HighlightRoles::new(),
        format!("Depth-first search complete. Visit order: {}", order),
    );
}

fn visit(run: &mut GraphRun, vertex: usize, stack: &mut Vec<usize>) {
    run.visited.insert(vertex);
    run.state.order.push(vertex);
    stack.push(vertex);
    run.state.pending = stack.clone();
    run.state.examining = None;

    let message = format!(
        "Visiting vertex {}. Current stack: [{}]",
        run.label(vertex),
        run.labels(stack)
    );
    run.emit(
        StepAction::Enter { vertex },
        HighlightRoles::new().with(Role::Current, [vertex]),
        message,
    );

    let graph = run.graph;
    for &(next, _) in graph.neighbors(vertex) {
        run.state.examining = Some((vertex, next));
        let fresh = !run.visited.contains(&next);
        let message = if fresh {
            run.state.traversed.insert(run.graph.edge_key(vertex, next));
            format!(
                "Examining edge {}-{}: {} is unvisited, descending.",
                run.label(vertex),
                run.label(next),
                run.label(next)
            )
        } else {
            format!(
                "Examining edge {}-{}: {} was already visited.",
                run.label(vertex),
                run.label(next),
                run.label(next)
            )
        };
        run.emit(
            StepAction::Examine {
                from: vertex,
                to: next,
            },
            HighlightRoles::new().with(Role::Current, [vertex]),
            message,
        );

        if fresh {
            visit(run, next, stack);
        }
    }

    stack.pop();
    run.state.pending = stack.clone();
    run.state.examining = None;

    let message = match stack.last() {
        Some(&parent) => format!(
            "Finished exploring {}, backtracking to {}.",
            run.label(vertex),
            run.label(parent)
        ),
        None => format!("Finished exploring {}, the stack is empty.", run.label(vertex)),
    };
    run.emit(
        StepAction::Backtrack { vertex },
        HighlightRoles::new().with(Role::Current, stack.last().copied()),
        message,
    );
}

fn breadth_first(run: &mut GraphRun) {
    let graph = run.graph;
    let source = graph.source();
    run.start(format!(
        "Starting breadth-first search from vertex {}. Vertices are explored level by level using a queue.",
        run.label(source)
    ));

    let mut queue = VecDeque::from([source]);
    run.visited.insert(source);
    run.state.order.push(source);
    run.state.pending = vec![source];
    let message = format!("Enqueued source vertex {}. Queue: [{}]", run.label(source), run.label(source));
    run.emit(
        StepAction::Enqueue { vertex: source },
        HighlightRoles::new(),
        message,
    );

    while let Some(vertex) = queue.pop_front() {
        run.state.pending = queue.iter().copied().collect();
        run.state.examining = None;
        let message = format!(
            "Dequeued vertex {}. Queue: [{}]",
            run.label(vertex),
            run.labels(&run.state.pending)
        );
        run.emit(
            StepAction::Dequeue { vertex },
            HighlightRoles::new().with(Role::Current, [vertex]),
            message,
        );

        for &(next, _) in graph.neighbors(vertex) {
            run.state.examining = Some((vertex, next));

            if run.visited.contains(&next) {
                let message = format!(
                    "Examining edge {}-{}: {} was already visited.",
                    run.label(vertex),
                    run.label(next),
                    run.label(next)
                );
                run.emit(
                    StepAction::Examine {
                        from: vertex,
                        to: next,
                    },
                    HighlightRoles::new().with(Role::Current, [vertex]),
                    message,
                );
                continue;
            }

            let message = format!(
                "Examining edge {}-{}: {} is unvisited.",
                run.label(vertex),
                run.label(next),
                run.label(next)
            );
            run.emit(
                StepAction::Examine {
                    from: vertex,
                    to: next,
                },
                HighlightRoles::new().with(Role::Current, [vertex]),
                message,
            );

            run.visited.insert(next);
            run.state.order.push(next);
            run.state.traversed.insert(run.graph.edge_key(vertex, next));
            queue.push_back(next);
            run.state.pending = queue.iter().copied().collect();
            let message = format!(
                "Marked {} as visited and enqueued it. Queue: [{}]",
                run.label(next),
                run.labels(&run.state.pending)
            );
            run.emit(
                StepAction::Enqueue { vertex: next },
                HighlightRoles::new().with(Role::Current, [vertex]),
                message,
            );
        }
    }

    run.state.examining = None;
    let order = run.labels(&run.state.order);
    run.emit(
        StepAction::Complete,
        HighlightRoles::new(),
        format!("Breadth-first search complete. Visit order: {}", order),
    );
}

fn dijkstra(run: &mut GraphRun) -> Result<(), GenerateError> {
    let graph = run.graph;
    if let Some(edge) = graph.edges().iter().find(|e| e.weight < 0) {
        return Err(GenerateError::NegativeWeight {
            from: graph.label(edge.from).to_string(),
            to: graph.label(edge.to).to_string(),
            weight: edge.weight,
        });
    }

    let n = graph.vertex_count();
    let source = graph.source();
    let mut distances: Vec<Option<i64>> = vec![None; n];
    let mut predecessor: Vec<Option<usize>> = vec![None; n];
    let mut settled = vec![false; n];
    distances[source] = Some(0);

    run.state.distances = Some(distances.clone());
    run.state.pending = vec![source];
    run.start(format!(
        "Starting Dijkstra's algorithm from vertex {}. Its distance is 0; every other distance starts at infinity.",
        graph.label(source)
    ));

    // Linear scan; strict `<` keeps the lowest vertex id on ties
    let closest = |distances: &[Option<i64>], settled: &[bool]| {
        let mut best: Option<(usize, i64)> = None;
        for (vertex, distance) in distances.iter().enumerate() {
            if let (Some(d), false) = (*distance, settled[vertex]) {
                if best.map_or(true, |(_, b)| d < b) {
                    best = Some((vertex, d));
                }
            }
        }
        best
    };

    while let Some((vertex, distance)) = closest(&distances, &settled) {
        settled[vertex] = true;
        run.visited.insert(vertex);
        run.state.order.push(vertex);
        run.state.pending = pending(&distances, &settled);
        run.state.examining = None;
        run.emit(
            StepAction::Settle { vertex, distance },
            HighlightRoles::new().with(Role::Current, [vertex]),
            format!(
                "Settled vertex {} with shortest distance {}.",
                graph.label(vertex),
                distance
            ),
        );

        for &(next, weight) in graph.neighbors(vertex) {
            if settled[next] {
                continue;
            }
            run.state.examining = Some((vertex, next));
            let candidate = distance.checked_add(weight).ok_or_else(|| {
                GenerateError::DistanceOverflow {
                    from: graph.label(vertex).to_string(),
                    to: graph.label(next).to_string(),
                }
            })?;

            let current = distances[next];
            match current {
                Some(current) if current <= candidate => {
                    run.emit(
                        StepAction::Examine {
                            from: vertex,
                            to: next,
                        },
                        HighlightRoles::new().with(Role::Current, [vertex]),
                        format!(
                            "Path to {} through {} costs {}, no better than the current {}.",
                            graph.label(next),
                            graph.label(vertex),
                            candidate,
                            current
                        ),
                    );
                }
                previous => {
                    distances[next] = Some(candidate);
                    predecessor[next] = Some(vertex);
                    run.state.distances = Some(distances.clone());
                    run.state.pending = pending(&distances, &settled);
                    run.state.traversed = predecessor
                        .iter()
                        .enumerate()
                        .filter_map(|(v, p)| p.map(|p| graph.edge_key(p, v)))
                        .collect();

                    let was = previous.map_or("infinity".to_string(), |d| d.to_string());
                    run.emit(
                        StepAction::Relax {
                            from: vertex,
                            to: next,
                            distance: candidate,
                        },
                        HighlightRoles::new().with(Role::Current, [vertex]),
                        format!(
                            "Updated distance of {} from {} to {} through {}.",
                            graph.label(next),
                            was,
                            candidate,
                            graph.label(vertex)
                        ),
                    );
                }
            }
        }
    }

    run.state.examining = None;
    run.state.pending.clear();
    let summary = distances
        .iter()
        .enumerate()
        .map(|(v, d)| match d {
            Some(d) => format!("{}={}", graph.label(v), d),
            None => format!("{}=infinity", graph.label(v)),
        })
        .collect::<Vec<_>>()
        .join(", ");
    run.emit(
        StepAction::Complete,
        HighlightRoles::new(),
        format!(
            "Dijkstra's algorithm complete. Shortest distances from {}: {}",
            graph.label(source),
            summary
        ),
    );
    Ok(())
}

fn pending(distances: &[Option<i64>], settled: &[bool]) -> Vec<usize> {
    distances
        .iter()
        .enumerate()
        .filter(|(v, d)| d.is_some() && !settled[*v])
        .map(|(v, _)| v)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(trace: &Trace) -> Vec<usize> {
        match &trace.last().unwrap().state {
            StepState::Graph(graph) => graph.order.clone(),
            other => panic!("expected graph state, got {:?}", other),
        }
    }

    fn final_distances(trace: &Trace) -> Vec<Option<i64>> {
        match &trace.last().unwrap().state {
            StepState::Graph(graph) => graph.distances.clone().unwrap(),
            other => panic!("expected graph state, got {:?}", other),
        }
    }

    #[test]
    fn test_bfs_order() {
        let graph = Graph::parse("A-B, A-C, B-D", None).unwrap();
        let trace = generate(AlgorithmId::BreadthFirstSearch, &graph).unwrap();

        assert_eq!(order(&trace), vec![0, 1, 2, 3]);
        assert!(trace.steps()[0].roles.is_empty());
        let visited = trace.last().unwrap().role(Role::Visited).unwrap();
        assert_eq!(visited.len(), 4);
    }

    #[test]
    fn test_bfs_visited_on_enqueue() {
        let graph = Graph::parse("A-B, A-C, B-D", None).unwrap();
        let trace = generate(AlgorithmId::BreadthFirstSearch, &graph).unwrap();

        for step in trace.iter() {
            if let StepAction::Enqueue { vertex } = step.action {
                assert!(step.roles.contains(Role::Visited, vertex));
                assert!(step.roles.contains(Role::Frontier, vertex));
            }
        }
    }

    #[test]
    fn test_dfs_order_and_backtracks() {
        let graph = Graph::parse("A-B, A-C, B-D", None).unwrap();
        let trace = generate(AlgorithmId::DepthFirstSearch, &graph).unwrap();

        assert_eq!(order(&trace), vec![0, 1, 3, 2]);
        let backtracks = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Backtrack { .. }))
            .count();
        assert_eq!(backtracks, 4);
        assert_eq!(
            trace.steps()[1].message,
            "Visiting vertex A. Current stack: [A]"
        );
    }

    #[test]
    fn test_traversal_only_reaches_component() {
        let mut builder = Graph::builder(false);
        for label in ["A", "B", "C"] {
            builder.vertex(label).unwrap();
        }
        builder.edge("A", "B", 1).unwrap();
        let graph = builder.build().unwrap();

        for algorithm in [AlgorithmId::DepthFirstSearch, AlgorithmId::BreadthFirstSearch] {
            let trace = generate(algorithm, &graph).unwrap();
            let visited = trace.last().unwrap().role(Role::Visited).unwrap();
            assert_eq!(visited.iter().copied().collect::<Vec<_>>(), vec![0, 1]);
        }
    }

    #[test]
    fn test_dijkstra_distances() {
        let graph = Graph::parse("A-B:4, A-C:1, C-B:2, B-D:5", None).unwrap();
        let trace = generate(AlgorithmId::Dijkstra, &graph).unwrap();

        assert_eq!(
            final_distances(&trace),
            vec![Some(0), Some(3), Some(1), Some(8)]
        );
        assert_eq!(order(&trace), vec![0, 2, 1, 3]);
        assert!(trace
            .last()
            .unwrap()
            .message
            .ends_with("A=0, B=3, C=1, D=8"));
    }

    #[test]
    fn test_dijkstra_unreachable_stays_infinite() {
        let mut builder = Graph::builder(true);
        for label in ["s", "t", "u"] {
            builder.vertex(label).unwrap();
        }
        builder.edge("s", "t", 2).unwrap();
        builder.edge("u", "s", 1).unwrap();
        let graph = builder.build().unwrap();

        let trace = generate(AlgorithmId::Dijkstra, &graph).unwrap();
        assert_eq!(final_distances(&trace), vec![Some(0), Some(2), None]);
        assert!(trace.last().unwrap().message.ends_with("u=infinity"));
    }

    #[test]
    fn test_dijkstra_tie_prefers_lower_id() {
        let graph = Graph::parse("A-B:1, A-C:1", None).unwrap();
        let trace = generate(AlgorithmId::Dijkstra, &graph).unwrap();
        assert_eq!(order(&trace), vec![0, 1, 2]);
    }

    #[test]
    fn test_dijkstra_rejects_negative_weight() {
        let graph = Graph::parse("A-B:3, B-C:-1", None).unwrap();
        assert_eq!(
            generate(AlgorithmId::Dijkstra, &graph),
            Err(GenerateError::NegativeWeight {
                from: "B".to_string(),
                to: "C".to_string(),
                weight: -1
            })
        );
    }

    #[test]
    fn test_dijkstra_reports_distance_overflow() {
        let graph = Graph::parse("A-B:9223372036854775807, B-C:1", None).unwrap();
        assert_eq!(
            generate(AlgorithmId::Dijkstra, &graph),
            Err(GenerateError::DistanceOverflow {
                from: "B".to_string(),
                to: "C".to_string(),
            })
        );
    }
}
