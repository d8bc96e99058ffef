//! Graph pane: adjacency list with vertex and edge highlighting

use crate::input::Graph;
use crate::step::{GraphStep, Role, Step, StepState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

pub fn render_graph_pane(frame: &mut Frame, area: Rect, graph: &Graph, step: &Step, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let lines = match &step.state {
        StepState::Graph(state) => graph_lines(graph, step, state),
        _ => vec![Line::from("(no graph)")],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}

fn vertex_span(graph: &Graph, step: &Step, id: usize) -> Span<'static> {
    let role = step.roles.primary_role(id);
    let mut style = Style::default().fg(DEFAULT_THEME.role_color(role));
    if role == Some(Role::Current) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    Span::styled(graph.label(id).to_string(), style)
}

fn graph_lines(graph: &Graph, step: &Step, state: &GraphStep) -> Vec<Line<'static>> {
    let comment = Style::default().fg(DEFAULT_THEME.comment);
    let arrow = if graph.is_directed() { " → " } else { " — " };
    let mut lines = Vec::new();

    for vertex in 0..graph.vertex_count() {
        let mut spans = vec![vertex_span(graph, step, vertex)];
        if let Some(Some(distance)) = state.distances.as_ref().map(|d| d[vertex]) {
            spans.push(Span::styled(format!(" ({})", distance), comment));
        }
        spans.push(Span::styled(arrow, comment));

        for (n, &(next, weight)) in graph.neighbors(vertex).iter().enumerate() {
            if n > 0 {
                spans.push(Span::styled(", ", comment));
            }
            let key = graph.edge_key(vertex, next);
            let examining = state
                .examining
                .is_some_and(|(from, to)| graph.edge_key(from, to) == key);
            let edge_style = if examining {
                Style::default()
                    .fg(DEFAULT_THEME.current)
                    .add_modifier(Modifier::BOLD)
            } else if state.traversed.contains(&key) {
                Style::default().fg(DEFAULT_THEME.traversed_edge)
            } else {
                Style::default().fg(DEFAULT_THEME.edge)
            };
            spans.push(Span::styled(graph.label(next).to_string(), edge_style));
            if weight != 1 || state.distances.is_some() {
                spans.push(Span::styled(format!(":{}", weight), edge_style));
            }
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::default());
    lines.push(id_list(graph, step, "order", &state.order));
    lines.push(id_list(graph, step, "frontier", &state.pending));
    lines
}

fn id_list(graph: &Graph, step: &Step, name: &str, ids: &[usize]) -> Line<'static> {
    let comment = Style::default().fg(DEFAULT_THEME.comment);
    let mut spans = vec![Span::styled(format!("{:<9}", name), comment)];
    if ids.is_empty() {
        spans.push(Span::styled("-", comment));
    }
    for (n, &id) in ids.iter().enumerate() {
        if n > 0 {
            spans.push(Span::styled(", ", comment));
        }
        spans.push(vertex_span(graph, step, id));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::input::Input;
    use crate::step::AlgorithmId;

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_adjacency_lines() {
        let graph = Graph::parse("A-B, A-C:4", None).unwrap();
        let trace = generate(AlgorithmId::BreadthFirstSearch, &Input::Graph(graph.clone()), None);
        let step = trace.last().unwrap();
        let StepState::Graph(state) = &step.state else {
            panic!("expected graph state");
        };

        let lines = graph_lines(&graph, step, state);
        assert_eq!(text(&lines[0]), "A — B, C:4");
        assert_eq!(text(&lines[1]), "B — A");
        assert_eq!(text(&lines[4]), "order    A, B, C");
        assert_eq!(text(&lines[5]), "frontier -");
    }

    #[test]
    fn test_distances_are_shown() {
        let graph = Graph::parse("A-B:2", None).unwrap();
        let trace = generate(AlgorithmId::Dijkstra, &Input::Graph(graph.clone()), None);
        let step = trace.last().unwrap();
        let StepState::Graph(state) = &step.state else {
            panic!("expected graph state");
        };

        let lines = graph_lines(&graph, step, state);
        assert_eq!(text(&lines[1]), "B (2) — A:2");
    }
}
