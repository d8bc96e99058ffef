//! Tree pane: the binary tree drawn sideways with box-drawing guides

use crate::input::BinaryTree;
use crate::step::{Role, Step, StepState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph},
    Frame,
};

pub fn render_tree_pane(frame: &mut Frame, area: Rect, tree: &BinaryTree, step: &Step, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let mut lines = tree_lines(tree, step);
    if let StepState::Tree(state) = &step.state {
        let output = state
            .output
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(Line::default());
        lines.push(Line::from(vec![
            Span::styled("output ", Style::default().fg(DEFAULT_THEME.comment)),
            Span::styled(output, Style::default().fg(DEFAULT_THEME.fg)),
        ]));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// One line per node, root first, children indented below their parent
fn tree_lines(tree: &BinaryTree, step: &Step) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    if let Some(root) = tree.root() {
        push_node(tree, step, root, "", None, &mut lines);
    }
    lines
}

fn push_node(
    tree: &BinaryTree,
    step: &Step,
    id: usize,
    prefix: &str,
    branch: Option<(&str, bool)>,
    lines: &mut Vec<Line<'static>>,
) {
    let Some(node) = tree.node(id) else {
        return;
    };
    let guide = Style::default().fg(DEFAULT_THEME.comment);

    let (connector, child_prefix) = match branch {
        None => (String::new(), String::new()),
        Some((side, last)) => (
            format!("{}{}{} ", prefix, if last { "└─" } else { "├─" }, side),
            format!("{}{}", prefix, if last { "    " } else { "│   " }),
        ),
    };

    let role = step.roles.primary_role(id);
    let mut style = Style::default().fg(DEFAULT_THEME.role_color(role));
    if role == Some(Role::Current) {
        style = style.add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    }
    lines.push(Line::from(vec![
        Span::styled(connector, guide),
        Span::styled(node.value.to_string(), style),
    ]));

    let children: Vec<(&str, usize)> = [("L", node.left), ("R", node.right)]
        .into_iter()
        .filter_map(|(side, child)| child.map(|c| (side, c)))
        .collect();
    for (n, &(side, child)) in children.iter().enumerate() {
        let last = n + 1 == children.len();
        push_node(tree, step, child, &child_prefix, Some((side, last)), lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate;
    use crate::input::Input;
    use crate::step::AlgorithmId;

    #[test]
    fn test_tree_lines() {
        let tree = BinaryTree::from_values(&[5, 3, 8, 4]);
        let trace = generate(AlgorithmId::InOrder, &Input::Tree(tree.clone()), None);
        let lines: Vec<String> = tree_lines(&tree, &trace.steps()[0])
            .iter()
            .map(|line| line.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();

        assert_eq!(
            lines,
            vec![
                "5".to_string(),
                "├─L 3".to_string(),
                "│   └─R 4".to_string(),
                "└─R 8".to_string(),
            ]
        );
    }
}
