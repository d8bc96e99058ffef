//! Bar chart pane for sorting and searching steps

use crate::step::{Role, Step, StepState};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Frame,
};

/// Render the array of a sort/search step as coloured bars
///
/// Bars are offset so the smallest value still has height 1; the label under
/// each bar is its index and the text inside is the real value.
pub fn render_array_pane(frame: &mut Frame, area: Rect, step: &Step, title: &str) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal));

    let Some(array) = step.array() else {
        frame.render_widget(block, area);
        return;
    };

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let auxiliary = match &step.state {
        StepState::Sort(sort) => sort.auxiliary.as_deref(),
        _ => None,
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Length(auxiliary.map_or(0, |_| 1)),
        ])
        .split(inner);

    let floor = array.iter().copied().min().unwrap_or(0);
    let bars: Vec<Bar> = array
        .iter()
        .enumerate()
        .map(|(index, &value)| {
            let color = DEFAULT_THEME.role_color(bar_role(step, index, auxiliary.is_some()));
            Bar::default()
                .value(bar_height(value, floor))
                .text_value(value.to_string())
                .label(Line::from(index.to_string()))
                .style(Style::default().fg(color))
                .value_style(Style::default().bg(color).fg(DEFAULT_THEME.current_line_bg))
        })
        .collect();

    let chart = BarChart::default()
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width(inner.width, array.len()))
        .bar_gap(1);
    frame.render_widget(chart, rows[0]);

    frame.render_widget(Paragraph::new(search_line(&step.state)), rows[1]);
    if let Some(auxiliary) = auxiliary {
        frame.render_widget(Paragraph::new(auxiliary_line(step, auxiliary)), rows[2]);
    }
}

/// Role that colours a bar
///
/// During a merge the compared pair lives in the auxiliary copy, so the
/// working array does not show it.
fn bar_role(step: &Step, index: usize, merging: bool) -> Option<Role> {
    match step.roles.primary_role(index) {
        Some(Role::Comparing) if merging => {
            Some(Role::Range).filter(|_| step.roles.contains(Role::Range, index))
        }
        role => role,
    }
}

/// `merging from  3 4 1 2` with the compared values coloured
fn auxiliary_line(step: &Step, auxiliary: &[i64]) -> Line<'static> {
    let mut spans = vec![Span::styled(
        "merging from ",
        Style::default().fg(DEFAULT_THEME.comment),
    )];
    for (index, value) in auxiliary.iter().enumerate() {
        let style = if step.roles.contains(Role::Comparing, index) {
            Style::default()
                .fg(DEFAULT_THEME.comparing)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(DEFAULT_THEME.fg)
        };
        spans.push(Span::raw(" "));
        spans.push(Span::styled(value.to_string(), style));
    }
    Line::from(spans)
}

fn bar_height(value: i64, floor: i64) -> u64 {
    (value - floor) as u64 + 1
}

/// Widest bar that still fits every element with a one-column gap
fn bar_width(width: u16, len: usize) -> u16 {
    if len == 0 {
        return 1;
    }
    let per_bar = (width as usize / len).saturating_sub(1);
    per_bar.clamp(1, 7) as u16
}

/// `target 7 · low 3 · high 4 · mid 3` for search steps, empty otherwise
fn search_line(state: &StepState) -> Line<'static> {
    let StepState::Search(search) = state else {
        return Line::default();
    };

    let label = Style::default().fg(DEFAULT_THEME.comment);
    let value = Style::default()
        .fg(DEFAULT_THEME.fg)
        .add_modifier(Modifier::BOLD);

    let mut spans = Vec::new();
    let fields = [
        ("target", search.target.map(|t| t.to_string())),
        ("low", search.low.map(|v| v.to_string())),
        ("high", search.high.map(|v| v.to_string())),
        ("mid", search.mid.map(|v| v.to_string())),
    ];
    for (name, shown) in fields {
        let Some(shown) = shown else { continue };
        if !spans.is_empty() {
            spans.push(Span::styled(" · ", label));
        }
        spans.push(Span::styled(format!("{} ", name), label));
        spans.push(Span::styled(shown, value));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::SearchStep;

    #[test]
    fn test_bar_height_is_positive() {
        assert_eq!(bar_height(-5, -5), 1);
        assert_eq!(bar_height(10, -5), 16);
    }

    #[test]
    fn test_bar_width() {
        assert_eq!(bar_width(80, 10), 7);
        assert_eq!(bar_width(30, 10), 2);
        assert_eq!(bar_width(5, 10), 1);
        assert_eq!(bar_width(5, 0), 1);
    }

    #[test]
    fn test_merge_compare_highlights_auxiliary_copy() {
        use crate::generator::generate;
        use crate::input::Input;
        use crate::step::{AlgorithmId, StepAction};

        let trace = generate(AlgorithmId::MergeSort, &Input::Array(vec![3, 4, 1, 2]), None);
        let step = trace
            .iter()
            .filter(|s| matches!(s.action, StepAction::Compare { .. }))
            .last()
            .unwrap();
        let StepState::Sort(sort) = &step.state else {
            unreachable!()
        };
        let line = auxiliary_line(step, sort.auxiliary.as_ref().unwrap());

        let bold: Vec<&str> = line
            .spans
            .iter()
            .filter(|s| s.style.add_modifier.contains(Modifier::BOLD))
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(bold, vec!["3", "2"]);
        // Index 0 already holds the placed 1; it is not part of the comparison
        assert_eq!(bar_role(step, 0, true), Some(Role::Range));
    }

    #[test]
    fn test_search_line_skips_missing_fields() {
        let state = StepState::Search(SearchStep {
            array: vec![1, 2],
            target: Some(7),
            low: None,
            high: None,
            mid: Some(1),
        });
        let text: String = search_line(&state)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "target 7 · mid 1");
    }
}
