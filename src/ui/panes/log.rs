//! Step log pane: the messages of every step up to the cursor

use crate::step::Trace;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Padding, Paragraph, Wrap},
    Frame,
};

/// Render the step log
///
/// `scroll_offset` is clamped here; callers set it to `usize::MAX` to follow
/// the newest message.
pub fn render_log_pane(
    frame: &mut Frame,
    area: Rect,
    trace: &Trace,
    cursor: Option<usize>,
    scroll_offset: &mut usize,
) {
    let border_style = Style::default().fg(DEFAULT_THEME.border_normal);

    let block = Block::default()
        .title(" Steps ")
        .borders(Borders::ALL)
        .border_style(border_style);

    let Some(cursor) = cursor else {
        let hint = trace
            .first()
            .map(|step| step.message.as_str())
            .unwrap_or_default();
        let paragraph = Paragraph::new(vec![
            Line::from(Span::styled(hint.to_string(), Style::default().fg(DEFAULT_THEME.fg))),
            Line::default(),
            Line::from(Span::styled(
                "(press space to play or → to step)",
                Style::default().fg(DEFAULT_THEME.comment),
            )),
        ])
        .block(block.padding(Padding::new(1, 0, 0, 0)))
        .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        *scroll_offset = 0;
        return;
    };

    let block = block.padding(Padding::new(1, 0, 0, 0));
    let all_items: Vec<ListItem> = trace
        .iter()
        .take(cursor + 1)
        .enumerate()
        .map(|(index, step)| {
            let style = if index == cursor {
                Style::default()
                    .fg(DEFAULT_THEME.fg)
                    .bg(DEFAULT_THEME.current_line_bg)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(DEFAULT_THEME.comment)
            };
            ListItem::new(Line::from(vec![
                Span::styled(format!("{:>4} ", index + 1), Style::default().fg(DEFAULT_THEME.primary)),
                Span::styled(step.message.clone(), style),
            ]))
        })
        .collect();

    let total_items = all_items.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1

    // Clamp scroll offset only if content exceeds visible area
    if total_items > visible_height {
        let max_scroll = total_items - visible_height;
        *scroll_offset = (*scroll_offset).min(max_scroll);
    } else {
        *scroll_offset = 0;
    }

    let visible_items: Vec<ListItem> = all_items
        .into_iter()
        .skip(*scroll_offset)
        .take(visible_height)
        .collect();

    frame.render_widget(List::new(visible_items).block(block), area);
}
