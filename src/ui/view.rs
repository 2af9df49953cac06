use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState},
    Frame,
};

use super::app::{App, Focus};
use crate::domain::todo::Todo;

pub const HEADERS: [&str; 5] = ["ID", "Text", "Completed", "Update", "Delete"];
pub const UPDATE_CONTROL: &str = "[u] Update";
pub const DELETE_CONTROL: &str = "[d] Delete";

pub fn completed_indicator(completed: bool) -> &'static str { if completed { "[x]" } else { "[ ]" } }

/// Cell contents of one table row, in column order.
pub fn row_cells(todo: &Todo) -> [String; 5] {
    [
        todo.id.to_string(),
        todo.text.clone(),
        completed_indicator(todo.completed).to_string(),
        UPDATE_CONTROL.to_string(),
        DELETE_CONTROL.to_string(),
    ]
}

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3), Constraint::Length(3)])
        .split(f.size());

    let header = Paragraph::new("↑/↓ select, u/Enter: update, d: delete, n/Tab: new todo, q: quit")
        .block(Block::default().borders(Borders::ALL).title("Todos"));
    f.render_widget(header, chunks[0]);

    let rows: Vec<Row> = app.list.todos().iter().map(|t| Row::new(row_cells(t).map(Cell::from))).collect();
    let table = Table::new(rows, [
        Constraint::Length(6),
        Constraint::Min(10),
        Constraint::Length(11),
        Constraint::Length(12),
        Constraint::Length(12),
    ])
    .header(Row::new(HEADERS).style(Style::default().add_modifier(Modifier::BOLD)))
    .block(Block::default().borders(Borders::ALL).title(format!("items [{}]", app.list.len())))
    .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD | Modifier::REVERSED))
    .highlight_symbol(">> ");
    let mut state = TableState::default();
    if !app.list.is_empty() && app.focus == Focus::Table { state.select(Some(app.selected)); }
    f.render_stateful_widget(table, chunks[1], &mut state);

    let form_title = if app.focus == Focus::CreateForm { "new todo (Enter to add, Esc to leave)" } else { "new todo" };
    let cursor = if app.focus == Focus::CreateForm { "_" } else { "" };
    let form = Paragraph::new(format!("{}{}", app.form.input(), cursor))
        .block(Block::default().borders(Borders::ALL).title(form_title));
    f.render_widget(form, chunks[2]);

    if let Some((id, dialog)) = app.active_dialog() {
        let area = centered_rect(60, 7, f.size());
        let lines = vec![
            Line::from(format!("Text: {}_", dialog.text())),
            Line::from(format!("Completed: {}", completed_indicator(dialog.completed()))),
            Line::from(""),
            Line::from("Enter: save  Tab: toggle  Esc: cancel"),
        ];
        let popup = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(format!("Update todo {id}")));
        f.render_widget(Clear, area);
        f.render_widget(popup, area);
    }
}

fn centered_rect(percent_x: u16, height: u16, r: Rect) -> Rect {
    let width = r.width * percent_x / 100;
    let height = height.min(r.height);
    Rect { x: r.x + (r.width - width) / 2, y: r.y + (r.height - height) / 2, width, height }
}
