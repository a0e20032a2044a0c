use crate::tui::app::{App, Mode, PLACEHOLDER};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Chips
            Constraint::Length(3), // Query input
            Constraint::Min(8),    // Results / Help
            Constraint::Length(1), // Status bar
        ])
        .split(f.area());

    draw_chips(f, app, chunks[0]);
    draw_query_input(f, app, chunks[1]);
    match app.mode {
        Mode::Help => draw_help(f, chunks[2]),
        _ => draw_results(f, app, chunks[2]),
    }
    draw_status_bar(f, app, chunks[3]);
}

fn draw_chips(f: &mut Frame, app: &App, area: Rect) {
    let chips = app.chips();

    let line = if chips.is_empty() {
        Line::from(Span::styled(
            "no terms yet",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        let mut spans = Vec::new();
        for (i, chip) in chips.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" "));
            }
            let style = if app.chip_cursor == Some(i) {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Black).bg(Color::Blue)
            };
            spans.push(Span::styled(format!(" {} \u{00d7}", chip.text), style));
        }
        Line::from(spans)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Terms (Tab: select, Del: remove) ");
    f.render_widget(Paragraph::new(line).block(block), area);
}

fn draw_query_input(f: &mut Frame, app: &App, area: Rect) {
    let input = Paragraph::new(app.editor.query())
        .style(Style::default().fg(Color::Yellow))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Query (Alt+a/o/n: AND/OR/NOT, Alt+9/0: parens, Ctrl+r: reset) "),
        );

    f.render_widget(input, area);

    // Show cursor at the end of the text while editing
    if app.mode == Mode::Edit && app.chip_cursor.is_none() {
        let len = app.editor.query().chars().count() as u16;
        f.set_cursor_position((area.x + len + 1, area.y + 1));
    }
}

fn draw_results(f: &mut Frame, app: &App, area: Rect) {
    // two distinct empty states: no query yet vs a query with no rows
    if app.committed_query().is_empty() {
        let placeholder = Paragraph::new(PLACEHOLDER)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Studies "));
        f.render_widget(placeholder, area);
        return;
    }

    if app.rows.is_empty() && !app.is_fetching() {
        let empty = Paragraph::new("No data")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(" Studies "));
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .visible_rows()
        .iter()
        .enumerate()
        .map(|(i, study)| {
            let style = if i == app.selected && app.mode == Mode::Results {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let mut title_spans = Vec::new();
            if let Some(year) = study.year {
                title_spans.push(Span::styled(
                    format!("[{}] ", year),
                    Style::default().fg(Color::Green),
                ));
            }
            title_spans.push(Span::styled(
                study.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ));

            let mut detail = Vec::new();
            if let Some(ref authors) = study.authors {
                detail.push(authors.clone());
            }
            if let Some(ref journal) = study.journal {
                detail.push(journal.clone());
            }
            if let Some(ref id) = study.study_id {
                match study.n_contrasts {
                    Some(n) => detail.push(format!("ID {} / Contrast: {}", id, n)),
                    None => detail.push(format!("ID {}", id)),
                }
            } else if let Some(n) = study.n_contrasts {
                detail.push(format!("Contrast: {}", n));
            }

            let detail_line = Line::from(Span::styled(
                format!("    {}", detail.join(" - ")),
                Style::default().fg(Color::DarkGray),
            ));

            ListItem::new(vec![Line::from(title_spans), detail_line]).style(style)
        })
        .collect();

    let title = format!(
        " Studies ({}) - sort: {} {} - page {}/{} ",
        app.rows.len(),
        app.sort_key.label(),
        app.sort_dir.arrow(),
        app.page,
        app.total_pages()
    );

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_widget(list, area);
}

fn draw_help(f: &mut Frame, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Editing",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  type / Backspace    edit the query text"),
        Line::from("  Enter               commit (collapse whitespace) and search"),
        Line::from("  Alt+a / Alt+o       append AND / OR"),
        Line::from("  Alt+n               append NOT"),
        Line::from("  Alt+9 / Alt+0       append ( / )"),
        Line::from("  Ctrl+r              reset the query"),
        Line::from("  Ctrl+w              delete last word"),
        Line::from("  Tab / Shift+Tab     select a term chip"),
        Line::from("  Delete              remove the selected chip"),
        Line::from(""),
        Line::from(Span::styled(
            "Results",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("  Down (from query)   enter the results list"),
        Line::from("  j/k or arrows       move selection"),
        Line::from("  Left/Right          previous / next page"),
        Line::from("  Home/End            first / last page"),
        Line::from("  s / r               cycle sort key / flip direction"),
        Line::from("  Enter or o          open the study on PubMed"),
        Line::from("  Esc or q            back to editing"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(Text::from(lines))
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });

    f.render_widget(help, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status = Paragraph::new(app.status_message.as_str())
        .style(Style::default().fg(Color::Cyan));

    f.render_widget(status, area);
}
