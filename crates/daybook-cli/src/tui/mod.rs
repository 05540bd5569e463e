use std::{io, time::Duration};

use color_eyre::Result;
use crossterm::{
    event::{self, DisableMouseCapture, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use daybook_core::records::{DiaryEntry, Priority, TaskRecord};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, List, ListItem, Paragraph},
    Terminal,
};
use tracing::warn;

use crate::{
    board::{EditState, TaskBoard},
    client::ApiClient,
};

/// Input focus outside of the board's own edit machine.
enum InputMode {
    Normal,
    Search,
    Add { text: String, priority: Priority },
}

/// Interactive dashboard. Mutations are optimistic: the board changes
/// first, the server call follows, and a failed call rolls the board back
/// and reports in the status line.
pub async fn launch(client: &ApiClient, mut board: TaskBoard, diary: Vec<DiaryEntry>) -> Result<()> {
    // Guard restores the terminal even if we early-return.
    let _guard = TerminalGuard::enter()?;
    let mut terminal = _guard.terminal()?;

    let mut mode = InputMode::Normal;
    let mut selected: usize = 0;
    let mut status: Option<String> = None;

    loop {
        let visible_len = board.visible().len();
        selected = selected.min(visible_len.saturating_sub(1));

        terminal.draw(|frame| {
            draw(frame, &board, &diary, &mode, selected, status.as_deref());
        })?;

        if !event::poll(Duration::from_millis(150))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };

        if board.editing_id().is_some() {
            match key.code {
                KeyCode::Esc => board.cancel_edit(),
                KeyCode::Tab => board.cycle_draft_priority(),
                KeyCode::Backspace => board.pop_draft_char(),
                KeyCode::Enter => {
                    if let Some((id, text, priority)) = board.commit_edit() {
                        match client.update_task(id, &text, priority).await {
                            Ok(updated) => {
                                board.apply_update(updated);
                                status = None;
                            }
                            Err(err) => {
                                warn!(id, "task update failed: {err}");
                                status = Some(format!("save failed: {err}"));
                            }
                        }
                    }
                }
                KeyCode::Char(c) => board.push_draft_char(c),
                _ => {}
            }
            continue;
        }

        match &mut mode {
            InputMode::Search => match key.code {
                KeyCode::Esc => {
                    board.clear_search();
                    mode = InputMode::Normal;
                }
                KeyCode::Enter => mode = InputMode::Normal,
                KeyCode::Backspace => board.pop_search_char(),
                KeyCode::Char(c) => board.push_search_char(c),
                _ => {}
            },
            InputMode::Add { text, priority } => match key.code {
                KeyCode::Esc => mode = InputMode::Normal,
                KeyCode::Tab => *priority = priority.cycled(),
                KeyCode::Backspace => {
                    text.pop();
                }
                KeyCode::Enter => {
                    if !text.trim().is_empty() {
                        let task = TaskRecord::new(text.clone(), *priority, None);
                        board.insert(task.clone());
                        if let Err(err) = client.create_task(&task).await {
                            warn!(id = task.id, "task create failed: {err}");
                            board.remove(task.id);
                            status = Some(format!("add failed: {err}"));
                        } else {
                            status = None;
                        }
                    }
                    mode = InputMode::Normal;
                }
                KeyCode::Char(c) => text.push(c),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('j') | KeyCode::Down => {
                    if selected + 1 < visible_len {
                        selected += 1;
                    }
                }
                KeyCode::Char('k') | KeyCode::Up => selected = selected.saturating_sub(1),
                KeyCode::Char('/') => mode = InputMode::Search,
                KeyCode::Char('a') => {
                    mode = InputMode::Add {
                        text: String::new(),
                        priority: Priority::default(),
                    }
                }
                KeyCode::Char('e') => {
                    if let Some(id) = selected_id(&board, selected) {
                        board.begin_edit(id);
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(id) = selected_id(&board, selected) {
                        if let Some(removed) = board.remove(id) {
                            if let Err(err) = client.delete_task(id).await {
                                warn!(id, "task delete failed: {err}");
                                board.restore(removed);
                                status = Some(format!("delete failed: {err}"));
                            } else {
                                status = None;
                            }
                        }
                    }
                }
                _ => {}
            },
        }
    }

    Ok(())
}

fn selected_id(board: &TaskBoard, selected: usize) -> Option<i64> {
    board.visible().get(selected).map(|t| t.id)
}

fn draw(
    frame: &mut ratatui::Frame<'_>,
    board: &TaskBoard,
    diary: &[DiaryEntry],
    mode: &InputMode,
    selected: usize,
    status: Option<&str>,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(6),
            Constraint::Length(3),
        ])
        .split(frame.area());

    let (input_title, input_text) = match mode {
        InputMode::Add { text, priority } => ("New task (Tab: priority, Enter: add)".to_string(), {
            format!("[{priority}] {text}")
        }),
        _ => ("Search".to_string(), board.search().to_string()),
    };
    let input = Paragraph::new(input_text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(input_title),
    );
    frame.render_widget(input, chunks[0]);

    let items: Vec<ListItem> = board
        .visible()
        .iter()
        .enumerate()
        .map(|(i, task)| task_line(task, board.edit(), i == selected))
        .collect();
    let tasks = List::new(items).block(Block::default().borders(Borders::ALL).title("Tasks"));
    frame.render_widget(tasks, chunks[1]);

    let entries: Vec<ListItem> = diary
        .iter()
        .map(|entry| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    entry.date.format("%Y-%m-%d").to_string(),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" "),
                Span::raw(entry.text.as_str()),
            ]))
        })
        .collect();
    let diary_list = List::new(entries).block(Block::default().borders(Borders::ALL).title("Diary"));
    frame.render_widget(diary_list, chunks[2]);

    let footer_text = match status {
        Some(message) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        None => Line::from(vec![
            Span::raw("j/k move  "),
            Span::styled("a", Style::default().fg(Color::Cyan)),
            Span::raw(" add  "),
            Span::styled("e", Style::default().fg(Color::Cyan)),
            Span::raw(" edit  "),
            Span::styled("d", Style::default().fg(Color::Cyan)),
            Span::raw(" delete  "),
            Span::styled("/", Style::default().fg(Color::Cyan)),
            Span::raw(" search  "),
            Span::styled("q", Style::default().fg(Color::Cyan)),
            Span::raw(" quit"),
        ]),
    };
    let footer = Paragraph::new(footer_text)
        .block(Block::default().borders(Borders::ALL).title("Controls"));
    frame.render_widget(footer, chunks[3]);
}

fn task_line<'a>(task: &'a TaskRecord, edit: &'a EditState, is_selected: bool) -> ListItem<'a> {
    // The row under edit shows the draft, not the stored values.
    if let EditState::Editing { id, text, priority } = edit {
        if *id == task.id {
            return ListItem::new(Line::from(vec![
                Span::styled(
                    format!("[{priority}]"),
                    Style::default().fg(priority_color(Some(*priority))),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("{text}_"),
                    Style::default().add_modifier(Modifier::UNDERLINED),
                ),
            ]));
        }
    }

    let badge = task
        .priority
        .map(|p| format!("[{p}]"))
        .unwrap_or_else(|| "[none]".to_string());
    let mut line = vec![
        Span::styled(
            badge,
            Style::default()
                .fg(priority_color(task.priority))
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(task.text.as_str()),
    ];
    if let Some(date) = task.date {
        line.push(Span::styled(
            format!("  ({})", date.format("%Y-%m-%d")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let mut item = ListItem::new(Line::from(line));
    if is_selected {
        item = item.style(Style::default().add_modifier(Modifier::REVERSED));
    }
    item
}

fn priority_color(priority: Option<Priority>) -> Color {
    match priority {
        Some(Priority::High) => Color::Red,
        Some(Priority::Medium) => Color::Yellow,
        Some(Priority::Low) => Color::Green,
        None => Color::DarkGray,
    }
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // Enter alternate screen to avoid polluting the shell buffer.
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }

    fn terminal(&self) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Terminal::new(backend)?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup; errors are logged but not propagated from Drop.
        if let Err(err) = disable_raw_mode() {
            eprintln!("failed to disable raw mode: {err}");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture) {
            eprintln!("failed to restore terminal: {err}");
        }
    }
}
