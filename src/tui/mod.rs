mod charts;
mod state;

use crate::cli::Cli;
use crate::controller::{self, UiCommand};
use crate::draft::pending_file_from_path;
use crate::model::{AppEvent, SUBJECTS};
use crate::projection;
use crate::store::HttpStore;
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};
use state::{Focus, UiState};
use std::path::Path;
use std::sync::Arc;
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

pub async fn run(args: Cli) -> Result<()> {
    // Unbounded channels keep the UI thread from ever blocking on the
    // controller and vice versa.
    let (event_tx, event_rx) = mpsc::unbounded_channel::<AppEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    let store = Arc::new(HttpStore::new(
        &args.base_url,
        Duration::from(args.request_timeout),
    )?);

    // TUI runs in a dedicated thread to keep all blocking I/O out of the
    // Tokio runtime.
    let ui_args = args.clone();
    let ui_handle = std::thread::spawn(move || run_threaded(ui_args, event_rx, cmd_tx));

    let res = controller::run_controller(store, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
fn run_threaded(
    args: Cli,
    mut event_rx: UnboundedReceiver<AppEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    let mut ui = UiState {
        strict_marks: args.strict_marks,
        info: "Loading roster…".into(),
        ..Default::default()
    };

    let tick_rate = Duration::from_millis(100);
    let mut last_tick = Instant::now();

    let res = loop {
        // Drain events without blocking so keystrokes stay responsive.
        while let Ok(ev) = event_rx.try_recv() {
            ui.apply_event(ev);
        }

        if last_tick.elapsed() >= tick_rate {
            terminal.draw(|f| draw(f.area(), f, &ui)).ok();
            last_tick = Instant::now();
        }

        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                match (k.modifiers, k.code) {
                    (KeyModifiers::CONTROL, KeyCode::Char('c')) | (_, KeyCode::Esc) => {
                        let _ = cmd_tx.send(UiCommand::Quit);
                        break Ok(());
                    }
                    (KeyModifiers::CONTROL, KeyCode::Char('r')) => {
                        ui.info = "Refreshing…".into();
                        let _ = cmd_tx.send(UiCommand::Refresh);
                    }
                    (_, KeyCode::Tab) => {
                        ui.focus = ui.focus.next(SUBJECTS.len());
                    }
                    (_, KeyCode::BackTab) => {
                        ui.focus = ui.focus.prev(SUBJECTS.len());
                    }
                    (_, KeyCode::Up) => ui.move_cursor(-1),
                    (_, KeyCode::Down) => ui.move_cursor(1),
                    (_, KeyCode::Enter) => handle_enter(&mut ui, &cmd_tx),
                    (_, KeyCode::Backspace) => handle_backspace(&mut ui),
                    (_, KeyCode::Char(c)) => handle_char(&mut ui, c),
                    _ => {}
                }
            }
        }
    };

    disable_raw_mode().ok();
    execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
    terminal.show_cursor().ok();

    res
}

/// Enter applies the typed file path when the file field is focused and holds
/// text; anywhere else it submits the draft.
fn handle_enter(ui: &mut UiState, cmd_tx: &UnboundedSender<UiCommand>) {
    if ui.focus == Focus::File && !ui.file_path_input.is_empty() {
        if !ui.draft.file_entry_enabled() {
            ui.info = "File entry is disabled while marks are filled in".into();
            return;
        }
        let candidate = pending_file_from_path(Path::new(&ui.file_path_input));
        match ui.draft.set_file(candidate) {
            Ok(()) => {
                let name = ui.draft.pending_file().map(|f| f.file_name.clone());
                ui.file_path_input.clear();
                ui.info = format!("File pending: {}", name.unwrap_or_default());
            }
            Err(e) => {
                ui.info = e.to_string();
            }
        }
        return;
    }

    match ui.draft.build(ui.strict_marks) {
        Ok(submission) => {
            let name = submission.record.name.clone();
            let _ = cmd_tx.send(UiCommand::Submit(submission));
            // Optimistic reset: the form clears now, whatever the network
            // round-trip ends up doing.
            ui.draft.reset();
            ui.file_path_input.clear();
            ui.info = format!("Submitting {}…", name);
        }
        Err(e) => {
            ui.info = e.to_string();
        }
    }
}

fn handle_backspace(ui: &mut UiState) {
    match ui.focus {
        Focus::Name => {
            ui.draft.name.pop();
        }
        Focus::Standard => {
            ui.draft.standard.pop();
        }
        Focus::Mark(i) => {
            if !ui.draft.manual_entry_enabled() {
                return;
            }
            let mut text = ui.draft.marks_text()[i].clone();
            text.pop();
            ui.draft.set_manual_mark(i, text);
        }
        Focus::File => {
            if ui.file_path_input.pop().is_none() && ui.draft.pending_file().is_some() {
                ui.draft.clear_file();
                ui.info = "Pending file removed".into();
            }
        }
    }
}

fn handle_char(ui: &mut UiState, c: char) {
    match ui.focus {
        Focus::Name => ui.draft.name.push(c),
        Focus::Standard => ui.draft.standard.push(c),
        Focus::Mark(i) => {
            if !ui.draft.manual_entry_enabled() {
                ui.info = "Mark entry is disabled while a file is pending".into();
                return;
            }
            let mut text = ui.draft.marks_text()[i].clone();
            text.push(c);
            ui.draft.set_manual_mark(i, text);
        }
        Focus::File => {
            if !ui.draft.file_entry_enabled() {
                ui.info = "File entry is disabled while marks are filled in".into();
                return;
            }
            ui.file_path_input.push(c);
        }
    }
}

fn draw(area: Rect, f: &mut Frame, ui: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(12),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(rows[0]);

    draw_form(f, main[0], ui);
    draw_roster(f, main[1], ui);
    draw_charts(f, rows[1], ui);

    f.render_widget(
        Paragraph::new(ui.info.clone()).style(Style::default().fg(Color::Yellow)),
        rows[2],
    );
    f.render_widget(
        Paragraph::new(
            "Tab focus · Enter submit/apply file · ↑↓ select · Ctrl-R refresh · Esc quit",
        )
        .style(Style::default().fg(Color::DarkGray)),
        rows[3],
    );
}

fn form_line<'a>(label: &'a str, value: String, focused: bool, enabled: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if enabled {
        Style::default().fg(Color::Gray)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_style = if enabled {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let marker = if focused { "› " } else { "  " };
    Line::from(vec![
        Span::raw(marker),
        Span::styled(format!("{label:<9}"), label_style),
        Span::styled(value, value_style),
    ])
}

fn draw_form(f: &mut Frame, area: Rect, ui: &UiState) {
    let manual = ui.draft.manual_entry_enabled();
    let file_ok = ui.draft.file_entry_enabled();

    let mut lines = vec![
        form_line("Name", ui.draft.name.clone(), ui.focus == Focus::Name, manual),
        form_line(
            "Standard",
            ui.draft.standard.clone(),
            ui.focus == Focus::Standard,
            manual,
        ),
    ];
    for (i, subject) in SUBJECTS.iter().enumerate() {
        lines.push(form_line(
            subject,
            ui.draft.marks_text()[i].clone(),
            ui.focus == Focus::Mark(i),
            manual,
        ));
    }
    let file_value = match ui.draft.pending_file() {
        Some(file) => format!("{} (pending)", file.file_name),
        None => ui.file_path_input.clone(),
    };
    lines.push(form_line("File", file_value, ui.focus == Focus::File, file_ok));

    let block = Block::default().borders(Borders::ALL).title("New record");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_roster(f: &mut Frame, area: Rect, ui: &UiState) {
    let header = Row::new(
        std::iter::once("Name")
            .chain(std::iter::once("Std"))
            .chain(SUBJECTS.iter().copied())
            .chain(std::iter::once("Total"))
            .map(Cell::from)
            .collect::<Vec<_>>(),
    )
    .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = ui
        .roster
        .iter()
        .enumerate()
        .map(|(i, student)| {
            let mut cells = vec![Cell::from(student.name.clone()), Cell::from(student.standard.clone())];
            cells.extend(student.marks.iter().map(|m| {
                Cell::from(m.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string()))
            }));
            cells.push(Cell::from(
                student
                    .total()
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "NaN".to_string()),
            ));
            let row = Row::new(cells);
            if i == ui.cursor && ui.selected.is_some() {
                row.style(Style::default().bg(Color::DarkGray))
            } else {
                row
            }
        })
        .collect();

    let mut widths = vec![Constraint::Min(12), Constraint::Length(5)];
    widths.extend(SUBJECTS.iter().map(|_| Constraint::Length(7)));
    widths.push(Constraint::Length(6));

    let title = format!("Roster ({} students)", ui.roster.len());
    let table = Table::new(rows, widths)
        .header(header)
        .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(table, area);
}

fn draw_charts(f: &mut Frame, area: Rect, ui: &UiState) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    match ui.selected.as_deref().and_then(|name| ui.roster.get(name)) {
        Some(student) => {
            let series = projection::student_breakdown(student);
            let title = format!("Marks · {}", student.name);
            charts::render_pie(f, halves[0], &series, &title);
        }
        None => {
            let block = Block::default().borders(Borders::ALL).title("Marks");
            let inner = block.inner(halves[0]);
            f.render_widget(block, halves[0]);
            f.render_widget(Paragraph::new("Select a student with ↑↓"), inner);
        }
    }

    let totals = projection::totals(&ui.roster);
    charts::render_pie(f, halves[1], &totals, "Total marks");
}
