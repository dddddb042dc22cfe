//! Counter TUI - Actor-based client for the counter API
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - central state machine processing events and game ticks
//! - Network Layer (Tokio) - async REST calls

mod models;
mod config;
mod ui;
mod chart;
mod export;
mod game;
mod stats;
mod messages;
mod app;
mod network;
mod constants;

use std::io;
use std::path::Path;
use std::time::Duration;
use anyhow::Context;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use messages::{UiEvent, NetworkCommand, NetworkResponse, RenderState};
use messages::ui_events::{key_to_ui_event, InputField, InputMode, Panel};
use app::AppActor;
use config::{CliArgs, Config};
use constants::{APP_NAME, APP_VERSION};
use models::ChartType;
use network::{CounterClient, NetworkActor};
use ui::{action_color, action_marker, focus_style, render_tabs, timer_color, toast_color};

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliArgs::from_env()?;
    if cli.help {
        print!("{}", config::USAGE);
        return Ok(());
    }
    let config = Config::resolve(&cli)?;

    // Initialize logging to file
    let log_dir = config.log_file.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));
    let log_name = config.log_file.file_name().context("log_file must name a file")?;
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _log_guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();
    tracing::info!(api_url = %config.api_url, export_dir = %config.export_dir.display(), "Starting {}", APP_NAME);

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let client = CounterClient::new(&config.api_url, Duration::from_secs(config.request_timeout_secs));
    let network_actor = NetworkActor::new(client, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Bye");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                    current_state.game_mode,
                ) {
                    let quit = matches!(event, UiEvent::Quit);
                    let _ = ui_tx.send(event);
                    if quit {
                        break;
                    }
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title bar
            Constraint::Min(0),     // Content
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title_bar(f, state, main_chunks[0]);
    draw_content(f, state, main_chunks[1]);
    draw_status_bar(f, state, main_chunks[2]);

    // Overlays
    draw_toasts(f, state, area);

    if state.input_mode == InputMode::Editing(InputField::CheckpointName) {
        draw_checkpoint_popup(f, state, area);
    }

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let mut spans = vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" v{} ", APP_VERSION), Style::default().fg(Color::DarkGray)),
        Span::styled(state.api_url.clone(), Style::default().fg(Color::Gray)),
    ];
    if state.celebrating {
        spans.push(Span::styled(
            "  *** 🎉 CONGRATULATIONS 🎉 *** ",
            Style::default().fg(Color::Magenta).bold(),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn draw_content(f: &mut Frame, state: &RenderState, area: Rect) {
    let show_chart = state.show_chart && !state.chart_points.is_empty();

    let mut constraints = vec![Constraint::Length(7)]; // Counter + stats
    if state.game_mode {
        constraints.push(Constraint::Length(6));
    }
    if show_chart {
        constraints.push(Constraint::Length(14));
    }
    constraints.push(Constraint::Min(5)); // Checkpoints + history

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let mut next = 0;
    draw_counter_row(f, state, chunks[next]);
    next += 1;

    if state.game_mode {
        draw_game_panel(f, state, chunks[next]);
        next += 1;
    }
    if show_chart {
        draw_chart_panel(f, state, chunks[next]);
        next += 1;
    }

    let bottom = if state.show_history {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(chunks[next])
    } else {
        Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(100)])
            .split(chunks[next])
    };

    draw_checkpoints(f, state, bottom[0]);
    if state.show_history {
        draw_history(f, state, bottom[1]);
    }
}

fn draw_counter_row(f: &mut Frame, state: &RenderState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let is_focused = state.active_panel == Panel::Counter;
    let editing = state.input_mode == InputMode::Editing(InputField::CustomValue);
    let loading = if state.is_loading { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, editing))
        .title(format!(" Counter{} ", loading));

    let custom_label = if editing { " (Enter:done) " } else { " (c:edit a:apply) " };
    let lines = vec![
        Line::from(Span::styled(
            state.count.to_string(),
            Style::default().fg(Color::Cyan).bold(),
        ))
        .centered(),
        Line::from(""),
        Line::from(vec![
            Span::styled(" + ", Style::default().fg(Color::Black).bg(Color::Green)),
            Span::raw(" increment  "),
            Span::styled(" - ", Style::default().fg(Color::Black).bg(Color::Yellow)),
            Span::raw(" decrement  "),
            Span::styled(" 0 ", Style::default().fg(Color::Black).bg(Color::Red)),
            Span::raw(" reset"),
        ])
        .centered(),
        Line::from(vec![
            Span::raw("Custom value: "),
            Span::styled(
                state.custom_input.clone(),
                if editing { Style::default().fg(Color::Yellow) } else { Style::default().bold() },
            ),
            Span::styled(custom_label, Style::default().fg(Color::DarkGray)),
        ])
        .centered(),
    ];

    let counter = Paragraph::new(lines).block(block);
    f.render_widget(counter, chunks[0]);

    if editing {
        let inner_width = chunks[0].width.saturating_sub(2) as usize;
        let line_width = "Custom value: ".len() + state.custom_input.len() + custom_label.len();
        let start = chunks[0].x + 1 + (inner_width.saturating_sub(line_width) / 2) as u16;
        let max_x = chunks[0].x + chunks[0].width.saturating_sub(2);
        let cursor_x = (start + "Custom value: ".len() as u16 + state.cursor_position as u16).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, chunks[0].y + 4));
    }

    draw_statistics(f, state, chunks[1]);
}

fn draw_statistics(f: &mut Frame, state: &RenderState, area: Rect) {
    let stats = &state.statistics;
    let row = |label: &str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(format!("{:<16}", label), Style::default().fg(Color::Gray)),
            Span::styled(value, Style::default().fg(color).bold()),
        ])
    };

    let lines = vec![
        row("Total actions", stats.total_actions.to_string(), Color::White),
        row("Average value", format!("{:.2}", stats.average_value), Color::Cyan),
        row("Increments", stats.increment_count.to_string(), Color::Green),
        row("Decrements", stats.decrement_count.to_string(), Color::Yellow),
        row("Resets", stats.reset_count.to_string(), Color::Red),
    ];

    let block = Block::default().borders(Borders::ALL).title(" Statistics ");
    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_game_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let game = &state.game;
    let title = if game.active {
        " Game - running (space:click x:stop) "
    } else {
        " Game (s:start m:close) "
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Magenta))
        .title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1), Constraint::Min(0)])
        .split(inner);

    let summary = Line::from(vec![
        Span::raw("Score: "),
        Span::styled(game.score.to_string(), Style::default().fg(Color::Yellow).bold()),
        Span::raw("   Level: "),
        Span::styled(game.level.to_string(), Style::default().fg(Color::Cyan).bold()),
        Span::raw("   Time left: "),
        Span::styled(
            format!("{}s", game.time_remaining),
            Style::default().fg(timer_color(game.time_remaining)).bold(),
        ),
    ]);
    f.render_widget(Paragraph::new(summary), rows[0]);

    let duration = game.duration_secs().max(1);
    let ratio = (game.time_remaining as f64 / duration as f64).clamp(0.0, 1.0);
    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(timer_color(game.time_remaining)))
        .ratio(ratio)
        .label(format!("{}/{}s", game.time_remaining, duration));
    f.render_widget(gauge, rows[1]);
}

fn draw_chart_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Chart (t:type g:hide) ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);

    let titles: Vec<&str> = ChartType::ALL.iter().map(|c| c.as_str()).collect();
    let tabs = render_tabs(&titles, state.chart_type.index());
    f.render_widget(tabs, rows[0]);

    match state.chart_type {
        ChartType::Line | ChartType::Bar => {
            let points = &state.chart_points;
            let [y_min, y_max] = chart::value_bounds(points);
            let x_max = points.len().max(2) as f64;
            let graph_type = if state.chart_type == ChartType::Bar {
                GraphType::Bar
            } else {
                GraphType::Line
            };

            let dataset = Dataset::default()
                .name("count value")
                .marker(symbols::Marker::Braille)
                .graph_type(graph_type)
                .style(Style::default().fg(Color::Green))
                .data(points);

            let chart = Chart::new(vec![dataset])
                .x_axis(
                    Axis::default()
                        .style(Style::default().fg(Color::Gray))
                        .bounds([1.0, x_max])
                        .labels(vec![Span::raw("1"), Span::raw(format!("{}", points.len()))]),
                )
                .y_axis(
                    Axis::default()
                        .style(Style::default().fg(Color::Gray))
                        .bounds([y_min, y_max])
                        .labels(vec![
                            Span::raw(format!("{:.0}", y_min)),
                            Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                            Span::raw(format!("{:.0}", y_max)),
                        ]),
                );
            f.render_widget(chart, rows[1]);
        }
        ChartType::Breakdown => {
            let breakdown = chart::action_breakdown(&state.statistics);
            let bars = BarChart::default()
                .bar_width(11)
                .bar_gap(3)
                .bar_style(Style::default().fg(Color::Green))
                .value_style(Style::default().fg(Color::Black).bg(Color::Green).bold())
                .data(&breakdown[..]);
            f.render_widget(bars, rows[1]);
        }
    }
}

fn draw_checkpoints(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Checkpoints;

    let items: Vec<ListItem> = state.checkpoints.iter()
        .map(|c| {
            ListItem::new(Line::from(vec![
                Span::styled(c.name.clone(), Style::default().bold()),
                Span::styled(format!(" (value: {})", c.count), Style::default().fg(Color::Cyan)),
            ]))
        })
        .collect();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, false))
        .title(" Checkpoints (n:new l:load d:delete) ");

    if items.is_empty() {
        let hint = Paragraph::new("No checkpoints yet. Press 'n' to save one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block)
            .wrap(Wrap { trim: false });
        f.render_widget(hint, area);
        return;
    }

    let highlight_style = if is_focused {
        Style::default().fg(Color::Yellow).bold()
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.selected_checkpoint));
    f.render_stateful_widget(list, area, &mut list_state);
}

fn draw_history(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::History;

    let mut lines: Vec<Line> = state.history.iter()
        .map(|item| {
            let color = action_color(&item.action);
            Line::from(vec![
                Span::styled(format!("{} ", action_marker(&item.action)), Style::default().fg(color).bold()),
                Span::styled(format!("{:<10}", item.action), Style::default().fg(color)),
                Span::styled(format!("{:>6}", item.count_value), Style::default().bold()),
                Span::styled(format!("  {}", item.display_time()), Style::default().fg(Color::DarkGray)),
            ])
        })
        .collect();

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "No actions recorded",
            Style::default().fg(Color::DarkGray),
        )));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(is_focused, false))
        .title(format!(" History ({} of {}) ", state.history.len(), state.history_total));

    let history = Paragraph::new(lines)
        .block(block)
        .scroll((state.history_scroll, 0));
    f.render_widget(history, area);
}

fn draw_toasts(f: &mut Frame, state: &RenderState, area: Rect) {
    let width = area.width.min(56);
    let x = area.x + area.width.saturating_sub(width + 1);

    let visible = state.toasts.iter().rev().take(5).collect::<Vec<_>>();
    for (i, toast) in visible.into_iter().rev().enumerate() {
        let y = area.y + 1 + i as u16;
        if y >= area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, 1);
        let toast_widget = Paragraph::new(format!(" {} ", toast.message))
            .style(Style::default().fg(Color::White).bg(toast_color(toast.kind)).bold());
        f.render_widget(Clear, rect);
        f.render_widget(toast_widget, rect);
    }
}

fn draw_checkpoint_popup(f: &mut Frame, state: &RenderState, area: Rect) {
    let popup_area = centered_rect(50, 20, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" Checkpoint name (Enter to save, Esc to cancel) ")
        .style(Style::default().bg(Color::Black));

    let input = Paragraph::new(state.checkpoint_input.as_str())
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(input, popup_area);

    let max_x = popup_area.x + popup_area.width.saturating_sub(2);
    let cursor_x = (popup_area.x + state.cursor_position as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, popup_area.y + 1));
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let status = if state.is_loading {
        " Loading... "
    } else if matches!(state.input_mode, InputMode::Editing(_)) {
        " Enter:confirm | Esc:cancel | arrows:move "
    } else if state.game_mode {
        " s:start | space:click | x:stop | m:leave game | ?:help | q:quit "
    } else {
        " +/-/0:count | a:custom | h:history | g:chart | m:game | j/v:export | ?:help | q:quit "
    };

    let bar = Paragraph::new(status)
        .style(Style::default().fg(Color::DarkGray));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 80, area);

    let help_text = r#"
 COUNTER TUI - Keyboard Shortcuts

 COUNTER
   + / =              Increment
   -                  Decrement
   0                  Reset
   c                  Edit custom value
   a                  Apply custom value
   r                  Reload count and history

 DISPLAY
   h                  Toggle history
   g                  Toggle chart
   t                  Cycle chart type
   Tab / Shift+Tab    Switch panels
   ↑ / ↓              Select checkpoint / scroll history

 GAME
   m                  Toggle game mode
   s                  Start a round
   Space              Click!
   x                  Stop the round

 CHECKPOINTS
   n                  Save a new checkpoint
   l / Enter          Load selected checkpoint
   d                  Delete selected checkpoint

 EXPORT
   j                  Export everything as JSON
   v                  Export history as CSV

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
