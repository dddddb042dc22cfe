//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Counter
    Increment,
    Decrement,
    Reset,
    ApplyCustom,
    Refresh,

    // Panel navigation
    NextPanel,
    PrevPanel,
    SelectUp,
    SelectDown,

    // Input editing
    EditCustomValue,
    NewCheckpoint,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    CommitInput,
    CancelInput,

    // Display toggles
    ToggleHistory,
    ToggleChart,
    CycleChartType,
    ToggleGameMode,

    // Minigame
    StartGame,
    GameClick,
    StopGame,

    // Checkpoints
    LoadCheckpoint,
    DeleteCheckpoint,

    // Export
    ExportJson,
    ExportCsv,

    // Popups
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Focusable panel (needed for context-aware event mapping)
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Panel {
    #[default]
    Counter,
    Checkpoints,
    History,
}

impl Panel {
    pub fn next(&self) -> Panel {
        match self {
            Panel::Counter => Panel::Checkpoints,
            Panel::Checkpoints => Panel::History,
            Panel::History => Panel::Counter,
        }
    }

    pub fn prev(&self) -> Panel {
        match self {
            Panel::Counter => Panel::History,
            Panel::Checkpoints => Panel::Counter,
            Panel::History => Panel::Checkpoints,
        }
    }
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing(InputField),
}

/// Text field being edited
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum InputField {
    CustomValue,
    CheckpointName,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(
    key: KeyEvent,
    active_panel: Panel,
    input_mode: InputMode,
    show_help: bool,
    game_mode: bool,
) -> Option<UiEvent> {
    use crossterm::event::KeyEventKind;

    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if show_help {
        return Some(UiEvent::CloseHelp);
    }

    match input_mode {
        InputMode::Editing(_) => handle_editing_keys(key),
        InputMode::Normal => handle_normal_keys(key, active_panel, game_mode),
    }
}

fn handle_editing_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::CancelInput),
        KeyCode::Enter => Some(UiEvent::CommitInput),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_normal_keys(key: KeyEvent, active_panel: Panel, game_mode: bool) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Tab => Some(UiEvent::NextPanel),
        KeyCode::BackTab => Some(UiEvent::PrevPanel),

        KeyCode::Char('+') | KeyCode::Char('=') => Some(UiEvent::Increment),
        KeyCode::Char('-') => Some(UiEvent::Decrement),
        KeyCode::Char('0') => Some(UiEvent::Reset),
        KeyCode::Char('c') => Some(UiEvent::EditCustomValue),
        KeyCode::Char('a') => Some(UiEvent::ApplyCustom),
        KeyCode::Char('r') => Some(UiEvent::Refresh),

        KeyCode::Char('h') => Some(UiEvent::ToggleHistory),
        KeyCode::Char('g') => Some(UiEvent::ToggleChart),
        KeyCode::Char('t') => Some(UiEvent::CycleChartType),
        KeyCode::Char('m') => Some(UiEvent::ToggleGameMode),

        KeyCode::Char('s') if game_mode => Some(UiEvent::StartGame),
        KeyCode::Char(' ') if game_mode => Some(UiEvent::GameClick),
        KeyCode::Char('x') if game_mode => Some(UiEvent::StopGame),

        KeyCode::Char('n') => Some(UiEvent::NewCheckpoint),
        KeyCode::Char('l') | KeyCode::Enter if active_panel == Panel::Checkpoints => {
            Some(UiEvent::LoadCheckpoint)
        }
        KeyCode::Char('d') | KeyCode::Delete if active_panel == Panel::Checkpoints => {
            Some(UiEvent::DeleteCheckpoint)
        }

        KeyCode::Char('j') => Some(UiEvent::ExportJson),
        KeyCode::Char('v') => Some(UiEvent::ExportCsv),

        KeyCode::Up => Some(UiEvent::SelectUp),
        KeyCode::Down => Some(UiEvent::SelectDown),
        _ => None,
    }
}
