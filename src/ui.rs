use ratatui::{prelude::*, widgets::*};

use crate::models::ToastKind;

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Toast background color
pub fn toast_color(kind: ToastKind) -> Color {
    match kind {
        ToastKind::Success => Color::Green,
        ToastKind::Error => Color::Red,
        ToastKind::Info => Color::Blue,
    }
}

/// History action color
pub fn action_color(action: &str) -> Color {
    if action.contains("increment") {
        Color::Green
    } else if action.contains("decrement") {
        Color::Yellow
    } else if action == "reset" {
        Color::Red
    } else {
        Color::Cyan
    }
}

/// Short marker shown in front of a history entry
pub fn action_marker(action: &str) -> &'static str {
    if action.contains("increment") {
        "+"
    } else if action.contains("decrement") {
        "-"
    } else if action == "reset" {
        "0"
    } else {
        "~"
    }
}

/// Countdown color, turning red in the last five seconds
pub fn timer_color(seconds_left: u32) -> Color {
    match seconds_left {
        0..=5 => Color::Red,
        6..=10 => Color::Yellow,
        _ => Color::Green,
    }
}

/// Border style for a focusable block
pub fn focus_style(focused: bool, editing: bool) -> Style {
    if focused && editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_styling() {
        assert_eq!(action_color("increment"), Color::Green);
        assert_eq!(action_color("reset"), Color::Red);
        assert_eq!(action_marker("decrement"), "-");
        assert_eq!(action_marker("custom"), "~");
    }

    #[test]
    fn test_timer_color_thresholds() {
        assert_eq!(timer_color(30), Color::Green);
        assert_eq!(timer_color(8), Color::Yellow);
        assert_eq!(timer_color(0), Color::Red);
    }
}
