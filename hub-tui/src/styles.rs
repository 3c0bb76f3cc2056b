use ratatui::style::{Color, Modifier, Style};

pub fn header() -> Style {
    Style::default()
        .fg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn tagline() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn claim_button() -> Style {
    Style::default()
        .fg(Color::Black)
        .bg(Color::Green)
        .add_modifier(Modifier::BOLD)
}

pub fn claim_button_disabled() -> Style {
    Style::default().fg(Color::Gray).bg(Color::DarkGray)
}

pub fn countdown() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn countdown_label() -> Style {
    Style::default().fg(Color::Blue)
}

pub fn coupon_code() -> Style {
    Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD)
}

pub fn coupon_label() -> Style {
    Style::default().fg(Color::Green)
}

pub fn error() -> Style {
    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
}

pub fn dim() -> Style {
    Style::default().fg(Color::DarkGray)
}

pub fn spinner() -> Style {
    Style::default().fg(Color::Yellow)
}
