use crate::styles;
use anyhow::Result;
use hub_actors::DisplayMode;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Terminal,
};
use std::io::Stdout;

const FOOTER_HINT: &str = "1 claim per hour per device/IP — Enter: claim  Esc: close  q: quit";

/// Immutable snapshot of everything the renderer needs for one frame.
pub struct ViewSnap {
    pub display: DisplayMode,
    pub time_left: u64,
    pub coupon: Option<String>,
    pub error: String,
    pub spinner: &'static str,
}

/// Render remaining seconds as `HH:MM:SS`.
pub fn format_countdown(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

pub fn draw(term: &mut Terminal<CrosstermBackend<Stdout>>, snap: &ViewSnap) -> Result<()> {
    term.draw(|frame| {
        let area = frame.area();

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ])
            .split(area);

        // Header
        let header = Paragraph::new(vec![
            Line::from(Span::styled(" Coupon Hub ", styles::header())),
            Line::from(Span::styled(
                " Exclusive Discount Platform ",
                styles::tagline(),
            )),
        ])
        .alignment(Alignment::Center);
        frame.render_widget(header, layout[0]);

        // Main panel
        let main = main_panel(snap);
        frame.render_widget(main, layout[1]);

        // Footer / status bar
        let footer = Paragraph::new(Line::from(vec![
            Span::styled(snap.spinner, styles::spinner()),
            Span::raw(" "),
            Span::styled(FOOTER_HINT, styles::dim()),
        ]))
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(footer, layout[2]);

        // Modal overlays, mutually exclusive by construction.
        match snap.display {
            DisplayMode::CouponDisplay => {
                let code = snap.coupon.as_deref().unwrap_or_default();
                let modal = Paragraph::new(vec![
                    Line::default(),
                    Line::from(Span::styled(code.to_string(), styles::coupon_code())),
                    Line::default(),
                    Line::from(Span::styled("Coupon Activated!", styles::coupon_label())),
                ])
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Coupon "));
                render_modal(frame, modal, area);
            }
            DisplayMode::Waiting => {
                let modal = Paragraph::new(vec![
                    Line::default(),
                    Line::from(Span::styled(
                        format_countdown(snap.time_left),
                        styles::countdown(),
                    )),
                    Line::default(),
                    Line::from(Span::styled(
                        "Next coupon available in",
                        styles::countdown_label(),
                    )),
                ])
                .alignment(Alignment::Center)
                .block(Block::default().borders(Borders::ALL).title(" Countdown "));
                render_modal(frame, modal, area);
            }
            DisplayMode::ErrorDisplay => {
                let modal = Paragraph::new(vec![
                    Line::default(),
                    Line::from(Span::styled(snap.error.clone(), styles::error())),
                ])
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .block(Block::default().borders(Borders::ALL).title(" Error "));
                render_modal(frame, modal, area);
            }
            _ => {}
        }
    })?;

    Ok(())
}

fn main_panel(snap: &ViewSnap) -> Paragraph<'static> {
    let lines = match snap.display {
        DisplayMode::Claiming => vec![
            Line::default(),
            Line::from(Span::styled(
                format!(" {} Claiming… ", snap.spinner),
                styles::claim_button_disabled(),
            )),
        ],
        DisplayMode::WaitingDismissed | DisplayMode::Waiting => vec![
            Line::default(),
            Line::from(Span::styled(
                "Next coupon available in:",
                styles::countdown_label(),
            )),
            Line::from(Span::styled(
                format_countdown(snap.time_left),
                styles::countdown(),
            )),
        ],
        _ => vec![
            Line::default(),
            Line::from(Span::styled(" Claim Your Coupon ", styles::claim_button())),
        ],
    };

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
}

fn render_modal(frame: &mut ratatui::Frame<'_>, modal: Paragraph<'static>, area: Rect) {
    let rect = centered_rect(50, 8, area);
    frame.render_widget(Clear, rect);
    frame.render_widget(modal, rect);
}

/// A fixed-height rect horizontally centered at `percent_x` of the area.
fn centered_rect(percent_x: u16, height: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn countdown_formats_hours_minutes_seconds() {
        assert_eq!(format_countdown(3661), "01:01:01");
    }

    #[test]
    fn footer_states_device_ip_claim_policy() {
        assert!(FOOTER_HINT.contains("1 claim per hour per device/IP"));
    }

    #[test]
    fn countdown_edge_values() {
        assert_eq!(format_countdown(0), "00:00:00");
        assert_eq!(format_countdown(59), "00:00:59");
        assert_eq!(format_countdown(3600), "01:00:00");
        assert_eq!(format_countdown(86399), "23:59:59");
    }
}
