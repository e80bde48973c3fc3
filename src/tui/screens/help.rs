//! Help screen — key reference for the screen it was opened from.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

static VEHICLE_LIST_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "move highlight"),
    ("Enter", "edit vehicle"),
    ("n", "add vehicle"),
    ("s", "settings"),
    ("q / Esc", "quit"),
    ("? / F1", "help"),
];

static VEHICLE_EDIT_KEYS: &[(&str, &str)] = &[
    ("Tab / Shift-Tab", "next / prev field"),
    ("Enter on photo", "load photo from typed path"),
    ("Enter", "save"),
    ("←/→", "change date, unit or currency"),
    ("Ctrl-D", "delete vehicle (edit only)"),
    ("Esc", "cancel"),
    ("F1", "help"),
];

static SETTINGS_KEYS: &[(&str, &str)] = &[
    ("↑/↓", "move highlight"),
    ("Enter / Space", "show on widget"),
    ("q / Esc", "back"),
    ("F1", "help"),
];

static HELP_KEYS: &[(&str, &str)] = &[("↑/↓", "scroll"), ("q / Esc", "back")];

/// State for the help screen.
#[derive(Debug, Clone)]
pub struct HelpState {
    scroll: u16,
    origin: Screen,
}

impl Default for HelpState {
    fn default() -> Self {
        Self::new()
    }
}

impl HelpState {
    /// Creates a help screen that returns to the vehicle list.
    pub fn new() -> Self {
        Self {
            scroll: 0,
            origin: Screen::VehicleList,
        }
    }

    pub fn scroll(&self) -> u16 {
        self.scroll
    }

    /// Returns the screen help was opened from.
    pub fn origin(&self) -> Screen {
        self.origin
    }

    /// Points help at `screen` and scrolls back to the top.
    pub fn open_from(&mut self, screen: Screen) {
        self.origin = screen;
        self.scroll = 0;
    }
}

impl ScreenState for HelpState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.scroll = self.scroll.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                self.scroll = self.scroll.saturating_add(1);
                Action::None
            }
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(self.origin),
            _ => Action::None,
        }
    }
}

fn screen_name(screen: Screen) -> &'static str {
    match screen {
        Screen::VehicleList => "Vehicles",
        Screen::VehicleEdit => "Vehicle",
        Screen::Settings => "Settings",
        Screen::Help => "Help",
    }
}

fn section(title: &'static str, keys: &[(&'static str, &'static str)]) -> Vec<Line<'static>> {
    let title_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let key_style = Style::default().fg(Color::Yellow);

    let mut lines = vec![Line::from(""), Line::from(Span::styled(title, title_style))];
    lines.extend(keys.iter().map(|(key, desc)| {
        Line::from(vec![
            Span::styled(format!("  {key:<18}"), key_style),
            Span::styled(*desc, Style::default().fg(Color::DarkGray)),
        ])
    }));
    lines
}

fn help_content(origin: Screen) -> Vec<Line<'static>> {
    let keys = match origin {
        Screen::VehicleList => VEHICLE_LIST_KEYS,
        Screen::VehicleEdit => VEHICLE_EDIT_KEYS,
        Screen::Settings => SETTINGS_KEYS,
        Screen::Help => HELP_KEYS,
    };
    section(screen_name(origin), keys)
}

/// Renders the help screen.
#[mutants::skip]
pub fn draw_help(state: &HelpState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(format!(" Help – {} ", screen_name(state.origin())))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [content_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines = help_content(state.origin());
    let max_scroll = (lines.len() as u16).saturating_sub(content_area.height);
    let paragraph = Paragraph::new(lines).scroll((state.scroll().min(max_scroll), 0));
    frame.render_widget(paragraph, content_area);

    frame.render_widget(
        Paragraph::new("↑/↓: scroll  q/Esc: back").style(Style::default().fg(Color::DarkGray)),
        footer_area,
    );
}
