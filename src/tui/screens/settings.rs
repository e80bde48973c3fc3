//! Settings screen — choose which vehicle the home-screen widget presents.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::garage::initial_widget_selection;
use crate::model::VehicleRecord;
use crate::storage::{StorageError, VehicleStore};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

const FOOTNOTE: &str = "Choose which vehicle to present in the main screen widget.";

/// State for the settings screen.
#[derive(Debug, Clone, Default)]
pub struct SettingsState {
    vehicles: Vec<VehicleRecord>,
    /// Cursor position in the picker.
    highlighted: usize,
    /// The vehicle shown as chosen.
    widget_index: Option<usize>,
    error: Option<String>,
}

impl SettingsState {
    /// Creates an empty state. Call [`load`](Self::load) to populate from storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads active vehicles and positions the picker on the widget vehicle.
    pub fn load(&mut self, store: &VehicleStore) -> Result<(), StorageError> {
        let vehicles = store.fetch_active()?;
        self.set_vehicles(vehicles);
        self.error = None;
        Ok(())
    }

    /// Replaces the vehicle list, e.g. with the records a selection just wrote.
    pub fn set_vehicles(&mut self, vehicles: Vec<VehicleRecord>) {
        self.widget_index = initial_widget_selection(&vehicles);
        self.highlighted = self.widget_index.unwrap_or(0);
        self.vehicles = vehicles;
    }

    /// Returns the cached vehicles.
    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    /// Returns the cursor position.
    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    /// Returns the chosen vehicle's index, `None` when there are no vehicles.
    pub fn widget_index(&self) -> Option<usize> {
        self.widget_index
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets an error message to display on this screen.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    /// Moves the choice to the highlighted vehicle.
    ///
    /// Only a real change is persisted, except that an unmarked collection is
    /// always written so the default choice sticks.
    fn choose(&mut self) -> Action {
        if self.vehicles.is_empty() {
            return Action::None;
        }
        let index = self.highlighted;
        let already_marked = self.vehicles.iter().any(|v| v.show_on_widget);
        if self.widget_index == Some(index) && already_marked {
            return Action::None;
        }
        self.widget_index = Some(index);
        self.error = None;
        Action::SetWidgetVehicle(index)
    }
}

impl ScreenState for SettingsState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.highlighted = self.highlighted.saturating_sub(1);
                Action::None
            }
            KeyCode::Down => {
                if self.highlighted + 1 < self.vehicles.len() {
                    self.highlighted += 1;
                }
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.choose(),
            KeyCode::Char('q') | KeyCode::Esc => Action::Navigate(Screen::VehicleList),
            _ => Action::None,
        }
    }
}

/// Renders the settings screen.
#[mutants::skip]
pub fn draw_settings(state: &SettingsState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Settings ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [header_area, list_area, note_area, status_area, footer_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Min(0),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let header = Paragraph::new(Line::from(Span::styled(
        "Widget vehicle",
        Style::default().add_modifier(Modifier::BOLD),
    )));
    frame.render_widget(header, header_area);

    if state.vehicles().is_empty() {
        frame.render_widget(
            Paragraph::new("Add a vehicle first.").style(Style::default().fg(Color::DarkGray)),
            list_area,
        );
    } else {
        let items: Vec<ListItem> = state
            .vehicles()
            .iter()
            .enumerate()
            .map(|(i, v)| {
                let marker = if state.widget_index() == Some(i) {
                    "(•)"
                } else {
                    "( )"
                };
                let style = if i == state.highlighted() {
                    Style::default().fg(Color::Black).bg(Color::Yellow)
                } else {
                    Style::default()
                };
                ListItem::new(format!("{marker} {}", v.name)).style(style)
            })
            .collect();
        frame.render_widget(List::new(items), list_area);
    }

    frame.render_widget(
        Paragraph::new(FOOTNOTE).style(Style::default().fg(Color::Gray)),
        note_area,
    );

    let status = match state.error() {
        Some(err) => Paragraph::new(err).style(Style::default().fg(Color::Red)),
        None => Paragraph::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
            .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(status, status_area);

    let footer = Paragraph::new("↑/↓: move  Enter/Space: choose  q/Esc: back")
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, footer_area);
}
