//! Vehicle list screen — the start screen, listing every active vehicle.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph, Row, Table};

use crate::model::VehicleRecord;
use crate::storage::{StorageError, VehicleStore};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;

/// State for the vehicle list screen.
#[derive(Debug, Clone, Default)]
pub struct VehicleListState {
    /// Active vehicles from storage, oldest first.
    vehicles: Vec<VehicleRecord>,
    /// Index of the highlighted vehicle, or `None` if the list is empty.
    selected: Option<usize>,
    /// Error message from the last failed operation.
    error: Option<String>,
}

impl VehicleListState {
    /// Creates an empty state. Call [`load`](Self::load) to populate from storage.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reloads active vehicles, keeping the highlight in range.
    pub fn load(&mut self, store: &VehicleStore) -> Result<(), StorageError> {
        self.vehicles = store.fetch_active()?;
        self.selected = match self.selected {
            _ if self.vehicles.is_empty() => None,
            Some(i) => Some(i.min(self.vehicles.len() - 1)),
            None => Some(0),
        };
        self.error = None;
        Ok(())
    }

    /// Returns the cached vehicles.
    pub fn vehicles(&self) -> &[VehicleRecord] {
        &self.vehicles
    }

    /// Returns the highlighted index.
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Returns the current error message, if any.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Sets an error message to display on this screen.
    pub fn set_error(&mut self, msg: String) {
        self.error = Some(msg);
    }

    fn edit_selected(&self) -> Action {
        self.selected
            .and_then(|i| self.vehicles.get(i))
            .map_or(Action::None, |v| Action::EditVehicle(v.clone()))
    }

    fn select_prev(&mut self) {
        self.selected = match self.selected {
            Some(i) if i > 0 => Some(i - 1),
            other => other,
        };
    }

    fn select_next(&mut self) {
        self.selected = match self.selected {
            Some(i) if i + 1 < self.vehicles.len() => Some(i + 1),
            other => other,
        };
    }
}

impl ScreenState for VehicleListState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Up => {
                self.select_prev();
                Action::None
            }
            KeyCode::Down => {
                self.select_next();
                Action::None
            }
            KeyCode::Enter => self.edit_selected(),
            KeyCode::Char('n') => Action::AddVehicle,
            KeyCode::Char('s') => Action::Navigate(Screen::Settings),
            KeyCode::Char('?') => Action::Navigate(Screen::Help),
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            _ => Action::None,
        }
    }
}

fn allowance_label(vehicle: &VehicleRecord) -> String {
    let unit = vehicle.length_unit.abbreviation();
    match vehicle.monthly_allowance() {
        Some(monthly) => format!("{} {unit} ({monthly}/mo)", vehicle.allowed_mileage),
        None => "unlimited".to_string(),
    }
}

/// Renders the vehicle list screen.
#[mutants::skip]
pub fn draw_vehicle_list(state: &VehicleListState, frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(" Vehicles ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if state.vehicles().is_empty() {
        let mut lines = vec![
            Line::from(""),
            Line::from("No vehicles yet."),
            Line::from("Press 'n' to add your leased vehicle."),
        ];
        if let Some(err) = state.error() {
            lines.push(Line::from(""));
            lines.push(Line::styled(err, Style::default().fg(Color::Red)));
        }
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(paragraph, area);
        return;
    }

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let header = Row::new(vec!["", "Nickname", "Lease", "Ends", "Allowance"])
        .style(Style::default().add_modifier(Modifier::BOLD))
        .bottom_margin(1);

    let rows: Vec<Row> = state
        .vehicles()
        .iter()
        .enumerate()
        .map(|(i, v)| {
            let style = if state.selected() == Some(i) {
                Style::default().fg(Color::Black).bg(Color::Yellow)
            } else {
                Style::default()
            };
            Row::new(vec![
                (if v.show_on_widget { "★" } else { " " }).to_string(),
                v.name.clone(),
                format!("{} mo", v.lease_length_months),
                v.lease_end_date().format("%Y-%m-%d").to_string(),
                allowance_label(v),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(2),
        Constraint::Min(12),
        Constraint::Length(8),
        Constraint::Length(12),
        Constraint::Length(22),
    ];

    let table = Table::new(rows, widths).header(header);

    let [table_area, footer_area] =
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    frame.render_widget(table, table_area);

    if let Some(err) = state.error() {
        let err_line = Paragraph::new(err)
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        frame.render_widget(err_line, footer_area);
    } else {
        let footer = Paragraph::new("n: add  Enter: edit  s: settings  ?: help  q: quit")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(footer, footer_area);
    }
}
