//! Vehicle edit screen — add a new vehicle or change an existing one.

use std::path::PathBuf;

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::model::{Avatar, Currency, EditTarget, LengthUnit, ValidationError, VehicleDraft};
use crate::tui::action::{Action, ScreenState};
use crate::tui::app::Screen;
use crate::tui::widgets::form::{FieldKind, Form, FormField, draw_form};

/// Field index for the photo file path.
const PHOTO: usize = 0;
/// Field index for the vehicle nickname.
const NAME: usize = 1;
/// Field index for the odometer reading at lease start.
const STARTING: usize = 2;
/// Field index for the total mileage allowed.
const ALLOWED: usize = 3;
/// Field index for the lease term in months.
const LEASE_LENGTH: usize = 4;
/// Field index for the lease start date picker.
const START_DATE: usize = 5;
/// Field index for the overage fee.
const FEE: usize = 6;
/// Field index for the length unit picker.
const LENGTH_UNIT: usize = 7;
/// Field index for the currency picker.
const CURRENCY: usize = 8;

/// State for the vehicle edit screen.
#[derive(Debug, Clone)]
pub struct VehicleEditState {
    form: Form,
    target: EditTarget,
    today: NaiveDate,
    start_date: NaiveDate,
    length_unit: LengthUnit,
    currency: Currency,
    avatar: Option<Avatar>,
    general_error: Option<String>,
}

impl VehicleEditState {
    /// Creates the form for `target`, pre-filled when editing.
    ///
    /// `today` caps the start date picker.
    pub fn new(target: EditTarget, today: NaiveDate) -> Self {
        let draft = VehicleDraft::for_target(&target, today);
        let form = Form::new(vec![
            FormField::new("Photo file (Enter to load)", FieldKind::Text, true),
            FormField::new("Nickname", FieldKind::Text, true).with_value(&draft.name),
            FormField::new("Starting mileage", FieldKind::Integer, true)
                .with_value(&draft.starting),
            FormField::new("Total mileage allowed", FieldKind::Integer, false)
                .with_value(&draft.allowed),
            FormField::new("Length of lease (months)", FieldKind::Integer, true)
                .with_value(&draft.lease_length),
            FormField::new("Lease start date", FieldKind::Choice, false)
                .with_value(format_date(draft.start_date)),
            FormField::new("Overage fee", FieldKind::Decimal, false).with_value(&draft.fee),
            FormField::new("Length unit", FieldKind::Choice, false)
                .with_value(draft.length_unit.long_name()),
            FormField::new("Currency", FieldKind::Choice, false)
                .with_value(draft.currency.code()),
        ]);
        Self {
            form,
            target,
            today,
            start_date: draft.start_date,
            length_unit: draft.length_unit,
            currency: draft.currency,
            avatar: draft.avatar,
            general_error: None,
        }
    }

    /// Returns a reference to the form for rendering.
    pub fn form(&self) -> &Form {
        &self.form
    }

    /// Returns what a save would apply to.
    pub fn target(&self) -> &EditTarget {
        &self.target
    }

    /// Returns the loaded photo, if any.
    pub fn avatar(&self) -> Option<&Avatar> {
        self.avatar.as_ref()
    }

    /// Stores a photo supplied by the image loader.
    pub fn set_avatar(&mut self, avatar: Avatar) {
        self.avatar = Some(avatar);
        self.form.set_value(PHOTO, "");
        self.general_error = None;
    }

    /// Sets a general error message not tied to a specific field.
    pub fn set_error(&mut self, msg: String) {
        self.general_error = Some(msg);
    }

    /// Returns the general error message, if any.
    pub fn general_error(&self) -> Option<&str> {
        self.general_error.as_deref()
    }

    /// Shows a rejected save next to the field it concerns.
    pub fn show_validation_error(&mut self, error: &ValidationError) {
        self.form.set_error(field_for(error), error.to_string());
    }

    /// Collects the current input into a draft.
    pub fn draft(&self) -> VehicleDraft {
        VehicleDraft {
            name: self.form.value(NAME).to_string(),
            starting: self.form.value(STARTING).to_string(),
            allowed: self.form.value(ALLOWED).to_string(),
            lease_length: self.form.value(LEASE_LENGTH).to_string(),
            fee: self.form.value(FEE).to_string(),
            start_date: self.start_date,
            length_unit: self.length_unit,
            currency: self.currency,
            avatar: self.avatar.clone(),
        }
    }

    /// Returns `true` when the required fields are filled in.
    pub fn can_save(&self) -> bool {
        self.draft().can_attempt_save()
    }

    fn submit(&mut self) -> Action {
        self.form.clear_errors();
        self.general_error = None;

        let draft = self.draft();
        if !draft.can_attempt_save() {
            self.general_error =
                Some("Photo, nickname, starting mileage and lease length are required".into());
            return Action::None;
        }
        Action::SaveVehicle {
            draft,
            target: self.target.clone(),
        }
    }

    fn load_photo(&mut self) -> Action {
        let path = self.form.value(PHOTO).trim();
        if path.is_empty() {
            return Action::None;
        }
        Action::LoadAvatar(PathBuf::from(path))
    }

    /// Steps the focused picker backward (`forward == false`) or forward.
    fn step_choice(&mut self, forward: bool) {
        match self.form.focus() {
            START_DATE => {
                let stepped = if forward {
                    self.start_date.succ_opt()
                } else {
                    self.start_date.pred_opt()
                };
                if let Some(date) = stepped.filter(|d| *d <= self.today) {
                    self.start_date = date;
                    self.form.set_value(START_DATE, format_date(date));
                }
            }
            LENGTH_UNIT => {
                self.length_unit = self.length_unit.next();
                self.form
                    .set_value(LENGTH_UNIT, self.length_unit.long_name());
            }
            CURRENCY => {
                self.currency = if forward {
                    self.currency.next()
                } else {
                    self.currency.prev()
                };
                self.form.set_value(CURRENCY, self.currency.code());
            }
            _ => {}
        }
    }
}

impl ScreenState for VehicleEditState {
    fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match (key.code, self.target.existing()) {
                (KeyCode::Char('d'), Some(record)) => Action::RemoveVehicle(record.clone()),
                _ => Action::None,
            };
        }

        match key.code {
            KeyCode::Tab => {
                self.form.focus_next();
                Action::None
            }
            KeyCode::BackTab => {
                self.form.focus_prev();
                Action::None
            }
            KeyCode::Left => {
                self.step_choice(false);
                Action::None
            }
            KeyCode::Right => {
                self.step_choice(true);
                Action::None
            }
            KeyCode::Char(ch) => {
                self.form.insert_char(ch);
                Action::None
            }
            KeyCode::Backspace => {
                self.form.delete_char();
                Action::None
            }
            KeyCode::Esc => Action::Navigate(Screen::VehicleList),
            KeyCode::Enter if self.form.focus() == PHOTO => self.load_photo(),
            KeyCode::Enter => self.submit(),
            _ => Action::None,
        }
    }
}

fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Maps a rejection reason to the form field it concerns.
fn field_for(error: &ValidationError) -> usize {
    match error {
        ValidationError::EmptyName => NAME,
        ValidationError::AllowedNotANumber | ValidationError::NegativeAllowedMileage => ALLOWED,
        ValidationError::FeeNotANumber | ValidationError::NegativeFee => FEE,
        ValidationError::StartingNotANumber | ValidationError::NegativeStartingMileage => STARTING,
        ValidationError::LeaseLengthNotANumber
        | ValidationError::LeaseLengthNotPositive
        | ValidationError::LeaseLengthTooLong => LEASE_LENGTH,
        ValidationError::MissingAvatar => PHOTO,
        ValidationError::StartDateInFuture(_) => START_DATE,
    }
}

/// Renders the vehicle edit screen.
#[mutants::skip]
pub fn draw_vehicle_edit(state: &VehicleEditState, frame: &mut Frame, area: Rect) {
    let title = match state.target().existing() {
        Some(record) => format!(" {} ", record.name),
        None => " Add vehicle ".to_string(),
    };
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let [photo_area, form_area, error_area, _spacer, footer_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(27),
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(inner);

    let photo = match state.avatar() {
        Some(avatar) => Line::from(Span::styled(
            format!("Photo loaded ({} KB)", avatar.len().div_ceil(1024)),
            Style::default().fg(Color::Green),
        )),
        None => Line::from(Span::styled(
            "No photo yet: type a PNG/JPEG path and press Enter",
            Style::default().fg(Color::DarkGray),
        )),
    };
    frame.render_widget(Paragraph::new(photo), photo_area);

    draw_form(state.form(), frame, form_area);

    if let Some(err) = state.general_error() {
        let error = Paragraph::new(Line::from(Span::styled(
            err,
            Style::default().fg(Color::Red),
        )));
        frame.render_widget(error, error_area);
    }

    let mut hints = vec![Span::raw("Tab: next  ←/→: change  ")];
    let save_style = if state.can_save() {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };
    hints.push(Span::styled("Enter: save", save_style));
    if state.target().existing().is_some() {
        hints.push(Span::raw("  Ctrl-D: delete"));
    }
    hints.push(Span::raw("  Esc: cancel"));
    let footer = Paragraph::new(Line::from(hints)).style(Style::default().fg(Color::Gray));
    frame.render_widget(footer, footer_area);
}

#[cfg(test)]
mod tests {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::model::fixtures::record;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent {
            code: KeyCode::Char(ch),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_string(state: &mut VehicleEditState, s: &str) {
        for ch in s.chars() {
            state.handle_key(press(KeyCode::Char(ch)));
        }
    }

    fn focus(state: &mut VehicleEditState, index: usize) {
        while state.form().focus() != index {
            state.handle_key(press(KeyCode::Tab));
        }
    }

    fn filled_new_form() -> VehicleEditState {
        let mut state = VehicleEditState::new(EditTarget::Creating, today());
        state.set_avatar(Avatar::new(vec![0xFF, 0xD8, 0xFF]));
        focus(&mut state, NAME);
        type_string(&mut state, "My car");
        focus(&mut state, STARTING);
        type_string(&mut state, "20");
        focus(&mut state, LEASE_LENGTH);
        type_string(&mut state, "36");
        state
    }

    mod prefill {
        use super::*;

        #[test]
        fn new_form_is_blank() {
            let state = VehicleEditState::new(EditTarget::Creating, today());
            assert_eq!(state.form().value(NAME), "");
            assert_eq!(state.form().value(START_DATE), "2026-03-14");
            assert_eq!(state.form().value(LENGTH_UNIT), "Miles");
            assert_eq!(state.form().value(CURRENCY), "USD");
            assert!(state.avatar().is_none());
            assert!(!state.can_save());
        }

        #[test]
        fn edit_form_shows_record() {
            let r = record(1);
            let state = VehicleEditState::new(EditTarget::Editing(r.clone()), today());
            assert_eq!(state.form().value(NAME), "Car 1");
            assert_eq!(state.form().value(ALLOWED), "36000");
            assert_eq!(state.form().value(FEE), "0.25");
            assert_eq!(state.form().value(START_DATE), "2025-06-01");
            assert_eq!(state.avatar(), Some(&r.avatar));
            assert!(state.can_save());
        }
    }

    mod typing {
        use super::*;

        #[test]
        fn numeric_fields_reject_letters() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, STARTING);
            type_string(&mut state, "2a0");
            assert_eq!(state.form().value(STARTING), "20");
        }

        #[test]
        fn fee_accepts_decimal_point() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, FEE);
            type_string(&mut state, "0.25");
            assert_eq!(state.form().value(FEE), "0.25");
        }
    }

    mod pickers {
        use super::*;

        #[test]
        fn date_cannot_pass_today() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, START_DATE);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.draft().start_date, today());

            state.handle_key(press(KeyCode::Left));
            assert_eq!(state.form().value(START_DATE), "2026-03-13");
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.draft().start_date, today());
        }

        #[test]
        fn unit_toggles() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, LENGTH_UNIT);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.draft().length_unit, LengthUnit::Metric);
            assert_eq!(state.form().value(LENGTH_UNIT), "Kilometers");
        }

        #[test]
        fn currency_cycles_both_ways() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, CURRENCY);
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.draft().currency, Currency::Cad);
            state.handle_key(press(KeyCode::Left));
            state.handle_key(press(KeyCode::Left));
            assert_eq!(state.draft().currency, Currency::Cny);
            assert_eq!(state.form().value(CURRENCY), "CNY");
        }

        #[test]
        fn arrows_on_text_fields_do_nothing() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, NAME);
            let before = state.draft();
            state.handle_key(press(KeyCode::Right));
            assert_eq!(state.draft(), before);
        }
    }

    mod photo {
        use super::*;

        #[test]
        fn enter_on_photo_field_requests_load() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            type_string(&mut state, "/tmp/car.png");
            assert_eq!(
                state.handle_key(press(KeyCode::Enter)),
                Action::LoadAvatar(PathBuf::from("/tmp/car.png"))
            );
        }

        #[test]
        fn enter_on_empty_photo_field_does_nothing() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
        }

        #[test]
        fn set_avatar_clears_path_and_error() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            type_string(&mut state, "/tmp/car.png");
            state.set_error("photo file is empty".into());
            state.set_avatar(Avatar::new(vec![1]));
            assert_eq!(state.form().value(PHOTO), "");
            assert_eq!(state.general_error(), None);
            assert!(state.avatar().is_some());
        }
    }

    mod submit {
        use super::*;

        #[test]
        fn incomplete_form_is_not_submitted() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            focus(&mut state, NAME);
            type_string(&mut state, "My car");
            assert_eq!(state.handle_key(press(KeyCode::Enter)), Action::None);
            assert!(state.general_error().is_some());
        }

        #[test]
        fn complete_form_submits_draft() {
            let mut state = filled_new_form();
            match state.handle_key(press(KeyCode::Enter)) {
                Action::SaveVehicle { draft, target } => {
                    assert_eq!(target, EditTarget::Creating);
                    assert_eq!(draft.name, "My car");
                    assert_eq!(draft.starting, "20");
                    assert_eq!(draft.allowed, "");
                    assert_eq!(draft.lease_length, "36");
                    assert!(draft.avatar.is_some());
                }
                other => panic!("expected SaveVehicle, got {other:?}"),
            }
        }

        #[test]
        fn edit_submit_targets_existing_record() {
            let r = record(1);
            let mut state = VehicleEditState::new(EditTarget::Editing(r.clone()), today());
            focus(&mut state, NAME);
            match state.handle_key(press(KeyCode::Enter)) {
                Action::SaveVehicle { target, .. } => {
                    assert_eq!(target, EditTarget::Editing(r));
                }
                other => panic!("expected SaveVehicle, got {other:?}"),
            }
        }

        #[test]
        fn submit_clears_previous_errors() {
            let mut state = filled_new_form();
            state.show_validation_error(&ValidationError::LeaseLengthTooLong);
            state.set_error("could not save".into());
            state.handle_key(press(KeyCode::Enter));
            assert!(!state.form().has_errors());
            assert_eq!(state.general_error(), None);
        }

        #[test]
        fn validation_errors_land_on_their_field() {
            let mut state = filled_new_form();
            state.show_validation_error(&ValidationError::LeaseLengthTooLong);
            assert!(state.form().fields()[LEASE_LENGTH].error.is_some());
            state.show_validation_error(&ValidationError::MissingAvatar);
            assert_eq!(
                state.form().fields()[PHOTO].error.as_deref(),
                Some("Please add a vehicle avatar")
            );
        }
    }

    mod navigation {
        use super::*;

        #[test]
        fn esc_cancels() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            assert_eq!(
                state.handle_key(press(KeyCode::Esc)),
                Action::Navigate(Screen::VehicleList)
            );
        }

        #[test]
        fn ctrl_d_removes_when_editing() {
            let r = record(1);
            let mut state = VehicleEditState::new(EditTarget::Editing(r.clone()), today());
            assert_eq!(state.handle_key(ctrl('d')), Action::RemoveVehicle(r));
        }

        #[test]
        fn ctrl_d_ignored_when_creating() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            assert_eq!(state.handle_key(ctrl('d')), Action::None);
            assert_eq!(state.form().value(PHOTO), "");
        }
    }

    mod rendering {
        use ratatui::Terminal;
        use ratatui::backend::TestBackend;

        use super::*;

        fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
            let mut s = String::new();
            for y in 0..buf.area.height {
                for x in 0..buf.area.width {
                    s.push(buf[(x, y)].symbol().chars().next().unwrap_or(' '));
                }
                s.push('\n');
            }
            s
        }

        fn render(state: &VehicleEditState) -> String {
            let mut terminal = Terminal::new(TestBackend::new(70, 34)).unwrap();
            terminal
                .draw(|frame| draw_vehicle_edit(state, frame, frame.area()))
                .unwrap();
            buffer_to_string(terminal.backend().buffer())
        }

        #[test]
        fn add_form_title_and_fields() {
            let output = render(&VehicleEditState::new(EditTarget::Creating, today()));
            assert!(output.contains("Add vehicle"));
            assert!(output.contains("Nickname"));
            assert!(output.contains("Length of lease"));
            assert!(output.contains("No photo yet"));
            assert!(!output.contains("Ctrl-D"));
        }

        #[test]
        fn edit_form_title_is_vehicle_name() {
            let state = VehicleEditState::new(EditTarget::Editing(record(7)), today());
            let output = render(&state);
            assert!(output.contains("Car 7"));
            assert!(output.contains("Photo loaded"));
            assert!(output.contains("Ctrl-D: delete"));
        }

        #[test]
        fn renders_general_error() {
            let mut state = VehicleEditState::new(EditTarget::Creating, today());
            state.set_error("could not save: disk full".into());
            assert!(render(&state).contains("disk full"));
        }
    }
}
