use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Frame, Terminal};
use tracing::{debug, warn};

use crate::garage::{GarageError, remove_vehicle, save_vehicle, select_widget_vehicle};
use crate::model::{EditTarget, VehicleDraft, VehicleRecord};
use crate::storage::{VehicleStore, WidgetRefresher, load_avatar};

use super::action::{Action, ScreenState};
use super::error::AppError;
use super::screens::{
    HelpState, SettingsState, VehicleEditState, VehicleListState, draw_help, draw_settings,
    draw_vehicle_edit, draw_vehicle_list,
};

/// All screens the app can navigate between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    /// Active vehicles; the start screen.
    VehicleList,
    /// Add or edit form.
    VehicleEdit,
    /// Widget vehicle picker.
    Settings,
    /// Key reference.
    Help,
}

/// Top-level application state.
pub struct App {
    screen: Screen,
    store: VehicleStore,
    refresher: Box<dyn WidgetRefresher>,
    vehicle_list: VehicleListState,
    vehicle_edit: VehicleEditState,
    settings: SettingsState,
    help: HelpState,
    should_quit: bool,
}

impl App {
    /// Creates a new `App` on the vehicle list, loading vehicles from `store`.
    pub fn new(store: VehicleStore, refresher: Box<dyn WidgetRefresher>) -> Result<Self, AppError> {
        let mut vehicle_list = VehicleListState::new();
        vehicle_list.load(&store)?;
        let mut settings = SettingsState::new();
        settings.load(&store)?;

        Ok(Self {
            screen: Screen::VehicleList,
            store,
            refresher,
            vehicle_list,
            vehicle_edit: VehicleEditState::new(EditTarget::Creating, Local::now().date_naive()),
            settings,
            help: HelpState::new(),
            should_quit: false,
        })
    }

    /// Main event loop: draw → read event → dispatch → check quit.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        match self.screen {
            Screen::VehicleList => draw_vehicle_list(&self.vehicle_list, frame, area),
            Screen::VehicleEdit => draw_vehicle_edit(&self.vehicle_edit, frame, area),
            Screen::Settings => draw_settings(&self.settings, frame, area),
            Screen::Help => draw_help(&self.help, frame, area),
        }
    }

    /// Handles a key event: F1 opens help, everything else goes to the current screen.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::F(1) && self.screen != Screen::Help {
            self.apply(Action::Navigate(Screen::Help));
            return;
        }

        let action = match self.screen {
            Screen::VehicleList => self.vehicle_list.handle_key(key),
            Screen::VehicleEdit => self.vehicle_edit.handle_key(key),
            Screen::Settings => self.settings.handle_key(key),
            Screen::Help => self.help.handle_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => self.navigate(screen),
            Action::AddVehicle => self.open_editor(EditTarget::Creating),
            Action::EditVehicle(record) => match self.store.load_vehicle(record.id) {
                Ok(current) => self.open_editor(EditTarget::Editing(current)),
                Err(e) => {
                    warn!(error = %e, id = %record.id, "vehicle not loaded");
                    self.vehicle_list.set_error(e.to_string());
                }
            },
            Action::LoadAvatar(path) => match load_avatar(&path) {
                Ok(avatar) => self.vehicle_edit.set_avatar(avatar),
                Err(e) => {
                    warn!(error = %e, path = %path.display(), "photo not loaded");
                    self.vehicle_edit.set_error(e.to_string());
                }
            },
            Action::SaveVehicle { draft, target } => self.save(&draft, target),
            Action::RemoveVehicle(record) => self.remove(&record),
            Action::SetWidgetVehicle(index) => self.select_widget(index),
            Action::Quit => self.should_quit = true,
        }
    }

    fn navigate(&mut self, screen: Screen) {
        let loaded = match screen {
            Screen::VehicleList => self.vehicle_list.load(&self.store),
            Screen::Settings => self.settings.load(&self.store),
            Screen::Help => {
                self.help.open_from(self.screen);
                Ok(())
            }
            Screen::VehicleEdit => Ok(()),
        };
        if let Err(e) = loaded {
            warn!(error = %e, ?screen, "reload failed");
            match screen {
                Screen::VehicleList => self.vehicle_list.set_error(e.to_string()),
                Screen::Settings => self.settings.set_error(e.to_string()),
                Screen::VehicleEdit | Screen::Help => {}
            }
        }
        debug!(from = ?self.screen, to = ?screen, "navigate");
        self.screen = screen;
    }

    fn open_editor(&mut self, target: EditTarget) {
        self.vehicle_edit = VehicleEditState::new(target, Local::now().date_naive());
        self.navigate(Screen::VehicleEdit);
    }

    fn save(&mut self, draft: &VehicleDraft, target: EditTarget) {
        match save_vehicle(&self.store, draft, target, Local::now()) {
            Ok(_) => self.navigate(Screen::VehicleList),
            Err(e) => self.report(e),
        }
    }

    fn remove(&mut self, record: &VehicleRecord) {
        match remove_vehicle(&self.store, self.refresher.as_ref(), record) {
            Ok(_) => self.navigate(Screen::VehicleList),
            Err(e) => self.report(e),
        }
    }

    fn select_widget(&mut self, index: usize) {
        match select_widget_vehicle(
            &self.store,
            self.refresher.as_ref(),
            self.settings.vehicles(),
            index,
        ) {
            Ok(marked) => self.settings.set_vehicles(marked),
            Err(e) => self.report(e),
        }
    }

    /// Logs a failed workflow and shows it on the current screen.
    fn report(&mut self, error: GarageError) {
        if error.is_invalid_input() {
            debug!(error = %error, "input rejected");
        } else {
            warn!(error = %error, screen = ?self.screen, "operation failed");
        }
        match (self.screen, error) {
            (Screen::VehicleEdit, GarageError::InvalidInput(reason)) => {
                self.vehicle_edit.show_validation_error(&reason);
            }
            (Screen::VehicleEdit, e) => self.vehicle_edit.set_error(e.to_string()),
            (Screen::Settings, e) => self.settings.set_error(e.to_string()),
            (Screen::VehicleList | Screen::Help, e) => self.vehicle_list.set_error(e.to_string()),
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }
}
