use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::time::{Duration, Instant};

use crate::config::AppConfig;
use crate::error::{require_name, PetError};
use crate::pet::{Action, PetWidget};
use crate::sound::SoundPlayer;
use crate::theme::Theme;
use crate::ui::view::ViewState;

/// How long a status message stays in the info line
const STATUS_TIMEOUT: Duration = Duration::from_secs(3);

/// Lines moved per PageUp/PageDown in the log
const LOG_PAGE: usize = 5;

/// Keys bound to pet actions
pub const ACTION_KEYS: [(char, Action); 4] = [
    ('t', Action::Treat),
    ('p', Action::Play),
    ('e', Action::Exercise),
    ('s', Action::Sleep),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Popup {
    None,
    CreatePet,
    RenamePet,
    Notice, // Blocking message, must be dismissed
    Help,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateField {
    Name,
    Kind,
}

pub struct App {
    pub widget: PetWidget<ViewState, Box<dyn SoundPlayer>>,
    pub popup: Popup,
    pub theme: Theme,

    // Create/rename popups
    pub kinds: Vec<String>,
    pub kind_choice: usize,
    pub name_input: String,
    pub kind_input: String,
    pub create_field: CreateField,

    // Notice popup and where dismissing it returns to
    pub notice: Option<String>,
    notice_return: Popup,

    // Status message (shown in info line, auto-clears after timeout)
    pub status_message: Option<String>,
    pub status_message_time: Option<Instant>,

    animation_duration: Duration,
}

impl App {
    /// Build the app and create the configured starting pet
    pub fn new(config: &AppConfig, sound: Box<dyn SoundPlayer>) -> Self {
        let widget = PetWidget::new(ViewState::default(), sound, config.assets_dir.clone());
        let kind_input = config.kinds.first().cloned().unwrap_or_default();

        let mut app = Self {
            widget,
            popup: Popup::None,
            theme: Theme::from_overrides(&config.theme),

            kinds: config.kinds.clone(),
            kind_choice: 0,
            name_input: String::new(),
            kind_input,
            create_field: CreateField::Name,

            notice: None,
            notice_return: Popup::None,

            status_message: None,
            status_message_time: None,

            animation_duration: config.animation_duration(),
        };

        let start = &config.default_pet;
        app.widget.create_pet(&start.name, &start.kind);
        app
    }

    /// Set a status message (auto-clears after 3 seconds)
    fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
        self.status_message_time = Some(Instant::now());
    }

    fn show_notice(&mut self, msg: impl Into<String>) {
        self.notice = Some(msg.into());
        self.notice_return = self.popup;
        self.popup = Popup::Notice;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        // Ctrl/Alt chords are not bindings and never typed text
        if matches!(key.code, KeyCode::Char(_))
            && !key.modifiers.difference(KeyModifiers::SHIFT).is_empty()
        {
            return;
        }

        if self.popup != Popup::None {
            self.handle_popup_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            // Roster navigation
            KeyCode::Char('j') | KeyCode::Down => self.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.select_previous(),
            KeyCode::Char(c @ '1'..='9') => {
                // Out-of-range positions fall through to a silent no-op
                let index = c as usize - '1' as usize;
                self.widget.select_pet(index);
            }

            KeyCode::Char('n') => self.start_create(),
            KeyCode::Char('r') => self.start_rename(),

            // Log scrollback
            KeyCode::PageUp => self.widget.display_mut().scroll_log_back(LOG_PAGE),
            KeyCode::PageDown => self.widget.display_mut().scroll_log_forward(LOG_PAGE),
            KeyCode::End => self.widget.display_mut().log_scroll = 0,

            KeyCode::Char('?') | KeyCode::Char('h') => self.popup = Popup::Help,

            // Actions on the selected pet
            KeyCode::Char(c) => {
                if let Some(&(_, action)) = ACTION_KEYS.iter().find(|(k, _)| *k == c) {
                    self.widget.apply_action(action);
                }
            }

            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        match self.popup {
            Popup::CreatePet => self.handle_create_key(key),
            Popup::RenamePet => self.handle_rename_key(key),
            Popup::Notice => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.notice = None;
                    self.popup = self.notice_return;
                    self.notice_return = Popup::None;
                }
            }
            Popup::Help => {
                if matches!(
                    key.code,
                    KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') | KeyCode::Enter | KeyCode::Char('q')
                ) {
                    self.popup = Popup::None;
                }
            }
            Popup::None => {}
        }
    }

    fn select_next(&mut self) {
        if self.widget.registry().is_empty() {
            return;
        }
        let len = self.widget.registry().len();
        let next = match self.widget.registry().selected() {
            Some(i) => (i + 1) % len,
            None => 0,
        };
        self.widget.select_pet(next);
    }

    fn select_previous(&mut self) {
        if self.widget.registry().is_empty() {
            return;
        }
        let len = self.widget.registry().len();
        let prev = match self.widget.registry().selected() {
            Some(i) => i.checked_sub(1).unwrap_or(len - 1),
            None => len - 1,
        };
        self.widget.select_pet(prev);
    }

    fn start_create(&mut self) {
        self.name_input.clear();
        self.create_field = CreateField::Name;
        self.kind_choice = 0;
        self.kind_input = self.kinds.first().cloned().unwrap_or_default();
        self.popup = Popup::CreatePet;
    }

    fn start_rename(&mut self) {
        if self.widget.current_pet().is_none() {
            self.set_status("No pet selected");
            return;
        }
        self.name_input.clear();
        self.popup = Popup::RenamePet;
    }

    fn handle_create_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.name_input.clear();
                self.popup = Popup::None;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                self.create_field = match self.create_field {
                    CreateField::Name => CreateField::Kind,
                    CreateField::Kind => CreateField::Name,
                };
            }
            KeyCode::Left if self.create_field == CreateField::Kind => self.cycle_kind(false),
            KeyCode::Right if self.create_field == CreateField::Kind => self.cycle_kind(true),
            KeyCode::Enter => {
                if let Err(e) = self.submit_create() {
                    self.show_notice(e.to_string());
                }
            }
            KeyCode::Backspace => {
                self.focused_input().pop();
            }
            KeyCode::Char(c) => self.focused_input().push(c),
            _ => {}
        }
    }

    fn handle_rename_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.name_input.clear();
                self.popup = Popup::None;
            }
            KeyCode::Enter => {
                if let Err(e) = self.submit_rename() {
                    self.show_notice(e.to_string());
                }
            }
            KeyCode::Backspace => {
                self.name_input.pop();
            }
            KeyCode::Char(c) => self.name_input.push(c),
            _ => {}
        }
    }

    fn focused_input(&mut self) -> &mut String {
        match self.create_field {
            CreateField::Name => &mut self.name_input,
            CreateField::Kind => &mut self.kind_input,
        }
    }

    fn cycle_kind(&mut self, forward: bool) {
        if self.kinds.is_empty() {
            return;
        }
        let len = self.kinds.len();
        self.kind_choice = if forward {
            (self.kind_choice + 1) % len
        } else {
            self.kind_choice.checked_sub(1).unwrap_or(len - 1)
        };
        self.kind_input = self.kinds[self.kind_choice].clone();
    }

    /// Kind is passed through as typed; only the name must be present
    fn submit_create(&mut self) -> Result<(), PetError> {
        let name = require_name(&self.name_input)?.to_string();
        let kind = self.kind_input.clone();

        self.widget.create_pet(&name, &kind);
        self.name_input.clear();
        self.popup = Popup::None;
        self.set_status(format!("Say hi to {}!", name));
        Ok(())
    }

    fn submit_rename(&mut self) -> Result<(), PetError> {
        let name = require_name(&self.name_input)?.to_string();

        self.widget.rename_pet(&name);
        self.name_input.clear();
        self.popup = Popup::None;
        Ok(())
    }

    /// Periodic housekeeping: expire the status line and finished animations
    pub fn tick(&mut self) {
        if let Some(time) = self.status_message_time {
            if time.elapsed() >= STATUS_TIMEOUT {
                self.status_message = None;
                self.status_message_time = None;
            }
        }

        let duration = self.animation_duration;
        self.widget
            .display_mut()
            .expire_animation(Instant::now(), duration);
    }
}
