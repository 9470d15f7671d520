use tokio::sync::watch;
use tracing::{debug, info};

use crate::app::ChatState;
use crate::store::{Revision, Store};
use crate::tui::{
    message::Author,
    theme::{ThemeIcon, ThemeMode},
};

/// State that only lives as long as the rendered view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiState {
    pub draft: String,
    pub search_visible: bool,
    pub theme_icon: ThemeIcon,
    pub theme_mode: ThemeMode,
}

impl UiState {
    pub fn new(theme: ThemeMode) -> Self {
        Self {
            draft: String::new(),
            search_visible: false,
            theme_icon: ThemeIcon::for_mode(theme),
            theme_mode: theme,
        }
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}

/// Everything a user can do to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Replace the whole draft, as a text field change does
    EditDraft(String),
    InsertChar(char),
    Newline,
    Backspace,
    Submit,
    ToggleSearch,
    ToggleTheme,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Quit,
}

/// One running chat session: the conversation plus its view-local state.
///
/// Both halves sit in their own [`Store`], so every mutation is visible to
/// whoever holds a [`SessionWatch`].
pub struct ChatSession {
    chat: Store<ChatState>,
    ui: Store<UiState>,
}

impl ChatSession {
    /// Start a session with the demo conversation
    pub fn new(theme: ThemeMode) -> Self {
        Self::with_chat(ChatState::seeded(), theme)
    }

    pub fn with_chat(chat: ChatState, theme: ThemeMode) -> Self {
        Self {
            chat: Store::new(chat),
            ui: Store::new(UiState::new(theme)),
        }
    }

    pub fn chat(&self) -> &ChatState {
        self.chat.get()
    }

    pub fn ui(&self) -> &UiState {
        self.ui.get()
    }

    pub fn watch(&self) -> SessionWatch {
        SessionWatch {
            chat: self.chat.subscribe(),
            ui: self.ui.subscribe(),
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Outcome {
        debug!(?action, "dispatch");
        match action {
            Action::EditDraft(text) => self.ui.update(|ui| ui.draft = text),
            Action::InsertChar(c) => self.ui.update(|ui| ui.draft.push(c)),
            Action::Newline => self.ui.update(|ui| ui.draft.push('\n')),
            Action::Backspace => {
                if !self.ui.get().draft.is_empty() {
                    self.ui.update(|ui| {
                        ui.draft.pop();
                    });
                }
            }
            Action::Submit => {
                self.submit();
            }
            Action::ToggleSearch => self.toggle_search(),
            Action::ToggleTheme => self.toggle_theme(),
            Action::Quit => return Outcome::Quit,
        }
        Outcome::Continue
    }

    /// Post the draft as a local-user message. Blank drafts are left alone.
    pub fn submit(&mut self) -> bool {
        let draft = self.ui.get().draft.clone();
        if draft.trim().is_empty() {
            debug!("ignoring blank draft");
            return false;
        }

        let len = draft.len();
        self.chat.update(|chat| chat.append(Author::Me, draft));
        self.ui.update(|ui| ui.draft.clear());
        info!(len, total = self.chat.get().len(), "message submitted");
        true
    }

    pub fn toggle_search(&mut self) {
        self.ui.update(|ui| ui.search_visible = !ui.search_visible);
        debug!(visible = self.ui.get().search_visible, "search bar toggled");
    }

    pub fn toggle_theme(&mut self) {
        self.ui.update(|ui| {
            ui.theme_mode = ui.theme_mode.toggled();
            ui.theme_icon = ThemeIcon::for_mode(ui.theme_mode);
        });
        info!(mode = ?self.ui.get().theme_mode, "theme changed");
    }
}

/// Tracks store revisions so the render loop knows when to redraw
pub struct SessionWatch {
    chat: watch::Receiver<Revision>,
    ui: watch::Receiver<Revision>,
}

impl SessionWatch {
    /// True if either store changed since the last call
    pub fn changed(&mut self) -> bool {
        let chat = Self::mark_seen(&mut self.chat);
        let ui = Self::mark_seen(&mut self.ui);
        chat || ui
    }

    fn mark_seen(rx: &mut watch::Receiver<Revision>) -> bool {
        match rx.has_changed() {
            Ok(true) => {
                let _ = rx.borrow_and_update();
                true
            }
            _ => false,
        }
    }
}
