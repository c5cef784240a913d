use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::{Notifier, ScraperController};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Url,
    Question,
    Model,
    Cleaned,
}

impl Field {
    const ORDER: [Field; 4] = [Field::Url, Field::Question, Field::Model, Field::Cleaned];

    fn next(self) -> Field {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Field {
        let idx = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(idx + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Scrape,
    Parse,
    Quit,
}

/// Pending alerts. The oldest one is shown as a modal until dismissed.
#[derive(Default)]
pub struct AlertQueue {
    pending: Mutex<VecDeque<String>>,
}

impl AlertQueue {
    pub fn current(&self) -> Option<String> {
        self.pending.lock().ok()?.front().cloned()
    }

    pub fn dismiss(&self) {
        if let Ok(mut pending) = self.pending.lock() {
            pending.pop_front();
        }
    }
}

impl Notifier for AlertQueue {
    fn alert(&self, message: &str) {
        tracing::warn!(%message, "alert raised");
        if let Ok(mut pending) = self.pending.lock() {
            pending.push_back(message.to_string());
        }
    }
}

pub struct App {
    pub controller: ScraperController,
    pub alerts: Arc<AlertQueue>,
    pub focus: Field,
    pub cleaned_scroll: u16,
    pub answer_scroll: u16,
}

impl App {
    pub fn new(controller: ScraperController, alerts: Arc<AlertQueue>) -> Self {
        Self {
            controller,
            alerts,
            focus: Field::Url,
            cleaned_scroll: 0,
            answer_scroll: 0,
        }
    }

    /// Applies one key press. Returns the action the event loop should run.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        // An open alert swallows input until it is dismissed.
        if self.alerts.current().is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.alerts.dismiss();
            }
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.prev(),
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Left if self.focus == Field::Model => {
                self.controller.update(|st| st.model = st.model.prev());
            }
            KeyCode::Right if self.focus == Field::Model => {
                self.controller.update(|st| st.model = st.model.next());
            }
            KeyCode::Enter => return self.submit(),
            KeyCode::Char(c) => self.edit(|text| text.push(c)),
            KeyCode::Backspace => self.edit(|text| {
                text.pop();
            }),
            _ => {}
        }
        None
    }

    /// Up/Down scroll the cleaned panel while it has focus, the answer otherwise.
    fn focused_scroll(&mut self) -> &mut u16 {
        if self.focus == Field::Cleaned {
            &mut self.cleaned_scroll
        } else {
            &mut self.answer_scroll
        }
    }

    fn submit(&mut self) -> Option<Action> {
        // The button is disabled while a request is outstanding.
        if self.controller.snapshot().loading && self.focus != Field::Cleaned {
            return None;
        }
        match self.focus {
            Field::Url => Some(Action::Scrape),
            Field::Question => Some(Action::Parse),
            Field::Cleaned => {
                self.edit(|text| text.push('\n'));
                None
            }
            Field::Model => None,
        }
    }

    fn edit(&self, apply: impl FnOnce(&mut String)) {
        let focus = self.focus;
        self.controller.update(|st| match focus {
            Field::Url => apply(&mut st.url),
            Field::Question => apply(&mut st.question),
            Field::Cleaned => apply(&mut st.cleaned),
            Field::Model => {}
        });
    }
}
