//! TUI application state and key handling

use std::time::Instant;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::view;
use crate::cli::form::{ContactForm, Field, Submission};
use crate::cli::notify::{Notifier, ToastQueue};
use crate::domain::{Contact, ContactId, ContactStore};
use crate::storage::NotifyConfig;

/// Which section has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Form,
    Filter,
    List,
}

/// Application state
pub struct App {
    store: ContactStore,
    form: ContactForm,
    toasts: ToastQueue,
    focus: Focus,
    /// Index into the visible contacts
    selected: usize,
    should_quit: bool,
}

impl App {
    pub fn new(store: ContactStore, notify: NotifyConfig) -> Self {
        Self {
            store,
            form: ContactForm::new(),
            toasts: ToastQueue::new(notify),
            focus: Focus::Form,
            selected: 0,
            should_quit: false,
        }
    }

    /// Runs the draw/event loop until the user quits
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| view::draw(frame, self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key),
                Event::Resize => {}
                Event::Tick => self.toasts.expire(Instant::now()),
            }
        }

        Ok(())
    }

    pub fn store(&self) -> &ContactStore {
        &self.store
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn toasts(&self) -> &ToastQueue {
        &self.toasts
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// The contact under the list cursor
    pub fn selected_contact(&self) -> Option<&Contact> {
        self.store.visible_contacts().nth(self.selected)
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        match key.code {
            KeyCode::Esc => {
                if self.toasts.is_empty() {
                    self.should_quit = true;
                } else {
                    self.toasts.dismiss_all();
                }
                return;
            }
            KeyCode::Tab => {
                self.focus_next();
                return;
            }
            KeyCode::BackTab => {
                self.focus_prev();
                return;
            }
            _ => {}
        }

        match self.focus {
            Focus::Form => self.handle_form_key(key),
            Focus::Filter => self.handle_filter_key(key),
            Focus::List => self.handle_list_key(key),
        }
    }

    fn handle_form_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Enter => self.submit_form(),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Up | KeyCode::Down => self.form.toggle_focus(),
            KeyCode::Char(c) => self.form.push_char(c),
            _ => {}
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) {
        let mut text = self.store.filter().to_string();
        match key.code {
            KeyCode::Backspace => {
                text.pop();
            }
            KeyCode::Char(c) => text.push(c),
            KeyCode::Enter | KeyCode::Down => {
                self.focus = Focus::List;
                return;
            }
            _ => return,
        }
        self.store.set_filter(&text);
        self.clamp_selection();
    }

    fn handle_list_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.move_selection(1),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection(-1),
            KeyCode::Char('d') | KeyCode::Delete => self.delete_selected(),
            KeyCode::Char('/') => self.focus = Focus::Filter,
            KeyCode::Char('n') => self.focus = Focus::Form,
            _ => {}
        }
    }

    /// Form name -> form number -> filter -> list -> form name
    fn focus_next(&mut self) {
        match (self.focus, self.form.focus()) {
            (Focus::Form, Field::Name) => self.form.toggle_focus(),
            (Focus::Form, Field::Number) => {
                self.form.toggle_focus();
                self.focus = Focus::Filter;
            }
            (Focus::Filter, _) => self.focus = Focus::List,
            (Focus::List, _) => self.focus = Focus::Form,
        }
    }

    fn focus_prev(&mut self) {
        match (self.focus, self.form.focus()) {
            (Focus::Form, Field::Number) => self.form.toggle_focus(),
            (Focus::Form, Field::Name) => self.focus = Focus::List,
            (Focus::Filter, _) => {
                self.focus = Focus::Form;
                if self.form.focus() == Field::Name {
                    self.form.toggle_focus();
                }
            }
            (Focus::List, _) => self.focus = Focus::Filter,
        }
    }

    fn submit_form(&mut self) {
        if let Submission::Added(contact) = self.form.submit(&mut self.store, &mut self.toasts) {
            self.toasts.success(&format!("{} added to contacts", contact.name));
            self.clamp_selection();
        }
    }

    fn delete_selected(&mut self) {
        let id: Option<ContactId> = self.selected_contact().map(|c| c.id.clone());
        if let Some(id) = id {
            self.store.delete_contact(&id);
            self.clamp_selection();
        }
    }

    fn move_selection(&mut self, delta: isize) {
        let count = self.store.visible_contacts().count();
        if count == 0 {
            self.selected = 0;
            return;
        }
        self.selected = (self.selected as isize + delta).rem_euclid(count as isize) as usize;
    }

    fn clamp_selection(&mut self) {
        let count = self.store.visible_contacts().count();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::notify::ToastKind;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn seeded_app() -> App {
        let store = ContactStore::with_contacts(vec![
            Contact::new("id-1".parse().unwrap(), "Alice", "123"),
            Contact::new("id-2".parse().unwrap(), "Bob", "456"),
            Contact::new("id-3".parse().unwrap(), "Carol", "789"),
        ]);
        App::new(store, NotifyConfig::default())
    }

    fn visible_names(app: &App) -> Vec<String> {
        app.store().visible_contacts().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn add_contact_through_form() {
        let mut app = seeded_app();
        type_text(&mut app, "Dave");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "000");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(visible_names(&app)[0], "Dave");
        assert_eq!(app.form().name(), "");
        assert_eq!(app.toasts().toasts()[0].kind, ToastKind::Success);
    }

    #[test]
    fn duplicate_shows_error_toast() {
        let mut app = seeded_app();
        type_text(&mut app, "alice");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "999");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.store().len(), 3);
        let toast = &app.toasts().toasts()[0];
        assert_eq!(toast.kind, ToastKind::Error);
        assert_eq!(toast.message, "alice: is already in contacts");
        assert_eq!(app.form().name(), "alice");
    }

    #[test]
    fn tab_cycles_through_sections() {
        let mut app = seeded_app();
        assert_eq!(app.focus(), Focus::Form);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!((app.focus(), app.form().focus()), (Focus::Form, Field::Number));
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::Filter);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus(), Focus::List);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!((app.focus(), app.form().focus()), (Focus::Form, Field::Name));

        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::List);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::Filter);
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!((app.focus(), app.form().focus()), (Focus::Form, Field::Number));
    }

    #[test]
    fn typing_in_filter_narrows_list() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Tab));
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "AL");

        assert_eq!(app.store().filter(), "al");
        assert_eq!(visible_names(&app), vec!["Alice"]);

        app.handle_key(key(KeyCode::Backspace));
        app.handle_key(key(KeyCode::Backspace));
        assert_eq!(visible_names(&app).len(), 3);
    }

    #[test]
    fn delete_selected_contact() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.focus(), Focus::List);

        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.selected_contact().unwrap().name, "Bob");

        app.handle_key(key(KeyCode::Char('d')));
        assert_eq!(visible_names(&app), vec!["Alice", "Carol"]);
        assert_eq!(app.selected_contact().unwrap().name, "Carol");
    }

    #[test]
    fn deleting_last_row_moves_cursor_up() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.selected(), 2);

        app.handle_key(key(KeyCode::Delete));
        assert_eq!(app.selected(), 1);
        assert_eq!(app.selected_contact().unwrap().name, "Bob");
    }

    #[test]
    fn delete_on_empty_list_is_noop() {
        let mut app = App::new(ContactStore::new(), NotifyConfig::default());
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Char('d')));
        app.handle_key(key(KeyCode::Down));

        assert!(app.store().is_empty());
        assert_eq!(app.selected(), 0);
    }

    #[test]
    fn letters_in_form_are_not_shortcuts() {
        let mut app = seeded_app();
        type_text(&mut app, "qd");

        assert!(!app.should_quit());
        assert_eq!(app.form().name(), "qd");
        assert_eq!(app.store().len(), 3);
    }

    #[test]
    fn esc_dismisses_toasts_then_quits() {
        let mut app = seeded_app();
        app.handle_key(key(KeyCode::Enter));
        assert!(!app.toasts().is_empty());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.toasts().is_empty());
        assert!(!app.should_quit());

        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit());
    }

    #[test]
    fn ctrl_c_quits_from_any_section() {
        let mut app = seeded_app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit());
    }
}
