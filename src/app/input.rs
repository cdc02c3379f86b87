use super::Editor;
use crate::input::commands::Command;
use crate::input::keybindings::{Action, KeyContext};
use crate::view::prompt::{Prompt, PromptType};
use crossterm::event::{KeyCode, KeyModifiers};
use std::path::PathBuf;

impl Editor {
    /// Determine the current keybinding context
    pub fn key_context(&self) -> KeyContext {
        if self.prompt.is_some() {
            KeyContext::Prompt
        } else {
            KeyContext::Normal
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        tracing::trace!(
            "Editor.handle_key: code={:?}, modifiers={:?}",
            code,
            modifiers
        );

        let context = self.key_context();
        let action = self.keybindings.resolve(code, modifiers, context);

        match context {
            KeyContext::Prompt => self.handle_prompt_action(action),
            KeyContext::Normal => self.handle_action(action),
        }
    }

    fn handle_action(&mut self, action: Action) {
        if let Some(command) = action.to_command() {
            self.handle_command(command);
            return;
        }

        match action {
            Action::Search => self.start_search_prompt(),
            Action::Open => {
                let initial = format!("{}/", self.working_dir.display());
                self.start_prompt(Prompt::with_initial_text(
                    "Open file: ",
                    PromptType::OpenFile,
                    initial,
                ));
            }
            Action::None => {}
            other => tracing::debug!("action {:?} ignored outside a prompt", other),
        }
    }

    fn start_search_prompt(&mut self) {
        let current = self.state.search().query().to_string();
        self.start_prompt(Prompt::with_initial_text("Search: ", PromptType::Search, current));
    }

    fn start_prompt(&mut self, prompt: Prompt) {
        tracing::debug!("prompt opened: {:?}", prompt.prompt_type);
        self.quit_pending = false;
        self.prompt = Some(prompt);
    }

    /// Keys typed while a prompt is open
    ///
    /// The search prompt is incremental: every edit re-runs the query.
    fn handle_prompt_action(&mut self, action: Action) {
        let Some(prompt) = self.prompt.as_mut() else {
            return;
        };
        let prompt_type = prompt.prompt_type;

        match action {
            Action::InsertChar(ch) => {
                prompt.insert_char(ch);
                self.prompt_input_changed(prompt_type);
            }
            Action::PromptBackspace => {
                if prompt.backspace() {
                    self.prompt_input_changed(prompt_type);
                }
            }
            Action::PromptConfirm => self.confirm_prompt(),
            Action::PromptCancel => {
                self.prompt = None;
                if prompt_type == PromptType::Search {
                    self.handle_command(Command::SetSearchQuery(String::new()));
                }
                self.set_status_message("Cancelled".to_string());
            }
            Action::Quit => {
                self.prompt = None;
                self.handle_command(Command::Quit);
            }
            _ => {}
        }
    }

    fn prompt_input_changed(&mut self, prompt_type: PromptType) {
        if prompt_type != PromptType::Search {
            return;
        }
        let query = self
            .prompt
            .as_ref()
            .map(|p| p.get_text().to_string())
            .unwrap_or_default();
        self.handle_command(Command::SetSearchQuery(query));
    }

    fn confirm_prompt(&mut self) {
        let Some(prompt) = self.prompt.take() else {
            return;
        };
        let input = prompt.input;

        match prompt.prompt_type {
            PromptType::Search => {
                if input.is_empty() {
                    self.handle_command(Command::SetSearchQuery(String::new()));
                } else {
                    self.handle_command(Command::FindNext);
                }
            }
            PromptType::OpenFile => {
                let path = input.trim();
                if path.is_empty() {
                    self.set_status_message("No file name given".to_string());
                } else {
                    self.handle_command(Command::Open(PathBuf::from(path)));
                }
            }
        }
    }
}
