use crate::input::commands::Command;
use crate::model::cursor::Movement;
use crossterm::event::{KeyCode, KeyModifiers};
use std::collections::HashMap;

/// Format a keybinding as a user-friendly string ("Ctrl+Shift+Z")
pub fn format_keybinding(keycode: &KeyCode, modifiers: &KeyModifiers) -> String {
    let mut result = String::new();

    if modifiers.contains(KeyModifiers::CONTROL) {
        result.push_str("Ctrl+");
    }
    if modifiers.contains(KeyModifiers::ALT) {
        result.push_str("Alt+");
    }
    if modifiers.contains(KeyModifiers::SHIFT) {
        result.push_str("Shift+");
    }

    match keycode {
        KeyCode::Enter => result.push_str("Enter"),
        KeyCode::Esc => result.push_str("Esc"),
        KeyCode::Tab => result.push_str("Tab"),
        KeyCode::Backspace => result.push_str("Backspace"),
        KeyCode::Delete => result.push_str("Del"),
        KeyCode::Home => result.push_str("Home"),
        KeyCode::End => result.push_str("End"),
        KeyCode::PageUp => result.push_str("PgUp"),
        KeyCode::PageDown => result.push_str("PgDn"),
        KeyCode::Left => result.push('←'),
        KeyCode::Right => result.push('→'),
        KeyCode::Up => result.push('↑'),
        KeyCode::Down => result.push('↓'),
        KeyCode::F(n) => result.push_str(&format!("F{n}")),
        KeyCode::Char(' ') => result.push_str("Space"),
        KeyCode::Char(c) => result.push(c.to_ascii_uppercase()),
        _ => result.push_str(&format!("{keycode:?}")),
    }

    result
}

/// Where a key press is being routed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyContext {
    /// Editing the buffer
    Normal,
    /// Typing into the search or open prompt
    Prompt,
}

/// Things a key can do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    // Character input
    InsertChar(char),
    InsertNewline,
    InsertTab,

    // Movement; the bool is "extend selection"
    Move(Movement, bool),

    // Editing
    DeleteBackward,
    DeleteForward,
    Undo,
    Redo,

    // Search
    Search,
    FindNext,
    FindPrevious,

    // Files and session
    Save,
    Open,
    Quit,

    // Prompt editing
    PromptConfirm,
    PromptCancel,
    PromptBackspace,

    None,
}

impl Action {
    /// The engine command for actions that map directly onto one
    pub fn to_command(&self) -> Option<Command> {
        Some(match self {
            Action::InsertChar(c) => Command::InsertChar(*c),
            Action::InsertTab => Command::InsertChar('\t'),
            Action::InsertNewline => Command::InsertNewline,
            Action::Move(movement, extend) => Command::MoveCursor {
                movement: *movement,
                extend: *extend,
            },
            Action::DeleteBackward => Command::DeleteBackward,
            Action::DeleteForward => Command::DeleteForward,
            Action::Undo => Command::Undo,
            Action::Redo => Command::Redo,
            Action::FindNext => Command::FindNext,
            Action::FindPrevious => Command::FindPrevious,
            Action::Save => Command::Save,
            Action::Quit => Command::Quit,
            Action::Search
            | Action::Open
            | Action::PromptConfirm
            | Action::PromptCancel
            | Action::PromptBackspace
            | Action::None => return None,
        })
    }
}

/// Maps key presses to actions per context
pub struct KeybindingResolver {
    bindings: HashMap<KeyContext, HashMap<(KeyCode, KeyModifiers), Action>>,
}

impl Default for KeybindingResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingResolver {
    pub fn new() -> Self {
        let mut resolver = Self {
            bindings: HashMap::new(),
        };
        resolver.load_defaults();
        resolver
    }

    fn bind(&mut self, context: KeyContext, code: KeyCode, modifiers: KeyModifiers, action: Action) {
        self.bindings
            .entry(context)
            .or_default()
            .insert((code, modifiers), action);
    }

    fn load_defaults(&mut self) {
        use KeyContext::{Normal, Prompt};
        let none = KeyModifiers::NONE;
        let shift = KeyModifiers::SHIFT;
        let ctrl = KeyModifiers::CONTROL;
        let ctrl_shift = KeyModifiers::CONTROL | KeyModifiers::SHIFT;

        let movements = [
            (KeyCode::Left, none, Movement::Left),
            (KeyCode::Right, none, Movement::Right),
            (KeyCode::Up, none, Movement::Up),
            (KeyCode::Down, none, Movement::Down),
            (KeyCode::Home, none, Movement::LineStart),
            (KeyCode::End, none, Movement::LineEnd),
            (KeyCode::PageUp, none, Movement::PageUp),
            (KeyCode::PageDown, none, Movement::PageDown),
            (KeyCode::Home, ctrl, Movement::DocumentStart),
            (KeyCode::End, ctrl, Movement::DocumentEnd),
        ];
        for (code, modifiers, movement) in movements {
            self.bind(Normal, code, modifiers, Action::Move(movement, false));
            self.bind(Normal, code, modifiers | shift, Action::Move(movement, true));
        }

        self.bind(Normal, KeyCode::Enter, none, Action::InsertNewline);
        self.bind(Normal, KeyCode::Tab, none, Action::InsertTab);
        self.bind(Normal, KeyCode::Backspace, none, Action::DeleteBackward);
        self.bind(Normal, KeyCode::Delete, none, Action::DeleteForward);

        self.bind(Normal, KeyCode::Char('z'), ctrl, Action::Undo);
        self.bind(Normal, KeyCode::Char('y'), ctrl, Action::Redo);
        self.bind(Normal, KeyCode::Char('z'), ctrl_shift, Action::Redo);
        self.bind(Normal, KeyCode::Char('Z'), ctrl_shift, Action::Redo);

        self.bind(Normal, KeyCode::Char('f'), ctrl, Action::Search);
        self.bind(Normal, KeyCode::F(3), none, Action::FindNext);
        self.bind(Normal, KeyCode::F(3), shift, Action::FindPrevious);
        self.bind(Normal, KeyCode::Char('g'), ctrl, Action::FindNext);
        self.bind(Normal, KeyCode::Char('g'), ctrl_shift, Action::FindPrevious);
        self.bind(Normal, KeyCode::Char('G'), ctrl_shift, Action::FindPrevious);

        self.bind(Normal, KeyCode::Char('s'), ctrl, Action::Save);
        self.bind(Normal, KeyCode::Char('o'), ctrl, Action::Open);
        self.bind(Normal, KeyCode::Char('q'), ctrl, Action::Quit);

        self.bind(Prompt, KeyCode::Enter, none, Action::PromptConfirm);
        self.bind(Prompt, KeyCode::Esc, none, Action::PromptCancel);
        self.bind(Prompt, KeyCode::Backspace, none, Action::PromptBackspace);
        self.bind(Prompt, KeyCode::Char('q'), ctrl, Action::Quit);
    }

    /// Resolve a key press to an action
    ///
    /// Unbound printable characters (optionally shifted) insert themselves.
    pub fn resolve(&self, code: KeyCode, modifiers: KeyModifiers, context: KeyContext) -> Action {
        tracing::trace!(
            "KeybindingResolver.resolve: code={:?}, modifiers={:?}, context={:?}",
            code,
            modifiers,
            context
        );

        if let Some(action) = self
            .bindings
            .get(&context)
            .and_then(|bindings| bindings.get(&(code, modifiers)))
        {
            return action.clone();
        }

        match code {
            KeyCode::Char(c)
                if modifiers.difference(KeyModifiers::SHIFT).is_empty() && !c.is_control() =>
            {
                Action::InsertChar(c)
            }
            _ => Action::None,
        }
    }

    /// The first key bound to `action` in `context`, formatted for display
    pub fn describe(&self, action: &Action, context: KeyContext) -> Option<String> {
        let bindings = self.bindings.get(&context)?;
        let mut keys: Vec<_> = bindings
            .iter()
            .filter(|(_, bound)| *bound == action)
            .map(|((code, modifiers), _)| format_keybinding(code, modifiers))
            .collect();
        keys.sort();
        keys.into_iter().next()
    }
}
