//! Prompt/minibuffer for user input

/// Type of prompt - determines what happens to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptType {
    /// Incremental search; every keystroke updates the query
    Search,
    /// Open a file by path
    OpenFile,
}

/// Prompt state for the minibuffer
#[derive(Debug, Clone)]
pub struct Prompt {
    /// The prompt message (e.g., "Search: ")
    pub message: String,
    /// User's current input
    pub input: String,
    pub prompt_type: PromptType,
}

impl Prompt {
    pub fn new(message: impl Into<String>, prompt_type: PromptType) -> Self {
        Self {
            message: message.into(),
            input: String::new(),
            prompt_type,
        }
    }

    /// Create a new prompt with initial text
    pub fn with_initial_text(
        message: impl Into<String>,
        prompt_type: PromptType,
        initial_text: impl Into<String>,
    ) -> Self {
        Self {
            input: initial_text.into(),
            ..Self::new(message, prompt_type)
        }
    }

    /// Append a character to the input
    pub fn insert_char(&mut self, ch: char) {
        self.input.push(ch);
    }

    /// Delete the last character; returns false when the input was empty
    pub fn backspace(&mut self) -> bool {
        self.input.pop().is_some()
    }

    pub fn get_text(&self) -> &str {
        &self.input
    }

    pub fn clear(&mut self) {
        self.input.clear();
    }

    /// Message followed by input, as shown on the prompt line
    pub fn display_text(&self) -> String {
        format!("{}{}", self.message, self.input)
    }
}
