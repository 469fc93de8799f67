/*
[INPUT]:  Confirmation questions and user-facing notices
[OUTPUT]: Yes/no answers and styled messages on the terminal
[POS]:    CLI presentation layer - confirmation/alert gate before destructive actions
[UPDATE]: When changing how users confirm or are notified
*/

use anyhow::Result;
use console::style;
use dialoguer::{Confirm, theme::ColorfulTheme};

/// Confirmation and notice surface used by every command
pub trait Prompter {
    /// Blocking yes/no question; `false` aborts the action
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Success and count messages
    fn notice(&self, message: &str);

    /// Validation failures and non-durable changes
    fn warn(&self, message: &str);
}

/// Terminal prompter backed by dialoguer
pub struct ConsolePrompter {
    theme: ColorfulTheme,
    assume_yes: bool,
}

impl ConsolePrompter {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            assume_yes,
        }
    }
}

impl Prompter for ConsolePrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        if self.assume_yes {
            return Ok(true);
        }
        let confirmed = Confirm::with_theme(&self.theme)
            .with_prompt(message)
            .default(false)
            .interact()?;
        Ok(confirmed)
    }

    fn notice(&self, message: &str) {
        eprintln!("{}", style(message).green());
    }

    fn warn(&self, message: &str) {
        eprintln!("{}", style(message).yellow());
    }
}

/// Prompter with a fixed answer that records every message
#[cfg(test)]
pub struct ScriptedPrompter {
    answer: bool,
    messages: std::cell::RefCell<Vec<String>>,
}

#[cfg(test)]
impl ScriptedPrompter {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            messages: std::cell::RefCell::new(Vec::new()),
        }
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }
}

#[cfg(test)]
impl Prompter for ScriptedPrompter {
    fn confirm(&self, message: &str) -> Result<bool> {
        self.messages.borrow_mut().push(format!("confirm: {message}"));
        Ok(self.answer)
    }

    fn notice(&self, message: &str) {
        self.messages.borrow_mut().push(format!("notice: {message}"));
    }

    fn warn(&self, message: &str) {
        self.messages.borrow_mut().push(format!("warn: {message}"));
    }
}
