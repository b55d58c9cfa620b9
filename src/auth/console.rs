//! Console input/output used by the interactive prompts
//!
//! The authorization handshake and the yes/no question read from a [`Console`]
//! so they can be driven by scripted input in tests.

use dialoguer::Input;

use crate::error::Result;

/// Line-oriented interactive console
pub trait Console {
    /// Show `message` and block until the user submits a line.
    fn prompt(&mut self, message: &str) -> Result<String>;

    /// Print an informational line.
    fn show(&mut self, message: &str);
}

/// Real terminal backed by dialoguer
#[derive(Debug, Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn prompt(&mut self, message: &str) -> Result<String> {
        let line: String = Input::new()
            .with_prompt(message)
            .allow_empty(true)
            .interact_text()?;
        Ok(line)
    }

    fn show(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Interpret a yes/no answer.
///
/// Case-insensitive, ignores surrounding whitespace and quotes. Empty input
/// means yes. Returns `None` for anything unrecognised.
pub fn parse_answer(input: &str) -> Option<bool> {
    let answer = input
        .trim()
        .trim_matches(|c| c == '\'' || c == '"')
        .trim()
        .to_ascii_lowercase();

    match answer.as_str() {
        "" | "y" | "yes" => Some(true),
        "n" | "no" => Some(false),
        _ => None,
    }
}

/// Ask a yes/no question until a recognised answer is given.
pub fn confirm<C: Console + ?Sized>(console: &mut C, question: &str) -> Result<bool> {
    loop {
        let line = console.prompt(question)?;
        match parse_answer(&line) {
            Some(answer) => return Ok(answer),
            None => console.show("Please answer 'yes' or 'no' (default: yes)."),
        }
    }
}

/// Console fed from a fixed list of lines, recording everything shown.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    inputs: std::collections::VecDeque<String>,
    /// Prompts in the order they were asked
    pub prompts: Vec<String>,
    /// Lines passed to `show`
    pub output: Vec<String>,
}

#[cfg(test)]
impl ScriptedConsole {
    pub fn new<I, S>(inputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }

    /// Whether every scripted line has been consumed
    pub fn exhausted(&self) -> bool {
        self.inputs.is_empty()
    }

    /// All shown output joined by newlines
    pub fn transcript(&self) -> String {
        self.output.join("\n")
    }
}

#[cfg(test)]
impl Console for ScriptedConsole {
    fn prompt(&mut self, message: &str) -> Result<String> {
        self.prompts.push(message.to_string());
        self.inputs.pop_front().ok_or_else(|| {
            std::io::Error::new(std::io::ErrorKind::UnexpectedEof, "no more scripted input")
                .into()
        })
    }

    fn show(&mut self, message: &str) {
        self.output.push(message.to_string());
    }
}
