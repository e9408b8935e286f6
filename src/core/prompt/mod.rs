mod types;

pub use types::*;

use std::collections::BTreeSet;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};

use crate::error::{Error, Result};
use crate::scaffold::Prompter;

/// Line-oriented interactive prompt engine.
///
/// Questions go to the output stream (stderr by default) so stdout stays
/// free for the JSON result. End of input cancels the prompt.
pub struct PromptEngine {
    interactive: bool,
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl PromptEngine {
    /// Create engine with automatic TTY detection on stdin/stderr.
    pub fn new() -> Self {
        Self::with_interactive(io::stdin().is_terminal() && io::stderr().is_terminal())
    }

    /// Create engine with explicit interactive mode over stdin/stderr.
    pub fn with_interactive(interactive: bool) -> Self {
        Self {
            interactive,
            input: Box::new(BufReader::new(io::stdin())),
            output: Box::new(io::stderr()),
        }
    }

    /// Force non-interactive mode (`--no-input`): every prompt takes its default.
    pub fn non_interactive() -> Self {
        Self::with_interactive(false)
    }

    /// Interactive engine over arbitrary streams.
    pub fn with_io(input: impl BufRead + 'static, output: impl Write + 'static) -> Self {
        Self {
            interactive: true,
            input: Box::new(input),
            output: Box::new(output),
        }
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Display a message (only in interactive mode).
    pub fn message(&mut self, msg: &str) {
        if self.interactive {
            writeln!(self.output, "{}", msg).ok();
        }
    }

    /// Run a select prompt. `None` means cancelled, or no default when
    /// non-interactive.
    ///
    /// Accepts the option number or its exact value; anything else asks again.
    pub fn select(&mut self, prompt: &SelectPrompt) -> Result<Option<String>> {
        let default = prompt
            .default_index
            .and_then(|i| prompt.options.get(i))
            .map(|o| o.value.clone());

        if !self.interactive {
            return Ok(default);
        }

        writeln!(self.output, "{}", prompt.question).ok();
        for (i, opt) in prompt.options.iter().enumerate() {
            let marker = if Some(i) == prompt.default_index {
                "*"
            } else {
                " "
            };
            writeln!(self.output, "  {}[{}] {}", marker, i + 1, opt.label).ok();
        }

        loop {
            write!(self.output, "Enter choice (1-{}): ", prompt.options.len()).ok();
            self.output.flush().ok();

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };

            if line.is_empty() {
                if default.is_some() {
                    return Ok(default);
                }
                continue;
            }

            let chosen = line
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| prompt.options.get(i))
                .or_else(|| prompt.options.iter().find(|o| o.value == line));

            match chosen {
                Some(opt) => return Ok(Some(opt.value.clone())),
                None => {
                    writeln!(self.output, "Invalid choice: {}", line).ok();
                }
            }
        }
    }

    /// Run a free text prompt. Leading and trailing whitespace is trimmed from
    /// the answer; an empty answer takes the default.
    pub fn text(&mut self, prompt: &TextPrompt) -> Result<Option<String>> {
        if !self.interactive {
            return Ok(Some(prompt.default.clone().unwrap_or_default()));
        }

        match &prompt.default {
            Some(default) => write!(self.output, "{} [{}]: ", prompt.question, default).ok(),
            None => write!(self.output, "{}: ", prompt.question).ok(),
        };
        self.output.flush().ok();

        let Some(line) = self.read_line()? else {
            return Ok(None);
        };

        if line.is_empty() {
            return Ok(Some(prompt.default.clone().unwrap_or_default()));
        }
        Ok(Some(line))
    }

    /// Next trimmed input line, `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| Error::internal_io(e.to_string(), Some("read prompt input".to_string())))?;

        if read == 0 {
            writeln!(self.output).ok();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl Default for PromptEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for PromptEngine {
    fn select_template(&mut self, choices: &[String]) -> Result<Option<String>> {
        let prompt = SelectPrompt {
            question: "Select a template:".to_string(),
            options: choices.iter().map(SelectOption::plain).collect(),
            default_index: (choices.len() == 1).then_some(0),
        };
        self.select(&prompt)
    }

    fn value(
        &mut self,
        variable: &str,
        tokens: &BTreeSet<String>,
        default: &str,
    ) -> Result<Option<String>> {
        let used_as: Vec<&str> = tokens.iter().map(String::as_str).collect();
        let prompt = TextPrompt {
            question: format!("Value for {} ({})", variable, used_as.join(", ")),
            default: Some(default.to_string()),
        };
        self.text(&prompt)
    }
}
