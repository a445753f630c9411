//! Interactive yes/no/all/quit confirmation.
//!
//! `All` and `Quit` are sticky: once either is given it is cached and every
//! later call returns it without prompting again. The state is a plain value
//! threaded through the selection loop by the caller.

use crate::error::{PipReviewError, Result};
use colored::Colorize;
use std::fmt;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
    All,
    Quit,
}

impl Answer {
    fn parse(input: &str) -> Option<Self> {
        match input {
            "y" => Some(Answer::Yes),
            "n" => Some(Answer::No),
            "a" => Some(Answer::All),
            "q" => Some(Answer::Quit),
            _ => None,
        }
    }
}

impl fmt::Display for Answer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self {
            Answer::Yes => "y",
            Answer::No => "n",
            Answer::All => "a",
            Answer::Quit => "q",
        };
        f.write_str(letter)
    }
}

/// Prompt state for one review run.
#[derive(Debug, Default)]
pub struct AskerState {
    /// Set exactly once, the first time the user answers All or Quit.
    cached: Option<Answer>,
    /// Most recent answer, used as the default for an empty input.
    last: Option<Answer>,
}

/// Ask one yes/no/all/quit question.
///
/// Re-prompts until a valid answer is read. An empty input repeats the last
/// answer if there is one. EOF on the input means the user is gone, which is
/// treated as an interrupt.
pub fn ask(
    state: &mut AskerState,
    prompt: &str,
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<Answer> {
    if let Some(cached) = state.cached {
        return Ok(cached);
    }

    loop {
        match state.last {
            Some(last) => write!(
                output,
                "{} ({}) ",
                format!("{} [Y]es, [N]o, [A]ll, [Q]uit", prompt).bold(),
                last
            )?,
            None => write!(
                output,
                "{} ",
                format!("{} [Y]es, [N]o, [A]ll, [Q]uit", prompt).bold()
            )?,
        }
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Err(PipReviewError::Interrupted);
        }

        let trimmed = line.trim().to_lowercase();
        let answer = if trimmed.is_empty() {
            state.last
        } else {
            Answer::parse(&trimmed)
        };

        if let Some(answer) = answer {
            if matches!(answer, Answer::All | Answer::Quit) {
                state.cached = Some(answer);
            }
            state.last = Some(answer);
            return Ok(answer);
        }
    }
}
