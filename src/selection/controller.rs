// Interactive selection loops
use crate::selection::model::{SelectionSet, Stage, UI_LINE};
use console::Term;
use std::io::{self, BufRead, Write};

const TITLE: &str = "Remote File Sender";

/// How a single stage loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepResult {
    Next,
    Back,
    Quit,
}

/// What the operator decided once both stages are done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Transfer,
    Quit,
}

pub struct SelectionController<R, W> {
    input: R,
    output: W,
    clear_screen: bool,
}

impl<R: BufRead, W: Write> SelectionController<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            clear_screen: false,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    /// Host selection, then file selection; `prev` from the file stage goes
    /// back to host selection with the current flags kept.
    pub fn run(&mut self, set: &mut SelectionSet) -> io::Result<Decision> {
        loop {
            if self.select(set, Stage::Hosts)? == StepResult::Quit {
                return Ok(Decision::Quit);
            }

            match self.select(set, Stage::Files)? {
                StepResult::Next => return Ok(Decision::Transfer),
                StepResult::Quit => return Ok(Decision::Quit),
                StepResult::Back => log::debug!("returning to host selection"),
            }
        }
    }

    pub fn select(&mut self, set: &mut SelectionSet, stage: Stage) -> io::Result<StepResult> {
        self.draw(set, stage)?;

        let mut line = String::new();
        loop {
            line.clear();
            // End of input ends the stage like `next`.
            if self.input.read_line(&mut line)? == 0 {
                return Ok(StepResult::Next);
            }

            if let Some(step) = parse_command(line.trim(), stage) {
                self.clear()?;
                return Ok(step);
            }

            for index in parse_indices(&line, set.len(stage)) {
                set.toggle(stage, index);
            }

            self.clear()?;
            self.draw(set, stage)?;
        }
    }

    fn draw(&mut self, set: &SelectionSet, stage: Stage) -> io::Result<()> {
        write!(self.output, "{}{} > ", banner(), set.render(stage))?;
        self.output.flush()
    }

    fn clear(&mut self) -> io::Result<()> {
        if self.clear_screen {
            Term::stdout().clear_screen()?;
        }
        Ok(())
    }
}

pub fn banner() -> String {
    format!(
        "\n{}{:^width$}\n{}",
        UI_LINE,
        TITLE,
        UI_LINE,
        width = UI_LINE.len()
    )
}

fn parse_command(line: &str, stage: Stage) -> Option<StepResult> {
    match line {
        "quit" | "q" | "exit" => Some(StepResult::Quit),
        "next" | "n" => Some(StepResult::Next),
        "prev" | "pre" | "p" if stage == Stage::Files => Some(StepResult::Back),
        _ => None,
    }
}

/// Converts 1-based tokens to 0-based indices. Tokens that are not integers
/// or fall outside `1..=len` are dropped without complaint; repeats are kept.
pub fn parse_indices(line: &str, len: usize) -> Vec<usize> {
    line.split_whitespace()
        .filter_map(|token| token.parse::<i64>().ok())
        .filter(|&n| n >= 1 && (n as u64) <= len as u64)
        .map(|n| (n - 1) as usize)
        .collect()
}
