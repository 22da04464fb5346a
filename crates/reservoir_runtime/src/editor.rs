//! Line editor abstraction for the shell.
//!
//! The shell reads input through [`LineEditor`], so tests can drive it with a
//! scripted editor while the binary uses rustyline.

use reservoir_foundation::{Error, ErrorKind, Result};
use rustyline::completion::{Completer, FilenameCompleter, Pair};
use rustyline::error::ReadlineError;
use rustyline::hint::HistoryHinter;
use rustyline::history::DefaultHistory;
use rustyline::{Completer, Config, Context, Editor, Helper, Highlighter, Hinter, Validator};

use crate::command::COMMAND_NAMES;

/// Result of reading a line from the editor.
#[derive(Debug)]
pub enum ReadResult {
    /// A line was successfully read.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// User pressed Ctrl+D (EOF).
    Eof,
}

/// Abstraction over line editing functionality.
pub trait LineEditor {
    /// Read a line with the given prompt.
    ///
    /// # Errors
    ///
    /// Returns an error if reading from the terminal fails.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// Add a line to history.
    fn add_history(&mut self, line: &str);
}

/// Helper for rustyline that provides completion and history hints.
#[derive(Helper, Completer, Hinter, Highlighter, Validator)]
struct ShellHelper {
    #[rustyline(Completer)]
    completer: ShellCompleter,
    #[rustyline(Hinter)]
    hinter: HistoryHinter,
}

/// Completes command names in the first word and file paths after it.
struct ShellCompleter {
    file_completer: FilenameCompleter,
}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let head = &line[..pos];
        if head.contains(char::is_whitespace) {
            return self.file_completer.complete(line, pos, ctx);
        }

        let candidates = COMMAND_NAMES
            .iter()
            .filter(|name| name.starts_with(head))
            .map(|name| Pair {
                display: (*name).to_string(),
                replacement: (*name).to_string(),
            })
            .collect();

        Ok((0, candidates))
    }
}

/// Line editor implementation using rustyline.
pub struct RustylineEditor {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineEditor {
    /// Creates a new rustyline-based editor keeping `history_size` entries.
    ///
    /// # Errors
    ///
    /// Returns an error if rustyline initialization fails or the history
    /// size is rejected.
    pub fn new(history_size: usize) -> Result<Self> {
        let config = Config::builder()
            .auto_add_history(false)
            .max_history_size(history_size)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?
            .build();

        let helper = ShellHelper {
            completer: ShellCompleter {
                file_completer: FilenameCompleter::new(),
            },
            hinter: HistoryHinter::new(),
        };

        let mut editor = Editor::with_config(config)
            .map_err(|e| Error::new(ErrorKind::Internal(e.to_string())))?;
        editor.set_helper(Some(helper));

        Ok(Self { editor })
    }
}

impl LineEditor for RustylineEditor {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadResult::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(e) => Err(Error::new(ErrorKind::Internal(e.to_string()))),
        }
    }

    fn add_history(&mut self, line: &str) {
        let _ = self.editor.add_history_entry(line);
    }
}
