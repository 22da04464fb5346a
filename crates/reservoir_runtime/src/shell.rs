//! The command shell.
//!
//! [`Session`] owns the collection and executes parsed commands, returning
//! their output as text. [`Shell`] wraps a session with a line editor for
//! interactive use and with line-by-line execution for scripts.

use std::fmt::Write as _;
use std::fs;
use std::io::{self, Write};
use std::path::Path;

use reservoir_foundation::{Error, ErrorContext, Result};
use reservoir_storage::{
    ReservoirCollection, export_binary_file, export_text_file, import_binary_file,
};
use tracing::warn;

use crate::command::Command;
use crate::config::ShellConfig;
use crate::display::render_collection;
use crate::editor::{LineEditor, ReadResult, RustylineEditor};
use crate::snapshot;

/// One step of the built-in walkthrough: an optional heading printed first,
/// then a script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DemoStep {
    /// Printed on its own line before the script runs.
    pub heading: Option<&'static str>,
    /// Commands to run, one per line.
    pub script: &'static str,
}

/// The classic walkthrough: three records, a listing, both dumps, a removal,
/// and a second listing.
pub const DEMO_STEPS: &[DemoStep] = &[
    DemoStep {
        heading: None,
        script: r#"add "Lake Superior" 80 160 10 lake
add "Pacific" 200 400 30 ocean
add "Black Sea" 100 200 20 sea"#,
    },
    DemoStep {
        heading: Some("All reservoirs:"),
        script: "list",
    },
    DemoStep {
        heading: None,
        script: "save-text reservoirs.txt\nsave-bin reservoirs.bin\nremove 1",
    },
    DemoStep {
        heading: Some("Reservoirs after removal:"),
        script: "list",
    },
];

const HELP: &str = "\
add NAME WIDTH LENGTH DEPTH TYPE   append a reservoir (quote names with spaces)
remove INDEX                       remove a reservoir; out-of-range indices are ignored
list                               show every reservoir
count                              show size and capacity
compare I J                        compare two reservoirs by type and surface area
save-text PATH                     write a text dump
save-bin PATH                      write a binary dump
load-bin PATH                      replace the collection with a binary dump
save PATH                          write a snapshot
load PATH                          replace the collection with a snapshot
help                               show this summary
quit                               leave the shell";

/// What the shell should do after a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Print the text (possibly empty) and keep going.
    Output(String),
    /// Leave the shell.
    Quit,
}

/// The collection and settings a shell operates on.
#[derive(Debug, Default)]
pub struct Session {
    collection: ReservoirCollection,
    config: ShellConfig,
}

impl Session {
    /// Creates a session with an empty collection.
    #[must_use]
    pub fn new(config: ShellConfig) -> Self {
        Self {
            collection: ReservoirCollection::new(),
            config,
        }
    }

    /// Returns the collection.
    #[must_use]
    pub const fn collection(&self) -> &ReservoirCollection {
        &self.collection
    }

    /// Returns the configuration.
    #[must_use]
    pub const fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Parses and executes one line.
    ///
    /// # Errors
    ///
    /// Returns an error if the line does not parse or the command fails.
    /// A failed command leaves the collection unchanged.
    pub fn execute_line(&mut self, line: &str) -> Result<Outcome> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Outcome::Output(String::new())),
        }
    }

    /// Executes a parsed command.
    ///
    /// # Errors
    ///
    /// Returns an error if an index is invalid for `compare`, or if a file
    /// operation fails.
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        let output = match command {
            Command::Add(record) => {
                let line = format!("added #{}: {record}", self.collection.len());
                self.collection.append(record);
                line
            }
            Command::Remove(index) => {
                if self.collection.remove_at(index) {
                    format!("removed #{index}")
                } else {
                    warn!(index, len = self.collection.len(), "ignored out-of-range removal");
                    format!(
                        "index {index} out of range ({} reservoirs); nothing removed",
                        self.collection.len()
                    )
                }
            }
            Command::List => {
                if self.collection.is_empty() {
                    "no reservoirs".to_string()
                } else {
                    render_collection(&self.collection)
                }
            }
            Command::Count => format!(
                "{} reservoirs (capacity {})",
                self.collection.len(),
                self.collection.capacity()
            ),
            Command::Compare(a, b) => self.compare(a, b)?,
            Command::SaveText(path) => {
                export_text_file(&self.collection, &path)?;
                format!("wrote text dump to {}", path.display())
            }
            Command::SaveBinary(path) => {
                let bytes = export_binary_file(&self.collection, &path, self.config.layout)?;
                format!("wrote {bytes} bytes to {}", path.display())
            }
            Command::LoadBinary(path) => {
                self.collection = import_binary_file(&path, self.config.layout)?;
                format!(
                    "loaded {} reservoirs from {}",
                    self.collection.len(),
                    path.display()
                )
            }
            Command::Save(path) => {
                snapshot::save_to_file(&self.collection, &path)?;
                format!("saved snapshot to {}", path.display())
            }
            Command::Load(path) => {
                self.collection = snapshot::load_from_file(&path)?;
                format!(
                    "loaded {} reservoirs from {}",
                    self.collection.len(),
                    path.display()
                )
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Outcome::Quit),
        };
        Ok(Outcome::Output(output))
    }

    fn compare(&self, a: usize, b: usize) -> Result<String> {
        let len = self.collection.len();
        let first = self
            .collection
            .get(a)
            .ok_or_else(|| Error::index_out_of_bounds(a, len))?;
        let second = self
            .collection
            .get(b)
            .ok_or_else(|| Error::index_out_of_bounds(b, len))?;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "same type: {}",
            yes_no(first.same_type(second))
        );
        let _ = write!(
            out,
            "#{a} has larger surface area than #{b}: {}",
            yes_no(first.has_larger_surface_area(second))
        );
        Ok(out)
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

/// The command shell.
pub struct Shell<E: LineEditor = RustylineEditor> {
    /// The line editor for input.
    editor: E,

    /// Session state.
    session: Session,
}

impl Shell<RustylineEditor> {
    /// Creates a shell with the default rustyline editor.
    ///
    /// # Errors
    ///
    /// Returns an error if the editor fails to initialize.
    pub fn new(config: ShellConfig) -> Result<Self> {
        let editor = RustylineEditor::new(config.history_size)?;
        Ok(Self::with_editor(editor, config))
    }
}

impl<E: LineEditor> Shell<E> {
    /// Creates a shell with the given editor.
    pub fn with_editor(editor: E, config: ShellConfig) -> Self {
        Self {
            editor,
            session: Session::new(config),
        }
    }

    /// Returns a reference to the session.
    #[must_use]
    pub const fn session(&self) -> &Session {
        &self.session
    }

    /// Returns a mutable reference to the session.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Runs the interactive loop until EOF or `quit`.
    ///
    /// Command errors are printed and the loop continues.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input fails.
    pub fn run(&mut self) -> Result<()> {
        if self.session.config().show_banner {
            print_banner();
        }

        loop {
            let prompt = self.session.config().prompt.clone();
            let line = match self.editor.read_line(&prompt)? {
                ReadResult::Line(line) => line,
                ReadResult::Interrupted => continue,
                ReadResult::Eof => break,
            };
            if line.trim().is_empty() {
                continue;
            }
            self.editor.add_history(&line);

            match self.session.execute_line(&line) {
                Ok(Outcome::Output(text)) => print_output(&text),
                Ok(Outcome::Quit) => break,
                Err(e) => print_error(&e),
            }
        }

        println!("\nGoodbye!");
        Ok(())
    }

    /// Executes a script line by line, printing output.
    ///
    /// Stops at `quit` or at the first failing line.
    ///
    /// # Errors
    ///
    /// Returns the first error, with `source` and the 1-based line number
    /// attached as context.
    pub fn run_script(&mut self, script: &str, source: &str) -> Result<()> {
        for (number, line) in script.lines().enumerate() {
            match self.session.execute_line(line) {
                Ok(Outcome::Output(text)) => print_output(&text),
                Ok(Outcome::Quit) => break,
                Err(e) => {
                    return Err(e.with_context(
                        ErrorContext::new()
                            .with_source(source)
                            .with_line(number + 1),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Runs [`DEMO_STEPS`], printing each heading above its output.
    ///
    /// # Errors
    ///
    /// Returns the first failing command's error, with `demo` as its source.
    pub fn run_demo(&mut self) -> Result<()> {
        for step in DEMO_STEPS {
            if let Some(heading) = step.heading {
                println!("{heading}");
            }
            self.run_script(step.script, "demo")?;
        }
        Ok(())
    }

    /// Reads and executes a script file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or a line fails.
    pub fn run_file(&mut self, path: &Path) -> Result<()> {
        let script = fs::read_to_string(path).map_err(|e| {
            Error::io(format!("failed to read file '{}': {e}", path.display()))
        })?;
        self.run_script(&script, &path.display().to_string())
    }
}

fn print_output(text: &str) {
    if text.is_empty() {
        return;
    }
    if text.ends_with('\n') {
        print!("{text}");
    } else {
        println!("{text}");
    }
}

/// Prints an error to stderr.
pub fn print_error(error: &Error) {
    match &error.context {
        Some(context) => eprintln!("\x1b[31mError: {error} ({context})\x1b[0m"),
        None => eprintln!("\x1b[31mError: {error}\x1b[0m"),
    }
}

fn print_banner() {
    println!("\x1b[1;36mReservoir registry v{}\x1b[0m", env!("CARGO_PKG_VERSION"));
    println!("Type 'help' for commands. Use Ctrl+D to exit.\n");
    let _ = io::stdout().flush();
}
