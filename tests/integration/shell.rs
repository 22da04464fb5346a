//! Command shell sessions
//!
//! Drives the shell through scripts and checks the resulting collection and files.

use std::fs;
use std::path::PathBuf;

use reservoir_foundation::ErrorKind;
use reservoir_runtime::{Outcome, Session, Shell, ShellConfig};
use reservoir_runtime::{LineEditor, ReadResult};
use reservoir_storage::{BinaryLayout, import_binary_file};

/// Editor that replays a fixed list of lines, then reports EOF.
struct ScriptedEditor {
    lines: std::vec::IntoIter<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .into_iter(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> reservoir_foundation::Result<ReadResult> {
        Ok(self.lines.next().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, _line: &str) {}
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("reservoir_shell_it_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

fn quiet() -> ShellConfig {
    ShellConfig::default().with_banner(false)
}

#[test]
fn interactive_session_until_eof() {
    let editor = ScriptedEditor::new(&[
        r#"add "Lake Superior" 80 160 10 lake"#,
        "add Pacific 200 400 30 ocean",
        "",
        "remove 9",
        "bogus",
        "remove 0",
    ]);
    let mut shell = Shell::with_editor(editor, quiet());
    shell.run().unwrap();

    let collection = shell.session().collection();
    assert_eq!(collection.len(), 1);
    assert_eq!(collection.get(0).unwrap().name(), "Pacific");
}

#[test]
fn quit_stops_the_loop() {
    let editor = ScriptedEditor::new(&["add A 1 1 1 lake", "quit", "add B 1 1 1 lake"]);
    let mut shell = Shell::with_editor(editor, quiet());
    shell.run().unwrap();
    assert_eq!(shell.session().collection().len(), 1);
}

#[test]
fn script_exports_binary_dump() {
    let path = scratch("script.bin");
    let script = format!(
        "add A 1 2 3 lake\nadd B 4 5 6 sea\nadd C 7 8 9 ocean\nremove 1\nsave-bin \"{}\"\n",
        path.display()
    );

    let editor = ScriptedEditor::new(&[]);
    let mut shell = Shell::with_editor(editor, ShellConfig::portable().with_banner(false));
    shell.run_script(&script, "test").unwrap();

    let loaded = import_binary_file(&path, BinaryLayout::portable()).unwrap();
    let names: Vec<_> = loaded.iter().map(|r| r.name().to_string()).collect();
    assert_eq!(names, ["A", "C"]);
    fs::remove_file(&path).unwrap();
}

#[test]
fn script_error_carries_line() {
    let mut shell = Shell::with_editor(ScriptedEditor::new(&[]), quiet());
    let err = shell
        .run_script("add A 1 1 1 lake\n# comment\nadd B one 1 1 lake\n", "setup.cmd")
        .unwrap_err();

    assert!(matches!(err.kind, ErrorKind::InvalidCommand(_)));
    let context = err.context.unwrap();
    assert_eq!(context.source.as_deref(), Some("setup.cmd"));
    assert_eq!(context.line, Some(3));
    assert_eq!(shell.session().collection().len(), 1);
}

#[test]
fn snapshot_commands_restore_collection() {
    let path = scratch("session.msgpack");
    let mut session = Session::new(quiet());
    session.execute_line("add A 1 1 1 lake").unwrap();
    session.execute_line("add B 2 2 2 lake").unwrap();
    session
        .execute_line(&format!("save \"{}\"", path.display()))
        .unwrap();

    let mut restored = Session::new(quiet());
    restored
        .execute_line(&format!("load \"{}\"", path.display()))
        .unwrap();
    assert_eq!(
        restored.collection().as_slice(),
        session.collection().as_slice()
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn compare_reports_yes_no() {
    let mut session = Session::new(quiet());
    session.execute_line("add Big 10 10 1 lake").unwrap();
    session.execute_line("add Small 1 1 1 lake").unwrap();

    let Outcome::Output(text) = session.execute_line("compare 0 1").unwrap() else {
        panic!("expected output");
    };
    assert_eq!(text, "same type: yes\n#0 has larger surface area than #1: yes");

    let err = session.execute_line("compare 0 5").unwrap_err();
    assert!(matches!(err.kind, ErrorKind::IndexOutOfBounds { index: 5, length: 2 }));
}
