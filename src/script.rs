//! Line-oriented edit scripts.
//!
//! One command per line; blank lines and `#` comments are ignored:
//!
//! ```text
//! set A1 3
//! set A3 =A1+A2
//! style A3 bold true
//! clear A2
//! get A3
//! undo
//! redo
//! export 10 4
//! ```
//!
//! The whole script is parsed before anything runs, so a malformed line
//! leaves the document untouched.

use std::io::Write;

use tabula_core::{CoreError, Document};
use tabula_engine::engine::{CellRef, StyleChange};

use crate::error::{Result, TabulaError};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Set { cell: CellRef, raw: String },
    Clear(CellRef),
    Style { cell: CellRef, change: StyleChange },
    Get(CellRef),
    Undo,
    Redo,
    /// Explicit `(rows, cols)`, or None for the configured/populated extent.
    Export(Option<(usize, usize)>),
}

fn parse_error(line: usize, message: impl Into<String>) -> TabulaError {
    TabulaError::Parse {
        line,
        message: message.into(),
    }
}

fn parse_cell(line: usize, label: &str) -> Result<CellRef> {
    label.parse().map_err(|e| TabulaError::Core {
        line,
        source: CoreError::Address(e),
    })
}

fn parse_count(line: usize, text: &str) -> Result<usize> {
    text.parse()
        .map_err(|_| parse_error(line, format!("expected a count, got {:?}", text)))
}

/// Parse one line. `line` is 1-based and only used for error reporting.
pub fn parse_line(text: &str, line: usize) -> Result<Option<Command>> {
    let trimmed = text.trim_start();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }
    let (keyword, rest) = trimmed
        .split_once(char::is_whitespace)
        .map(|(k, r)| (k, r.trim_start()))
        .unwrap_or((trimmed.trim_end(), ""));

    let command = match keyword {
        "set" => {
            let (label, raw) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            if label.is_empty() {
                return Err(parse_error(line, "set requires an address"));
            }
            Command::Set {
                cell: parse_cell(line, label)?,
                raw: raw.trim_start().to_string(),
            }
        }
        "clear" => Command::Clear(parse_cell(line, rest.trim())?),
        "get" => Command::Get(parse_cell(line, rest.trim())?),
        "style" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            let [label, key, value] = args[..] else {
                return Err(parse_error(line, "usage: style <ADDR> <key> <value>"));
            };
            let cell = parse_cell(line, label)?;
            let change = StyleChange::parse(key, value).ok_or_else(|| TabulaError::Core {
                line,
                source: CoreError::InvalidStyle {
                    key: key.to_string(),
                    value: value.to_string(),
                },
            })?;
            Command::Style { cell, change }
        }
        "undo" if rest.trim().is_empty() => Command::Undo,
        "redo" if rest.trim().is_empty() => Command::Redo,
        "export" => {
            let args: Vec<&str> = rest.split_whitespace().collect();
            match args[..] {
                [] => Command::Export(None),
                [rows, cols] => {
                    Command::Export(Some((parse_count(line, rows)?, parse_count(line, cols)?)))
                }
                _ => return Err(parse_error(line, "usage: export [<rows> <cols>]")),
            }
        }
        other => return Err(parse_error(line, format!("unknown command {:?}", other))),
    };
    Ok(Some(command))
}

pub fn parse_script(text: &str) -> Result<Vec<Command>> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if let Some(command) = parse_line(line, idx + 1)? {
            commands.push(command);
        }
    }
    Ok(commands)
}

/// Apply a command. `get` and `export` write one line to `out`.
pub fn execute<W: Write>(
    doc: &mut Document,
    command: Command,
    export_dims: Option<(usize, usize)>,
    out: &mut W,
) -> Result<()> {
    match command {
        Command::Set { cell, raw } => {
            doc.commit(cell, &raw);
        }
        Command::Clear(cell) => {
            doc.clear(&cell);
        }
        Command::Style { cell, change } => {
            doc.apply_style(cell, change);
        }
        Command::Get(cell) => writeln!(out, "{}", doc.get_display(&cell))?,
        Command::Undo => {
            if !doc.undo() {
                tracing::info!("nothing to undo");
            }
        }
        Command::Redo => {
            if !doc.redo() {
                tracing::info!("nothing to redo");
            }
        }
        Command::Export(dims) => {
            let records = doc.export_records(dims.or(export_dims));
            writeln!(out, "{}", serde_json::to_string(&records)?)?;
        }
    }
    Ok(())
}

/// Parse and run a whole script against `doc`.
pub fn run_script<W: Write>(
    doc: &mut Document,
    text: &str,
    export_dims: Option<(usize, usize)>,
    out: &mut W,
) -> Result<()> {
    let commands = parse_script(text)?;
    tracing::debug!(commands = commands.len(), "running script");
    for command in commands {
        execute(doc, command, export_dims, out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tabula_engine::engine::Align;

    fn run(text: &str) -> (Document, String) {
        let mut doc = Document::new();
        let mut out = Vec::new();
        run_script(&mut doc, text, None, &mut out).unwrap();
        (doc, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_line("set A3 =A1 + A2", 1).unwrap(),
            Some(Command::Set {
                cell: CellRef::new(2, 0),
                raw: "=A1 + A2".to_string()
            })
        );
        assert_eq!(
            parse_line("set B1", 1).unwrap(),
            Some(Command::Set {
                cell: CellRef::new(0, 1),
                raw: String::new()
            })
        );
        assert_eq!(
            parse_line("style C2 align center", 1).unwrap(),
            Some(Command::Style {
                cell: CellRef::new(1, 2),
                change: StyleChange::Align(Align::Center)
            })
        );
        assert_eq!(parse_line("  # note", 1).unwrap(), None);
        assert_eq!(parse_line("export 3 2", 1).unwrap(), Some(Command::Export(Some((3, 2)))));
        assert_eq!(parse_line("undo", 1).unwrap(), Some(Command::Undo));
    }

    #[test]
    fn test_parse_errors_carry_line() {
        let err = parse_script("set A1 1\nfrobnicate\n").unwrap_err();
        assert!(matches!(err, TabulaError::Parse { line: 2, .. }));

        let err = parse_script("\n\nset a1 1").unwrap_err();
        assert!(matches!(err, TabulaError::Core { line: 3, .. }));

        let err = parse_script("style A1 bold maybe").unwrap_err();
        assert!(matches!(
            err,
            TabulaError::Core {
                line: 1,
                source: CoreError::InvalidStyle { .. }
            }
        ));

        assert!(parse_script("export 3").is_err());
        assert!(parse_script("undo now").is_err());
    }

    #[test]
    fn test_malformed_script_runs_nothing() {
        let mut doc = Document::new();
        let mut out = Vec::new();
        assert!(run_script(&mut doc, "set A1 1\nbogus", None, &mut out).is_err());
        assert!(doc.is_empty());
    }

    #[test]
    fn test_run_formula_and_stale_read() {
        let (_, out) = run("set A1 3\nset A2 4\nset A3 =A1+A2\nget A3\nset A1 10\nget A3\n");
        assert_eq!(out, "7\n7\n");
    }

    #[test]
    fn test_run_undo_redo() {
        let (doc, out) = run("set A1 a\nset A1 b\nundo\nget A1\nredo\nget A1\nundo\nset A1 c\nredo\nget A1");
        assert_eq!(out, "a\nb\nc\n");
        assert!(!doc.can_redo());
    }

    #[test]
    fn test_run_export() {
        let (_, out) = run("set A1 Name\nset B1 Score\nset A2 Ann\nset B2 10\nexport 3 2\n");
        assert_eq!(out, "[{\"Name\":\"Ann\",\"Score\":\"10\"}]\n");
    }
}
