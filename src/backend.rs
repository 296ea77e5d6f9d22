//! Invokes a Graphviz layout program on DOT text.

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_ENGINE: &str = "dot";

/// Arguments for `engine`: output format first, then the optional output file.
pub fn command_args(format: &str, output: Option<&Path>) -> Vec<String> {
    let mut args = vec![format!("-T{format}")];
    if let Some(path) = output {
        args.push("-o".to_string());
        args.push(path.display().to_string());
    }
    args
}

fn run(dot: &str, engine: &str, args: &[String]) -> Result<Vec<u8>> {
    debug!(engine, ?args, "invoking layout program");
    let mut child = Command::new(engine)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::BackendNotFound {
                program: engine.to_string(),
            },
            _ => Error::Io(e),
        })?;

    // Stdin is fed from its own thread while stdout drains.
    let writer = child.stdin.take().map(|mut stdin| {
        let source = dot.to_string();
        std::thread::spawn(move || stdin.write_all(source.as_bytes()))
    });

    let output = child.wait_with_output()?;
    let written = match writer.map(|handle| handle.join()) {
        Some(Ok(result)) => result,
        Some(Err(_)) => {
            return Err(Error::Backend {
                message: "stdin writer panicked".to_string(),
            });
        }
        None => Ok(()),
    };

    if !output.status.success() {
        return Err(Error::Backend {
            message: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    written?;
    Ok(output.stdout)
}

/// Lays out `dot` with `engine` and returns the rendered bytes in `format`.
pub fn render(dot: &str, format: &str, engine: &str) -> Result<Vec<u8>> {
    run(dot, engine, &command_args(format, None))
}

pub fn render_to_file(dot: &str, path: &Path, format: &str, engine: &str) -> Result<()> {
    run(dot, engine, &command_args(format, Some(path)))?;
    Ok(())
}
