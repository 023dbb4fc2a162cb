use crate::command::{self, Command, ParsedLine};
use crate::node::Node;
use crate::render::render_tree;
use crate::tree;
use anyhow::Context;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

/// Status line for blank lines and unknown actions.
pub const INVALID_LINE: &str = "Invalid action or empty line";

/// Owns one tree and applies text commands to it.
///
/// Every processed line produces status output on the writer it is given;
/// failures of individual commands are reported there and never stop the
/// session.
///
/// Example
/// ```
/// use dirtree::Dispatcher;
/// let mut tree = Dispatcher::new();
/// let mut out = Vec::new();
/// tree.execute_line("CREATE fruits/apples", &mut out).unwrap();
/// tree.execute_line("LIST", &mut out).unwrap();
/// assert_eq!(
///     String::from_utf8(out).unwrap(),
///     "CREATE fruits/apples\nLIST\nfruits\n  apples\n"
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Dispatcher {
    root: Node,
}

impl Dispatcher {
    /// Start with an empty tree.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Parse and apply one line, writing its status to `out`.
    pub fn execute_line(&mut self, line: &str, out: &mut dyn Write) -> io::Result<()> {
        match command::parse_line(line) {
            ParsedLine::Recognized(command) => self.execute(command, out),
            ParsedLine::Malformed(action) => {
                debug!(%action, line, "missing operand, skipping");
                Ok(())
            }
            ParsedLine::Invalid => writeln!(out, "{INVALID_LINE}"),
        }
    }

    /// Apply an already parsed command.
    pub fn execute(&mut self, command: Command<'_>, out: &mut dyn Write) -> io::Result<()> {
        debug!(?command, "dispatching");
        match command {
            Command::Create { path } => {
                tree::create_path(&mut self.root, path);
                writeln!(out, "CREATE {path}")
            }
            Command::List => {
                writeln!(out, "LIST")?;
                for line in render_tree(&self.root, "") {
                    writeln!(out, "{line}")?;
                }
                Ok(())
            }
            Command::Delete { path } => {
                writeln!(out, "DELETE {path}")?;
                if let Err(err) = tree::delete_path(&mut self.root, path) {
                    debug!(path, %err, "delete failed");
                    // Always blames the first segment, whichever one was missing.
                    let first = path.split('/').next().unwrap_or(path);
                    writeln!(out, "Cannot delete {path} - {first} does not exist")?;
                }
                Ok(())
            }
            Command::Move { source, destination } => {
                match tree::move_directory(&mut self.root, source, destination) {
                    Ok(()) => writeln!(out, "MOVE {source} {destination}"),
                    Err(_) => writeln!(out, "Cannot move: {source} to {destination}"),
                }
            }
        }
    }

    /// Replay every line of `input` until it is exhausted.
    ///
    /// Bytes that are not valid UTF-8 are replaced rather than rejected. A
    /// read failure ends the session with an error; whatever was written
    /// before it stays written.
    pub fn run<R: BufRead>(&mut self, mut input: R, out: &mut dyn Write) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        for number in 1.. {
            buf.clear();
            let read = input
                .read_until(b'\n', &mut buf)
                .with_context(|| format!("error reading line {number}"))?;
            if read == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            self.execute_line(line.trim_end_matches(['\n', '\r']), out)
                .context("error writing command output")?;
        }
        out.flush().context("error writing command output")?;
        info!("input exhausted");
        Ok(())
    }

    /// Interactive prompt on the terminal, with line history.
    pub fn repl(&mut self) -> anyhow::Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = io::stdout();

        loop {
            match rl.readline("dirtree> ") {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    self.execute_line(&line, &mut stdout)?;
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err).context("error reading from terminal"),
            }
        }

        Ok(())
    }
}
