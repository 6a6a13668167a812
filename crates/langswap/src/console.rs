//! Line-oriented console host driving the registry.

use langswap_i18n::{LanguageEvent, LanguageRegistry};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, warn};

use crate::error::AppResult;

const HELP: &str = "\
:list           show languages and picker indices
:use <code>     select a language
:pick <index>   select by picker index (out of range clears)
:clear          clear the selection
:help           show this text
:quit           exit
<key>           resolve a key";

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List loaded languages.
    List,
    /// Select a language by code.
    Use(String),
    /// Select a language by picker index.
    Pick(usize),
    /// Clear the selection.
    Clear,
    /// Print usage.
    Help,
    /// Leave the console.
    Quit,
    /// Resolve a lookup key.
    Resolve(String),
    /// Blank input.
    Empty,
    /// A `:` command that could not be understood.
    Invalid(String),
}

impl Command {
    /// Parses one input line. Anything not starting with `:` is a key.
    pub fn parse(line: &str) -> Self {
        let Some(command) = line.strip_prefix(':') else {
            return if line.is_empty() {
                Self::Empty
            } else {
                Self::Resolve(line.to_string())
            };
        };

        let mut parts = command.split_whitespace();
        let name = parts.next().unwrap_or_default();
        let argument = parts.next();
        match (name, argument) {
            ("list", None) => Self::List,
            ("clear", None) => Self::Clear,
            ("help", None) => Self::Help,
            ("quit" | "exit", None) => Self::Quit,
            ("use", Some(code)) => Self::Use(code.to_string()),
            ("pick", Some(index)) => index
                .parse()
                .map_or_else(|_| Self::Invalid(format!("not an index: {index}")), Self::Pick),
            _ => Self::Invalid(format!("unknown command :{command}")),
        }
    }
}

/// Runs `command` against the registry and returns the text to print.
pub fn execute(registry: &LanguageRegistry, command: &Command) -> Option<String> {
    match command {
        Command::List => {
            let active = registry.active_code();
            let lines: Vec<String> = registry
                .codes()
                .iter()
                .enumerate()
                .map(|(index, code)| {
                    let marker = if active.as_deref() == Some(code.as_str()) { '*' } else { ' ' };
                    format!("{marker} {index}: {code}")
                })
                .collect();
            if lines.is_empty() {
                Some("no languages loaded".to_string())
            } else {
                Some(lines.join("\n"))
            }
        }
        Command::Use(code) => Some(match registry.select(code) {
            Ok(()) => format!("language set to {code}"),
            Err(e) => e.to_string(),
        }),
        Command::Pick(index) => Some(match registry.select_index(*index) {
            Some(code) => format!("language set to {code}"),
            None => "language selection cleared".to_string(),
        }),
        Command::Clear => {
            registry.deselect();
            Some("language selection cleared".to_string())
        }
        Command::Help => Some(HELP.to_string()),
        Command::Resolve(key) => Some(registry.resolve(key)),
        Command::Invalid(message) => Some(message.clone()),
        Command::Quit | Command::Empty => None,
    }
}

/// Text shown for a registry notification, if it affects displayed text.
pub fn describe_event(event: &LanguageEvent) -> Option<String> {
    match event {
        LanguageEvent::ActiveReloaded { code } => {
            Some(format!("[{code} reloaded, displayed text refreshed]"))
        }
        LanguageEvent::Upserted {
            code,
            replaced: false,
        } => Some(format!("[new language available: {code}]")),
        LanguageEvent::Upserted { .. } | LanguageEvent::ActiveChanged { .. } => None,
    }
}

/// Reads commands from `input` until `:quit`, end of input or Ctrl-C,
/// writing responses and change notifications to `output`.
pub async fn run_console<R, W>(registry: &LanguageRegistry, input: R, mut output: W) -> AppResult<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut events = registry.subscribe();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            _ = &mut ctrl_c => {
                debug!("Interrupted");
                break;
            }
            event = events.recv() => match event {
                Ok(event) => {
                    if let Some(text) = describe_event(&event) {
                        write_line(&mut output, &text).await?;
                    }
                }
                Err(RecvError::Lagged(skipped)) => warn!("Missed {} language events", skipped),
                Err(RecvError::Closed) => break,
            },
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let command = Command::parse(&line);
                if command == Command::Quit {
                    break;
                }
                if let Some(text) = execute(registry, &command) {
                    write_line(&mut output, &text).await?;
                }
            }
        }
    }

    output.flush().await?;
    Ok(())
}

async fn write_line<W: AsyncWrite + Unpin>(output: &mut W, text: &str) -> AppResult<()> {
    output.write_all(text.as_bytes()).await?;
    output.write_all(b"\n").await?;
    output.flush().await?;
    Ok(())
}
