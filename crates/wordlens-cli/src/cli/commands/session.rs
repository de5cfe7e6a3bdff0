//! Interactive session: a line-oriented front end for the text engine.
//!
//! Plain lines replace the text. Lines starting with `:` are commands; a
//! leading `::` escapes a literal colon.

use std::io::Write;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use wordlens_core::config::Config;
use wordlens_core::{
    ClipboardWriter, SystemClipboard, TextEngine, Timer, TokioTimer, TransformKind,
};

use super::stats::render_table;

const HELP: &str = "\
Type text to replace the current text, or a command:
  :upper :lower :capitalize :reverse   transform the text
  :append <text>                       add a line to the text
  :copy                                copy the text to the clipboard
  :clear                               empty the text
  :stats                               show word/character counts and reading time
  :show                                print the text
  :help                                show this help
  :quit                                leave the session";

#[derive(Debug, PartialEq, Eq)]
enum SessionCommand<'a> {
    SetText(&'a str),
    Append(&'a str),
    Transform(TransformKind),
    Copy,
    Clear,
    Stats,
    Show,
    Help,
    Quit,
    Unknown(&'a str),
    /// A command that takes no argument was given one.
    UnexpectedArgument(&'a str),
}

fn parse_line(line: &str) -> SessionCommand<'_> {
    if let Some(literal) = line.strip_prefix(':').filter(|rest| rest.starts_with(':')) {
        return SessionCommand::SetText(literal);
    }
    let Some(command) = line.strip_prefix(':') else {
        return SessionCommand::SetText(line);
    };

    let (name, rest) = command.split_once(' ').unwrap_or((command, ""));
    let name = name.trim();

    let parsed = match name {
        "append" => return SessionCommand::Append(rest),
        "copy" => SessionCommand::Copy,
        "clear" => SessionCommand::Clear,
        "stats" => SessionCommand::Stats,
        "show" => SessionCommand::Show,
        "help" | "?" => SessionCommand::Help,
        "quit" | "q" | "exit" => SessionCommand::Quit,
        other => match other.parse() {
            Ok(kind) => SessionCommand::Transform(kind),
            Err(_) => return SessionCommand::Unknown(other),
        },
    };

    if rest.trim().is_empty() {
        parsed
    } else {
        SessionCommand::UnexpectedArgument(name)
    }
}

pub async fn run(config: &Config) -> Result<()> {
    let clipboard = SystemClipboard::from_config(&config.clipboard);
    let timer = TokioTimer::current()?;
    let engine = TextEngine::with_options(clipboard, timer, config.engine_options());

    let stdin = BufReader::new(tokio::io::stdin());
    drive(engine, stdin, std::io::stdout()).await
}

/// Reads commands from `input` until EOF or `:quit`, writing to `out`.
async fn drive<C, T, R, W>(mut engine: TextEngine<C, T>, input: R, mut out: W) -> Result<()>
where
    C: ClipboardWriter,
    T: Timer,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut lines = input.lines();
    writeln!(out, "wordlens session (:help for commands)")?;

    loop {
        write_prompt(&engine, &mut out)?;
        let Some(line) = lines.next_line().await.context("read session input")? else {
            break;
        };

        match parse_line(&line) {
            SessionCommand::SetText(text) => engine.set_text(text),
            SessionCommand::Append(text) => {
                let mut next = engine.text().to_string();
                if !next.is_empty() {
                    next.push('\n');
                }
                next.push_str(text);
                engine.set_text(next);
            }
            SessionCommand::Transform(kind) => {
                engine.transform(kind);
                writeln!(out, "{}", engine.text())?;
            }
            SessionCommand::Copy => match engine.copy_to_clipboard() {
                Ok(()) => writeln!(out, "Copied!")?,
                Err(err) => writeln!(out, "Copy failed: {err}")?,
            },
            SessionCommand::Clear => engine.clear(),
            SessionCommand::Stats => writeln!(out, "{}", render_table(&engine.stats()))?,
            SessionCommand::Show => match engine.preview() {
                Some(text) => writeln!(out, "{text}")?,
                None => writeln!(out, "(empty)")?,
            },
            SessionCommand::Help => writeln!(out, "{HELP}")?,
            SessionCommand::Quit => break,
            SessionCommand::Unknown(name) => {
                writeln!(out, "Unknown command ':{name}' (try :help)")?;
            }
            SessionCommand::UnexpectedArgument(name) => {
                writeln!(out, "Command ':{name}' takes no argument (try :help)")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn write_prompt<C, T, W>(engine: &TextEngine<C, T>, out: &mut W) -> Result<()>
where
    C: ClipboardWriter,
    T: Timer,
    W: Write,
{
    if engine.is_copied() {
        write!(out, "[copied] > ")?;
    } else {
        write!(out, "> ")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use wordlens_core::{ClipboardError, ManualTimer};

    use super::*;

    #[derive(Clone, Default)]
    struct RecordingClipboard(Arc<Mutex<Vec<String>>>);

    impl ClipboardWriter for RecordingClipboard {
        fn write(&self, text: &str) -> Result<(), ClipboardError> {
            self.0.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct DeniedClipboard;

    impl ClipboardWriter for DeniedClipboard {
        fn write(&self, _text: &str) -> Result<(), ClipboardError> {
            Err(ClipboardError::System("denied".to_string()))
        }
    }

    async fn run_script<C: ClipboardWriter>(clipboard: C, script: &str) -> String {
        let engine = TextEngine::new(clipboard, ManualTimer::new());
        let mut out = Vec::new();
        drive(engine, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("hello"), SessionCommand::SetText("hello"));
        assert_eq!(parse_line("::colon"), SessionCommand::SetText(":colon"));
        assert_eq!(
            parse_line(":upper"),
            SessionCommand::Transform(TransformKind::Upper)
        );
        assert_eq!(
            parse_line(":rev"),
            SessionCommand::Transform(TransformKind::Reverse)
        );
        assert_eq!(parse_line(":append more"), SessionCommand::Append("more"));
        assert_eq!(parse_line(":copy"), SessionCommand::Copy);
        assert_eq!(parse_line(":q"), SessionCommand::Quit);
        assert_eq!(parse_line(":shout"), SessionCommand::Unknown("shout"));
        assert_eq!(parse_line(":copy "), SessionCommand::Copy);
    }

    #[test]
    fn test_parse_line_rejects_arguments() {
        assert_eq!(
            parse_line(":upper now"),
            SessionCommand::UnexpectedArgument("upper")
        );
        assert_eq!(
            parse_line(":quit please"),
            SessionCommand::UnexpectedArgument("quit")
        );
        assert_eq!(parse_line(":shout loudly"), SessionCommand::Unknown("shout"));
    }

    #[tokio::test]
    async fn test_session_reports_unexpected_argument() {
        let out = run_script(
            RecordingClipboard::default(),
            "keep me\n:upper now\n:quit now\n:show\n",
        )
        .await;

        assert!(out.contains("Command ':upper' takes no argument"));
        assert!(out.contains("Command ':quit' takes no argument"));
        // Neither the transform nor the quit ran.
        assert!(out.contains("keep me\n"));
        assert!(!out.contains("KEEP ME"));
    }

    #[tokio::test]
    async fn test_session_transforms_and_stats() {
        let out = run_script(
            RecordingClipboard::default(),
            "hello   world\n:capitalize\n:stats\n:quit\n:show\n",
        )
        .await;

        assert!(out.contains("Hello   World"));
        assert!(out.contains("Words"));
        assert!(out.contains("13"));
        // Nothing runs after :quit.
        assert_eq!(out.matches("Hello   World").count(), 1);
    }

    #[tokio::test]
    async fn test_session_copy_shows_acknowledgment() {
        let clipboard = RecordingClipboard::default();
        let out = run_script(clipboard.clone(), "copy me\n:copy\n").await;

        assert!(out.contains("Copied!"));
        assert!(out.contains("[copied] > "));
        assert_eq!(*clipboard.0.lock().unwrap(), vec!["copy me".to_string()]);
    }

    #[tokio::test]
    async fn test_session_copy_failure_is_reported() {
        let out = run_script(DeniedClipboard, "text\n:copy\n").await;

        assert!(out.contains("Copy failed: System clipboard failed: denied"));
        assert!(!out.contains("[copied]"));
    }

    #[tokio::test]
    async fn test_session_append_clear_and_show() {
        let out = run_script(
            RecordingClipboard::default(),
            "first\n:append second\n:show\n:clear\n:show\n:nope\n",
        )
        .await;

        assert!(out.contains("first\nsecond\n"));
        assert!(out.contains("(empty)"));
        assert!(out.contains("Unknown command ':nope'"));
    }
}
