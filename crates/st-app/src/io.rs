use std::io::BufRead;
use std::thread::{self, JoinHandle};

use kanal::AsyncSender;

use crate::events::AppEvent;

/// Map one stdin line to an event. `None` for empty lines.
pub fn parse_line(line: &str) -> Option<AppEvent> {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return None;
    }

    let Some(command) = line.trim().strip_prefix(':') else {
        return Some(AppEvent::Input(line.to_string()));
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let arg = parts.next();

    let event = match (name, arg) {
        ("t" | "translate", None) => AppEvent::Translate,
        ("swap", None) => AppEvent::Swap,
        ("from", Some(code)) => AppEvent::SetSource(code.to_string()),
        ("to", Some(code)) => AppEvent::SetTarget(code.to_string()),
        ("clear", None) => AppEvent::Clear,
        ("langs" | "languages", None) => AppEvent::ShowLanguages,
        ("state", None) => AppEvent::ShowState,
        ("q" | "quit" | "close", None) => AppEvent::Close,
        _ => AppEvent::UnknownCommand(line.trim().to_string()),
    };

    Some(event)
}

/// Read stdin on a dedicated thread, blocking reads never stall the runtime.
/// EOF closes the surface.
pub fn spawn_stdin_reader(app_tx: AsyncSender<AppEvent>) -> JoinHandle<()> {
    let tx = app_tx.to_sync();

    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::error!("stdin read failed: {e}");
                    break;
                }
            };

            if let Some(event) = parse_line(&line)
                && tx.send(event).is_err()
            {
                return;
            }
        }

        let _ = tx.send(AppEvent::Close);
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_input() {
        match parse_line("Hello world\n") {
            Some(AppEvent::Input(text)) => assert_eq!(text, "Hello world"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn blank_lines_are_skipped() {
        assert!(parse_line("").is_none());
        assert!(parse_line("   \r\n").is_none());
    }

    #[test]
    fn commands_are_recognised() {
        assert!(matches!(parse_line(":swap"), Some(AppEvent::Swap)));
        assert!(matches!(parse_line(":clear"), Some(AppEvent::Clear)));
        assert!(matches!(parse_line(":langs"), Some(AppEvent::ShowLanguages)));
        assert!(matches!(parse_line(":q"), Some(AppEvent::Close)));
        assert!(matches!(
            parse_line(":from ja"),
            Some(AppEvent::SetSource(code)) if code == "ja"
        ));
        assert!(matches!(
            parse_line(" :to zh-TW "),
            Some(AppEvent::SetTarget(code)) if code == "zh-TW"
        ));
    }

    #[test]
    fn malformed_commands_are_reported() {
        assert!(matches!(parse_line(":to"), Some(AppEvent::UnknownCommand(_))));
        assert!(matches!(parse_line(":dance"), Some(AppEvent::UnknownCommand(_))));
    }
}
