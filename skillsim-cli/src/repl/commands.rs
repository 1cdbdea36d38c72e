//! In-band REPL command parsing.
//!
//! Commands start with a `.` prefix. Only `.record` and `.quit` are
//! registered; any other dot-prefixed word is passed through as an
//! ordinary utterance, since skills may legitimately respond to it.

/// Usage string for the record command.
const RECORD_USAGE: &str = "usage: .record <file> [--append-quit]";

/// Parsed REPL input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain utterance to send to the skill.
    Utterance(String),

    /// Serialize the utterances spoken so far into a replay script.
    Record { path: String, append_quit: bool },

    /// Flush the session IO sink and exit the REPL.
    Quit,

    /// Empty input (just pressed enter).
    Empty,

    /// A recognized command with malformed arguments; carries the warning
    /// to show. The turn is a no-op.
    Malformed(String),
}

impl Command {
    /// Parse one input line.
    pub fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Command::Empty;
        }

        let Some(rest) = trimmed.strip_prefix('.') else {
            return Command::Utterance(trimmed.to_string());
        };

        let mut tokens = rest.split_whitespace();
        match tokens.next() {
            Some("quit") => Command::Quit,
            Some("record") => {
                let args: Vec<&str> = tokens.collect();
                match args.as_slice() {
                    [path] => Command::Record {
                        path: path.to_string(),
                        append_quit: false,
                    },
                    [path, "--append-quit"] => Command::Record {
                        path: path.to_string(),
                        append_quit: true,
                    },
                    [] => Command::Malformed(format!("missing file path; {}", RECORD_USAGE)),
                    [_, flag] => Command::Malformed(format!(
                        "unrecognized flag {:?}; {}",
                        flag, RECORD_USAGE
                    )),
                    _ => Command::Malformed(format!("too many arguments; {}", RECORD_USAGE)),
                }
            }
            // Unregistered dot-words go to the skill as-is.
            _ => Command::Utterance(trimmed.to_string()),
        }
    }
}
