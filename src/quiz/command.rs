/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Answer { question_id: String, choice_id: String },
    Submit,
    Reset,
    Retry,
    Show,
    Help,
    Quit,
}

pub const HELP_TEXT: &str = "Commands:
  answer <question> <choice>   select a choice (short: a)
  submit                       grade the attempt (short: s)
  reset                        clear all answers (short: r)
  retry                        start over after a submission
  show                         draw the quiz again
  help                         list these commands (short: h, ?)
  quit                         leave (short: q, exit)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Empty,
    Unknown(String),
    /// `answer` without both ids.
    MissingIds,
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParseError::Empty => write!(f, "Please type a command (`help` lists them)"),
            ParseError::Unknown(word) => {
                write!(f, "Unknown command '{}', type `help` for the list", word)
            }
            ParseError::MissingIds => write!(f, "Usage: answer <question> <choice>"),
        }
    }
}

impl std::error::Error for ParseError {}

impl std::str::FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(ParseError::Empty);
        };
        match head.to_lowercase().as_str() {
            "answer" | "a" => match (words.next(), words.next(), words.next()) {
                (Some(question_id), Some(choice_id), None) => Ok(Command::Answer {
                    question_id: question_id.to_string(),
                    choice_id: choice_id.to_string(),
                }),
                _ => Err(ParseError::MissingIds),
            },
            "submit" | "s" => Ok(Command::Submit),
            "reset" | "r" => Ok(Command::Reset),
            "retry" => Ok(Command::Retry),
            "show" => Ok(Command::Show),
            "help" | "h" | "?" => Ok(Command::Help),
            "quit" | "q" | "exit" => Ok(Command::Quit),
            _ => Err(ParseError::Unknown(head.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_answers() {
        assert_eq!(
            "answer 3 true".parse::<Command>(),
            Ok(Command::Answer {
                question_id: "3".into(),
                choice_id: "true".into()
            })
        );
        assert_eq!(
            "  a 1   c ".parse::<Command>(),
            Ok(Command::Answer {
                question_id: "1".into(),
                choice_id: "c".into()
            })
        );
        assert_eq!("answer 1".parse::<Command>(), Err(ParseError::MissingIds));
        assert_eq!("a 1 b c".parse::<Command>(), Err(ParseError::MissingIds));
    }

    #[test]
    fn parses_buttons_and_aliases() {
        assert_eq!("submit".parse::<Command>(), Ok(Command::Submit));
        assert_eq!("S".parse::<Command>(), Ok(Command::Submit));
        assert_eq!("r".parse::<Command>(), Ok(Command::Reset));
        assert_eq!("retry".parse::<Command>(), Ok(Command::Retry));
        assert_eq!("show".parse::<Command>(), Ok(Command::Show));
        assert_eq!("?".parse::<Command>(), Ok(Command::Help));
        assert_eq!("exit".parse::<Command>(), Ok(Command::Quit));
    }

    #[test]
    fn help_text_lists_every_command() {
        for word in [
            "answer", "submit", "reset", "retry", "show", "help", "quit", "exit",
        ] {
            assert!(HELP_TEXT.contains(word), "missing '{}'", word);
            assert!(word.parse::<Command>().is_ok() || word == "answer");
        }
        for hint in [
            "(short: a)",
            "(short: s)",
            "(short: r)",
            "(short: h, ?)",
            "(short: q, exit)",
        ] {
            assert!(HELP_TEXT.contains(hint), "missing '{}'", hint);
        }
    }

    #[test]
    fn rejects_blank_and_unknown_input() {
        assert_eq!("   ".parse::<Command>(), Err(ParseError::Empty));
        assert_eq!(
            "dance".parse::<Command>(),
            Err(ParseError::Unknown("dance".into()))
        );
    }
}
