//! Parsing of the text commands typed at the prompt.
use std::str::FromStr;

use game_core::{PlayerId, PlayerIntent, TargetAction};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  ok                     close the role reveal and start the first night
  attack|protect|check|poison|shoot <seat>
                         night action or hunter shot on a seat
  save                   use the antidote on tonight's victim
  say <text>             speak during discussion
  vote <seat>            vote to eliminate a seat
  pass                   skip the current action, speech or vote
  status                 show the table as JSON
  log                    show the full game log
  restart                deal a new game
  help                   show this help
  quit                   leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Intent(PlayerIntent),
    Status,
    Log,
    Restart,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("type a command, or `help`")]
    Empty,
    #[error("unknown command `{0}`, try `help`")]
    Unknown(String),
    #[error("`{0}` needs a seat number")]
    MissingSeat(String),
    #[error("`{0}` is not a seat number")]
    BadSeat(String),
    #[error("`say` needs something to say")]
    MissingSpeech,
}

impl FromStr for Command {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };
        let word = word.to_ascii_lowercase();

        let command = match word.as_str() {
            "" => return Err(ParseError::Empty),
            "ok" | "ack" => Command::Intent(PlayerIntent::AcknowledgeRole),
            "save" | "antidote" => Command::Intent(PlayerIntent::UseAntidote),
            "pass" | "skip" | "abstain" => Command::Intent(PlayerIntent::Pass),
            "say" if rest.is_empty() => return Err(ParseError::MissingSpeech),
            "say" => Command::Intent(PlayerIntent::SubmitSpeech(rest.to_string())),
            "vote" => Command::Intent(PlayerIntent::CastVote(seat(&word, rest)?)),
            "status" => Command::Status,
            "log" => Command::Log,
            "restart" => Command::Restart,
            "help" | "?" => Command::Help,
            "quit" | "exit" => Command::Quit,
            other => match TargetAction::from_str(other) {
                Ok(action) => Command::Intent(PlayerIntent::SelectTarget {
                    action,
                    target: seat(&word, rest)?,
                }),
                Err(_) => return Err(ParseError::Unknown(other.to_string())),
            },
        };
        Ok(command)
    }
}

fn seat(word: &str, rest: &str) -> Result<PlayerId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::MissingSeat(word.to_string()));
    }
    rest.parse::<u8>()
        .map(PlayerId)
        .map_err(|_| ParseError::BadSeat(rest.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, ParseError> {
        line.parse()
    }

    #[test]
    fn target_actions() {
        assert_eq!(
            parse("protect 3"),
            Ok(Command::Intent(PlayerIntent::SelectTarget {
                action: TargetAction::Protect,
                target: PlayerId(3),
            }))
        );
        assert_eq!(
            parse("  SHOOT   6 "),
            Ok(Command::Intent(PlayerIntent::SelectTarget {
                action: TargetAction::Shoot,
                target: PlayerId(6),
            }))
        );
        assert_eq!(parse("check"), Err(ParseError::MissingSeat("check".into())));
        assert_eq!(parse("attack x"), Err(ParseError::BadSeat("x".into())));
        assert_eq!(parse("attack 300"), Err(ParseError::BadSeat("300".into())));
    }

    #[test]
    fn day_commands() {
        assert_eq!(
            parse("vote 2"),
            Ok(Command::Intent(PlayerIntent::CastVote(PlayerId(2))))
        );
        assert_eq!(
            parse("say Player 4 is lying"),
            Ok(Command::Intent(PlayerIntent::SubmitSpeech(
                "Player 4 is lying".into()
            )))
        );
        assert_eq!(parse("say   "), Err(ParseError::MissingSpeech));
        assert_eq!(parse("pass"), Ok(Command::Intent(PlayerIntent::Pass)));
    }

    #[test]
    fn meta_commands() {
        assert_eq!(parse("ok"), Ok(Command::Intent(PlayerIntent::AcknowledgeRole)));
        assert_eq!(parse("save"), Ok(Command::Intent(PlayerIntent::UseAntidote)));
        assert_eq!(parse("status"), Ok(Command::Status));
        assert_eq!(parse("Quit"), Ok(Command::Quit));
        assert_eq!(parse(""), Err(ParseError::Empty));
        assert_eq!(parse("dance"), Err(ParseError::Unknown("dance".into())));
    }
}
