//! Turns a provider's raw reply into a [`ParsedAction`].
//!
//! Only the shape of the answer is checked here. Whether the seat is alive
//! or allowed is the engine's call when the action is committed.
use std::sync::LazyLock;

use regex::Regex;

use game_core::{AnswerShape, ParsedAction, PlayerId, TaskKind};

use crate::api::DecisionError;

static ALL_DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d+$").expect("valid all-digits regex"));

static FIRST_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid integer regex"));

static YES_NO_OR_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(yes|no|\d+)$").expect("valid yes/no regex"));

/// Strips backticks, folds newlines into spaces and trims.
pub fn clean(raw: &str) -> String {
    raw.replace('`', "").replace(['\r', '\n'], " ").trim().to_string()
}

pub fn normalize(kind: TaskKind, raw: &str) -> Result<ParsedAction, DecisionError> {
    let text = clean(raw);
    let unusable = || DecisionError::Unusable {
        kind,
        raw: raw.to_string(),
    };

    match kind.answer_shape() {
        AnswerShape::Target => {
            let digits = if ALL_DIGITS.is_match(&text) {
                Some(text.as_str())
            } else {
                FIRST_INTEGER.find(&text).map(|m| m.as_str())
            };
            digits.and_then(seat).ok_or_else(unusable)
        }

        AnswerShape::YesNoOrTarget => {
            let lower = text.to_lowercase();
            if YES_NO_OR_ID.is_match(&lower) {
                return match lower.as_str() {
                    "yes" => Ok(ParsedAction::YesNo(true)),
                    "no" => Ok(ParsedAction::YesNo(false)),
                    digits => seat(digits).ok_or_else(unusable),
                };
            }
            if lower.contains("yes") {
                Ok(ParsedAction::YesNo(true))
            } else if lower.contains("no") {
                Ok(ParsedAction::YesNo(false))
            } else {
                FIRST_INTEGER
                    .find(&lower)
                    .and_then(|m| seat(m.as_str()))
                    .ok_or_else(unusable)
            }
        }

        AnswerShape::FreeText => {
            if text.is_empty() {
                Ok(ParsedAction::Abstain)
            } else {
                Ok(ParsedAction::FreeText(text))
            }
        }
    }
}

/// Seat numbers beyond `u8` cannot name anyone.
fn seat(digits: &str) -> Option<ParsedAction> {
    digits
        .parse::<u8>()
        .ok()
        .map(|id| ParsedAction::TargetId(PlayerId(id)))
}
