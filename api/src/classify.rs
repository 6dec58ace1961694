use crate::statsapi::RawGame;
use crate::{GameState, GameType, ParseError};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Why a well-formed game was left out of every bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    GameType(GameType),
    State(String),
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::GameType(t) => write!(f, "not a regular season game ({t:?})"),
            Skip::State(s) => write!(f, "unhandled game state {s:?}"),
        }
    }
}

/// Deserialize one slot of a schedule date into a typed game.
pub fn parse_game(value: &Value) -> Result<RawGame, ParseError> {
    RawGame::deserialize(value).map_err(|e| ParseError::Payload(e.to_string()))
}

/// Decide whether a game belongs in the output, and in which lifecycle state.
///
/// Only regular-season games pass. Anything other than the three known
/// abstract states is excluded rather than guessed at.
pub fn classify(game: &RawGame) -> Result<GameState, Skip> {
    let game_type = GameType::from_code(&game.game_type);
    if !game_type.is_regular_season() {
        return Err(Skip::GameType(game_type));
    }
    parse_state(&game.status.abstract_game_state)
}

fn parse_state(s: &str) -> Result<GameState, Skip> {
    match s {
        "Preview" => Ok(GameState::Preview),
        "Live" => Ok(GameState::Live),
        "Final" => Ok(GameState::Final),
        other => Err(Skip::State(other.to_owned())),
    }
}
