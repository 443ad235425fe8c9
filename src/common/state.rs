//! Global state machine.
//!
//! Level entities are spawned on `OnEnter(GameState::InGame)` and tagged with
//! `DespawnOnExit(GameState::InGame)`, so leaving the state tears the round down.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
