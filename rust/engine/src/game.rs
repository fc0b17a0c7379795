use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::hand::HandResult;
use crate::player::{Action, PlayerState};
use crate::pot::Pot;

/// Hand lifecycle. `BetweenHands` is both the initial state and where every
/// hand ends.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    BetweenHands,
}

impl Phase {
    /// Streets on which a betting round runs.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::PreFlop => "pre_flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
            Phase::BetweenHands => "between_hands",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    #[default]
    Waiting,
    Active,
    Paused,
    Completed,
}

/// How one pot was awarded at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct PotDistribution {
    pub pot_index: usize,
    pub amount: u32,
    pub eligible_players: Vec<usize>,
    pub winners: Vec<usize>,
}

#[derive(Debug, Clone, Eq, PartialEq, Default, Serialize, Deserialize)]
pub struct ShowdownResult {
    /// Seats holding the best hand overall (several on a split)
    pub winners: Vec<usize>,
    /// Every contested hand, best first
    pub hand_results: Vec<HandResult>,
    pub pot_distributions: Vec<PotDistribution>,
}

/// Full snapshot of the table, suitable for persistence or for redaction
/// before it is shown to a seat.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub game_id: String,
    pub status: GameStatus,
    pub players: Vec<PlayerState>,
    pub dealer_position: usize,
    pub small_blind: u32,
    pub big_blind: u32,
    pub blind_level: usize,
    pub hand_number: u32,
    pub community_cards: Vec<Card>,
    pub pots: Vec<Pot>,
    pub current_bet: u32,
    pub min_raise: u32,
    pub phase: Phase,
    pub current_hand_actions: Vec<Action>,
    pub showdown_result: Option<ShowdownResult>,
    pub eliminated_players: Vec<usize>,
}

impl GameState {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.chips).sum::<u32>()
            + self.pots.iter().map(|p| p.amount).sum::<u32>()
    }
}
