use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// Kind of action recorded in a hand's log.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Forced small or big blind
    PostBlind,
    /// Fold and forfeit the hand
    Fold,
    /// Check (no bet, only valid if no bet to call)
    Check,
    /// Call the current bet, all-in if the stack is short
    Call,
    /// Raise (or open-bet) to a total amount for this round
    Raise,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ActionKind::PostBlind => "post_blind",
            ActionKind::Fold => "fold",
            ActionKind::Check => "check",
            ActionKind::Call => "call",
            ActionKind::Raise => "raise",
        };
        f.write_str(s)
    }
}

/// An applied action. Immutable once appended to the hand log.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Action {
    pub seat: usize,
    pub kind: ActionKind,
    /// Chips moved from the stack into the pot by this action.
    pub amount: Option<u32>,
    /// Total round bet requested by a raise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raise_to: Option<u32>,
    /// Supplied by the caller; the engine never reads the clock.
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

/// State of one seat at the table.
///
/// Owned by the engine for the table's lifetime and mutated in place by the
/// betting and hand-lifecycle code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Seat index, unique within the table (0..N-1)
    pub seat: usize,
    pub name: String,
    /// Identifier of the automated decision-maker, `None` for a human seat
    #[serde(default)]
    pub agent_id: Option<String>,
    /// Current chip stack
    pub chips: u32,
    /// Present only while holding a hand
    #[serde(default)]
    pub hole_cards: Option<[Card; 2]>,
    pub folded: bool,
    pub all_in: bool,
    pub eliminated: bool,
    pub is_dealer: bool,
    pub has_acted: bool,
    /// Contribution in the current betting round
    pub current_bet: u32,
}

impl PlayerState {
    pub fn new(seat: usize, name: impl Into<String>, chips: u32) -> Self {
        Self {
            seat,
            name: name.into(),
            agent_id: None,
            chips,
            hole_cards: None,
            folded: false,
            all_in: false,
            eliminated: false,
            is_dealer: false,
            has_acted: false,
            current_bet: 0,
        }
    }

    pub fn with_agent(mut self, agent_id: impl Into<String>) -> Self {
        self.agent_id = Some(agent_id.into());
        self
    }

    /// Still contesting the current hand (not folded, not eliminated).
    pub fn is_active(&self) -> bool {
        !self.folded && !self.eliminated
    }

    /// Able to take a betting decision.
    pub fn can_act(&self) -> bool {
        !self.folded && !self.all_in && !self.eliminated
    }

    /// Largest total round bet this seat can reach (going all-in).
    pub fn max_bet(&self) -> u32 {
        self.current_bet + self.chips
    }

    /// Moves `amount` from the stack into this round's bet, flagging all-in
    /// when the stack is exhausted. Callers clip `amount` to the stack.
    pub(crate) fn commit(&mut self, amount: u32) {
        let amount = amount.min(self.chips);
        self.chips -= amount;
        self.current_bet += amount;
        if self.chips == 0 {
            self.all_in = true;
        }
    }

    /// Clears per-hand state ahead of a new deal.
    pub(crate) fn reset_for_hand(&mut self) {
        self.folded = false;
        self.all_in = false;
        self.current_bet = 0;
        self.hole_cards = None;
        self.has_acted = false;
    }

    /// Clears per-round state ahead of a new street.
    pub(crate) fn reset_for_round(&mut self) {
        self.current_bet = 0;
        self.has_acted = false;
    }
}
