use std::collections::BTreeSet;

use chrono::{DateTime, Utc};

use crate::errors::ActionError;
use crate::player::{Action, ActionKind as A, PlayerState};

/// Betting state for one round (street).
///
/// Holds no reference to the players: every query and mutation takes the
/// acting seat's [`PlayerState`] for the duration of the call.
#[derive(Debug, Clone, Default)]
pub struct BettingManager {
    current_bet: u32,
    min_raise: u32,
    last_raiser: Option<usize>,
    acted: BTreeSet<usize>,
    actions: Vec<Action>,
}

impl BettingManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets all round state. `initial_bet` is the big blind pre-flop and 0
    /// afterwards; it also seeds the minimum raise increment.
    pub fn new_round(&mut self, initial_bet: u32) {
        self.open_round(initial_bet, initial_bet);
    }

    /// Like [`new_round`](Self::new_round) with an explicit minimum increment,
    /// used post-flop so the opening bet is at least the big blind.
    pub fn open_round(&mut self, initial_bet: u32, min_increment: u32) {
        self.current_bet = initial_bet;
        self.min_raise = min_increment.max(1);
        self.last_raiser = None;
        self.acted.clear();
        self.actions.clear();
    }

    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }

    /// Minimum raise increment.
    pub fn min_raise(&self) -> u32 {
        self.min_raise
    }

    pub fn last_raiser(&self) -> Option<usize> {
        self.last_raiser
    }

    pub fn actions_this_round(&self) -> &[Action] {
        &self.actions
    }

    pub fn get_valid_actions(&self, player: &PlayerState) -> Vec<A> {
        if !player.can_act() {
            return Vec::new();
        }
        let mut actions = vec![A::Fold];
        let to_call = self.current_bet.saturating_sub(player.current_bet);
        if to_call == 0 {
            actions.push(A::Check);
        } else {
            actions.push(A::Call);
        }
        if player.chips > to_call {
            actions.push(A::Raise);
        }
        actions
    }

    /// Chips needed to call, capped at the stack (a short call is an all-in).
    pub fn get_call_amount(&self, player: &PlayerState) -> u32 {
        self.current_bet
            .saturating_sub(player.current_bet)
            .min(player.chips)
    }

    pub fn get_min_raise_to(&self, _player: &PlayerState) -> u32 {
        self.current_bet + self.min_raise
    }

    pub fn get_max_raise_to(&self, player: &PlayerState) -> u32 {
        player.max_bet()
    }

    /// Checks an action without applying it. `amount` is the raise-to total
    /// and is ignored for other kinds.
    pub fn validate_action(
        &self,
        player: &PlayerState,
        kind: A,
        amount: Option<u32>,
    ) -> Result<(), ActionError> {
        let valid = self.get_valid_actions(player);
        if valid.is_empty() {
            return Err(ActionError::CannotAct { seat: player.seat });
        }
        if !valid.contains(&kind) {
            return Err(ActionError::NotAllowed {
                seat: player.seat,
                kind,
                valid,
            });
        }
        if kind == A::Raise {
            let amount = amount.ok_or(ActionError::MissingAmount)?;
            let minimum = self.get_min_raise_to(player);
            let maximum = self.get_max_raise_to(player);
            if amount > maximum {
                return Err(ActionError::AboveMaximum { amount, maximum });
            }
            // all-in for less than a full raise is always allowed
            if amount < minimum && amount != maximum {
                return Err(ActionError::BelowMinimum {
                    amount,
                    minimum,
                    all_in: maximum,
                });
            }
        }
        Ok(())
    }

    /// Validates and applies an action, mutating `player` in place.
    pub fn apply_action(
        &mut self,
        player: &mut PlayerState,
        kind: A,
        amount: Option<u32>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Action, ActionError> {
        self.validate_action(player, kind, amount)?;
        let seat = player.seat;

        let (moved, raise_to) = match kind {
            A::Fold => {
                player.folded = true;
                tracing::debug!(seat, "fold");
                (0, None)
            }
            A::Check => {
                tracing::debug!(seat, "check");
                (0, None)
            }
            A::Call => {
                let call = self.get_call_amount(player);
                player.commit(call);
                tracing::debug!(seat, amount = call, all_in = player.all_in, "call");
                (call, None)
            }
            A::Raise => {
                let raise_to = amount.ok_or(ActionError::MissingAmount)?;
                let additional = raise_to - player.current_bet;
                player.commit(additional);

                let increment = raise_to - self.current_bet;
                if increment > self.min_raise {
                    self.min_raise = increment;
                }
                self.current_bet = raise_to;
                self.last_raiser = Some(seat);
                // everyone must act again after a raise
                self.acted.clear();
                tracing::debug!(seat, raise_to, all_in = player.all_in, "raise");
                (additional, Some(raise_to))
            }
            A::PostBlind => {
                return Err(ActionError::NotAllowed {
                    seat,
                    kind,
                    valid: self.get_valid_actions(player),
                })
            }
        };

        player.has_acted = true;
        self.acted.insert(seat);

        let action = Action {
            seat,
            kind,
            amount: Some(moved),
            raise_to,
            timestamp,
        };
        self.actions.push(action.clone());
        Ok(action)
    }

    /// Complete when at most one seat can still act, or every such seat has
    /// acted since the last raise and matched the current bet.
    pub fn is_round_complete(&self, players: &[PlayerState]) -> bool {
        if self.count_actionable_players(players) <= 1 {
            return true;
        }
        players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| self.acted.contains(&p.seat) && p.current_bet == self.current_bet)
    }

    /// Seat still owes a decision this round: it has not acted since the last
    /// raise, or it is short of the current bet.
    pub fn needs_action(&self, player: &PlayerState) -> bool {
        player.can_act()
            && (!self.acted.contains(&player.seat) || player.current_bet < self.current_bet)
    }

    /// [`is_round_complete`](Self::is_round_complete), and additionally no
    /// remaining seat faces an unmatched bet. A lone seat left facing an
    /// all-in still has to call or fold before the street closes.
    pub fn is_round_settled(&self, players: &[PlayerState]) -> bool {
        self.is_round_complete(players)
            && players
                .iter()
                .filter(|p| p.can_act())
                .all(|p| p.current_bet >= self.current_bet)
    }

    /// Not folded and not eliminated.
    pub fn count_active_players(&self, players: &[PlayerState]) -> usize {
        players.iter().filter(|p| p.is_active()).count()
    }

    /// Not folded, not all-in and not eliminated.
    pub fn count_actionable_players(&self, players: &[PlayerState]) -> usize {
        players.iter().filter(|p| p.can_act()).count()
    }

    pub fn is_hand_over(&self, players: &[PlayerState]) -> bool {
        self.count_active_players(players) <= 1
    }

    /// No more betting is possible but the hand is still contested.
    pub fn should_skip_to_showdown(&self, players: &[PlayerState]) -> bool {
        self.count_actionable_players(players) <= 1 && self.count_active_players(players) > 1
    }
}
