//! Synchronous table driver: asks each seat's agent for a decision whenever
//! that seat owes one and feeds it to the engine.

use holdem_engine::engine::GameEngine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Phase, ShowdownResult};
use holdem_engine::player::ActionKind;
use holdem_engine::tournament::{TournamentManager, TournamentResult};

use crate::SeatAgent;

/// How a hand was decided.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandOutcome {
    /// Everyone else folded
    FoldedOut { winner: usize },
    Showdown(ShowdownResult),
}

/// Plays hands with one agent per seat, indexed by seat.
pub struct TableDriver {
    agents: Vec<Box<dyn SeatAgent>>,
    auto_folds: u32,
}

impl TableDriver {
    pub fn new(agents: Vec<Box<dyn SeatAgent>>) -> Self {
        Self {
            agents,
            auto_folds: 0,
        }
    }

    /// Decisions rejected by the engine and replaced with a fold.
    pub fn auto_folds(&self) -> u32 {
        self.auto_folds
    }

    fn check_seating(&self, engine: &GameEngine) -> Result<(), GameError> {
        if self.agents.len() < engine.players().len() {
            return Err(GameError::InvalidSeating(format!(
                "{} agents for {} seats",
                self.agents.len(),
                engine.players().len()
            )));
        }
        Ok(())
    }

    /// Runs the current street until every seat that can act has matched
    /// the bet (or the hand is over), starting from the first seat in
    /// acting order.
    pub fn play_betting_round(&mut self, engine: &mut GameEngine) -> Result<(), GameError> {
        let Some(&first) = engine.get_current_order().first() else {
            return Ok(());
        };
        let mut seat = first;
        loop {
            if engine.is_hand_over() || engine.is_betting_round_settled() {
                return Ok(());
            }
            if engine.needs_action(seat)? {
                self.act(engine, seat)?;
            }
            match engine.get_next_player(seat) {
                Some(next) => seat = next,
                None => return Ok(()),
            }
        }
    }

    fn act(&mut self, engine: &mut GameEngine, seat: usize) -> Result<(), GameError> {
        let agent = self
            .agents
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat(seat))?;
        let decision = agent.decide(engine, seat);
        match engine.apply_action(seat, decision.kind, decision.amount) {
            Ok(_) => Ok(()),
            Err(GameError::Action(err)) => {
                tracing::warn!(
                    seat,
                    agent = agent.name(),
                    error = %err,
                    "decision rejected, folding"
                );
                self.auto_folds += 1;
                engine.apply_action(seat, ActionKind::Fold, None)?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Plays an already started hand through to the point where every pot
    /// is awarded. The hand is not ended.
    pub fn play_streets(&mut self, engine: &mut GameEngine) -> Result<HandOutcome, GameError> {
        self.check_seating(engine)?;
        loop {
            self.play_betting_round(engine)?;
            if engine.is_hand_over() {
                let winner = engine.award_pot_to_last_player()?;
                return Ok(HandOutcome::FoldedOut { winner });
            }
            if engine.should_skip_to_showdown() {
                tracing::debug!(phase = %engine.phase(), "no more betting, running out the board");
                while engine.phase().is_betting() {
                    engine.advance_phase()?;
                }
            } else {
                engine.advance_phase()?;
            }
            if engine.phase() == Phase::Showdown {
                return Ok(HandOutcome::Showdown(engine.run_showdown()?));
            }
        }
    }

    /// Starts, plays and ends one hand.
    pub fn play_hand(&mut self, engine: &mut GameEngine) -> Result<HandOutcome, GameError> {
        self.check_seating(engine)?;
        engine.start_hand()?;
        let outcome = self.play_streets(engine)?;
        engine.end_hand()?;
        Ok(outcome)
    }

    /// Plays hands until one player is left or `max_hands` have been dealt.
    /// Returns `None` when the cap stops the tournament first.
    pub fn play_tournament(
        &mut self,
        tournament: &mut TournamentManager,
        max_hands: u32,
    ) -> Result<Option<TournamentResult>, GameError> {
        self.check_seating(tournament.engine())?;
        tournament.start();
        let mut played = 0;
        while !tournament.is_complete() {
            if played >= max_hands {
                tracing::warn!(max_hands, "hand cap reached before a winner");
                return Ok(None);
            }
            tournament.start_hand()?;
            self.play_streets(tournament.engine_mut())?;
            tournament.end_hand()?;
            played += 1;
        }
        Ok(tournament.result().cloned())
    }
}
