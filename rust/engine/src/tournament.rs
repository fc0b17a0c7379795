use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blinds::BlindManager;
use crate::config::TournamentConfig;
use crate::engine::GameEngine;
use crate::errors::{ConfigError, GameError};
use crate::game::GameStatus;
use crate::player::{ActionKind, PlayerState};

/// Running totals over every finished hand.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStats {
    pub total_hands: u32,
    pub biggest_pot: u32,
    pub biggest_pot_hand: u32,
    /// Strongest showdown hand so far, by score
    pub best_hand_score: Option<u32>,
    pub best_hand_name: String,
    pub best_hand_seat: Option<usize>,
    pub best_hand_hand_number: u32,
    pub total_folds: u32,
    pub total_raises: u32,
    pub total_all_ins: u32,
    pub showdowns: u32,
    pub hands_won_without_showdown: u32,
    pub started_at: Option<DateTime<Utc>>,
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentStanding {
    pub seat: usize,
    pub name: String,
    pub agent_id: Option<String>,
    /// 1 = winner
    pub finish_position: usize,
    pub hands_survived: u32,
    /// Current stack for seats still playing, 0 once eliminated
    pub chips: u32,
}

impl TournamentStanding {
    fn of(player: &PlayerState, hands_survived: u32) -> Self {
        Self {
            seat: player.seat,
            name: player.name.clone(),
            agent_id: player.agent_id.clone(),
            finish_position: 0,
            hands_survived,
            chips: player.chips,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TournamentResult {
    pub winner: Option<TournamentStanding>,
    pub standings: Vec<TournamentStanding>,
    pub stats: TournamentStats,
}

/// Runs one [`GameEngine`] across hands until a single player is left,
/// tracking eliminations and statistics along the way.
///
/// Callers drive each hand through [`engine_mut`](Self::engine_mut) between
/// [`start_hand`](Self::start_hand) and [`end_hand`](Self::end_hand).
#[derive(Debug)]
pub struct TournamentManager {
    engine: GameEngine,
    stats: TournamentStats,
    /// First out first
    elimination_order: Vec<TournamentStanding>,
    stacks_at_hand_start: BTreeMap<usize, u32>,
    result: Option<TournamentResult>,
}

impl TournamentManager {
    pub fn new(
        players: Vec<PlayerState>,
        blinds: Option<BlindManager>,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        Ok(Self {
            engine: GameEngine::new(players, blinds, seed)?,
            stats: TournamentStats::default(),
            elimination_order: Vec::new(),
            stacks_at_hand_start: BTreeMap::new(),
            result: None,
        })
    }

    /// Seats `names` in order with the configured stack and blind schedule.
    pub fn from_config<S: AsRef<str>>(
        config: &TournamentConfig,
        names: &[S],
    ) -> Result<Self, TournamentSetupError> {
        config.validate()?;
        let blinds = config.blind_manager()?;
        Ok(Self::new(
            config.seat_players(names),
            Some(blinds),
            config.seed,
        )?)
    }

    pub fn engine(&self) -> &GameEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut GameEngine {
        &mut self.engine
    }

    pub fn stats(&self) -> &TournamentStats {
        &self.stats
    }

    pub fn elimination_order(&self) -> &[TournamentStanding] {
        &self.elimination_order
    }

    pub fn result(&self) -> Option<&TournamentResult> {
        self.result.as_ref()
    }

    pub fn is_complete(&self) -> bool {
        self.engine.is_tournament_over()
    }

    pub fn start(&mut self) {
        self.stats.started_at = Some(Utc::now());
        self.engine.set_status(GameStatus::Active);
        tracing::info!(
            game_id = %self.engine.game_id(),
            players = self.engine.active_player_count(),
            "tournament started"
        );
    }

    pub fn start_hand(&mut self) -> Result<(), GameError> {
        self.stacks_at_hand_start = self
            .engine
            .players()
            .iter()
            .filter(|p| !p.eliminated)
            .map(|p| (p.seat, p.chips))
            .collect();
        self.engine.start_hand()
    }

    /// Finishes the hand once its pots are awarded (after `run_showdown` or
    /// `award_pot_to_last_player`). Returns the seats eliminated this hand.
    pub fn end_hand(&mut self) -> Result<Vec<usize>, GameError> {
        // stats must not count a hand whose pots are still out
        let left = self.engine.pot_manager().total();
        if left > 0 {
            return Err(GameError::PotNotAwarded { amount: left });
        }
        self.update_hand_stats();
        let mut eliminated = self.engine.end_hand()?;
        self.stats.total_hands = self.engine.hand_number();

        // several busts in one hand: the bigger starting stack finishes higher
        eliminated.sort_by_key(|seat| {
            (
                self.stacks_at_hand_start.get(seat).copied().unwrap_or(0),
                std::cmp::Reverse(*seat),
            )
        });
        let hand = self.engine.hand_number();
        for &seat in &eliminated {
            let player = self.engine.player(seat)?;
            self.elimination_order
                .push(TournamentStanding::of(player, hand));
        }

        if self.engine.is_tournament_over() && self.result.is_none() {
            self.finalize();
        }
        Ok(eliminated)
    }

    fn update_hand_stats(&mut self) {
        let hand = self.engine.hand_number();
        let pot = self.engine.pot_manager().total_contributed();
        if pot > self.stats.biggest_pot {
            self.stats.biggest_pot = pot;
            self.stats.biggest_pot_hand = hand;
        }

        for action in self.engine.hand_actions() {
            match action.kind {
                ActionKind::Fold => self.stats.total_folds += 1,
                ActionKind::Raise => self.stats.total_raises += 1,
                _ => {}
            }
        }
        self.stats.total_all_ins += self.engine.players().iter().filter(|p| p.all_in).count() as u32;

        match self.engine.showdown_result() {
            Some(showdown) => {
                self.stats.showdowns += 1;
                for r in &showdown.hand_results {
                    if self.stats.best_hand_score.is_none_or(|best| r.score > best) {
                        self.stats.best_hand_score = Some(r.score);
                        self.stats.best_hand_name = r.description.clone();
                        self.stats.best_hand_seat = Some(r.seat);
                        self.stats.best_hand_hand_number = hand;
                    }
                }
            }
            None => self.stats.hands_won_without_showdown += 1,
        }
    }

    fn finalize(&mut self) {
        self.stats.ended_at = Some(Utc::now());
        self.engine.set_status(GameStatus::Completed);

        let standings = self.get_standings();
        let winner = self
            .engine
            .get_winner()
            .and_then(|w| standings.iter().find(|s| s.seat == w.seat).cloned());
        tracing::info!(
            winner = winner.as_ref().map(|w| w.name.as_str()).unwrap_or("none"),
            hands = self.stats.total_hands,
            "tournament complete"
        );
        self.result = Some(TournamentResult {
            winner,
            standings,
            stats: self.stats.clone(),
        });
    }

    /// Seats still playing by chips (descending, ties by seat), then
    /// eliminated seats last-out first.
    pub fn get_standings(&self) -> Vec<TournamentStanding> {
        let hand = self.engine.hand_number();
        let mut active: Vec<&PlayerState> = self
            .engine
            .players()
            .iter()
            .filter(|p| !p.eliminated)
            .collect();
        active.sort_by(|a, b| b.chips.cmp(&a.chips).then(a.seat.cmp(&b.seat)));

        let mut standings: Vec<TournamentStanding> = active
            .into_iter()
            .map(|p| TournamentStanding::of(p, hand))
            .collect();
        standings.extend(self.elimination_order.iter().rev().cloned());
        // seated without chips: never played a hand
        standings.extend(
            self.engine
                .players()
                .iter()
                .filter(|p| p.eliminated && !self.elimination_order.iter().any(|s| s.seat == p.seat))
                .map(|p| TournamentStanding::of(p, 0)),
        );
        for (i, s) in standings.iter_mut().enumerate() {
            s.finish_position = i + 1;
        }
        standings
    }
}

/// Failure building a tournament from configuration.
#[derive(Debug, thiserror::Error)]
pub enum TournamentSetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Game(#[from] GameError),
}
