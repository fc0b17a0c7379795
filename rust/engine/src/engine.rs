use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::blinds::BlindManager;
use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::game::{GameState, GameStatus, Phase, PotDistribution, ShowdownResult};
use crate::hand::determine_winners;
use crate::player::{Action, ActionKind, PlayerState};
use crate::pot::PotManager;
use crate::rules::BettingManager;
use crate::turn::TurnManager;

/// Drives one table through hands: deal, betting rounds, showdown and
/// elimination bookkeeping.
///
/// The engine owns the player table. The betting, pot and turn managers only
/// ever see it for the length of a single call. Every operation is
/// synchronous; callers serialize access.
///
/// # Examples
///
/// ```
/// use holdem_engine::engine::GameEngine;
/// use holdem_engine::game::Phase;
/// use holdem_engine::player::{ActionKind, PlayerState};
///
/// let players = vec![
///     PlayerState::new(0, "alice", 1000),
///     PlayerState::new(1, "bob", 1000),
/// ];
/// let mut engine = GameEngine::new(players, None, Some(7)).expect("valid table");
/// engine.start_hand().expect("hand starts");
/// assert_eq!(engine.phase(), Phase::PreFlop);
///
/// // heads-up: the dealer posts the small blind and acts first
/// let first = engine.get_preflop_order()[0];
/// engine.apply_action(first, ActionKind::Fold, None).expect("fold is always legal");
/// let winner = engine.award_pot_to_last_player().expect("one player left");
/// engine.end_hand().expect("pot awarded");
/// assert_ne!(winner, first);
/// assert_eq!(engine.total_chips(), 2000);
/// ```
#[derive(Debug)]
pub struct GameEngine {
    game_id: String,
    status: GameStatus,
    players: Vec<PlayerState>,
    blinds: BlindManager,
    turn: TurnManager,
    betting: BettingManager,
    pots: PotManager,
    deck: Deck,
    hand_number: u32,
    phase: Phase,
    community_cards: Vec<Card>,
    hand_actions: Vec<Action>,
    showdown_result: Option<ShowdownResult>,
    /// Total hand commitment of each seat at the moment it went all-in
    all_in_amounts: BTreeMap<usize, u32>,
    hand_start_total: u32,
}

impl GameEngine {
    /// Seats must be listed in order with `players[i].seat == i`. Seats that
    /// start with no chips are marked eliminated.
    pub fn new(
        mut players: Vec<PlayerState>,
        blinds: Option<BlindManager>,
        seed: Option<u64>,
    ) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::InvalidSeating(format!(
                "need at least 2 seats, got {}",
                players.len()
            )));
        }
        if let Some((i, p)) = players.iter().enumerate().find(|(i, p)| p.seat != *i) {
            return Err(GameError::InvalidSeating(format!(
                "player {:?} listed at position {} has seat {}",
                p.name, i, p.seat
            )));
        }
        for p in players.iter_mut().filter(|p| p.chips == 0) {
            p.eliminated = true;
        }
        let num_seats = players.len();
        let hand_start_total = players.iter().map(|p| p.chips).sum();
        Ok(Self {
            game_id: String::new(),
            status: GameStatus::Waiting,
            players,
            blinds: blinds.unwrap_or_default(),
            turn: TurnManager::new(num_seats),
            betting: BettingManager::new(),
            pots: PotManager::new(),
            deck: Deck::new(seed),
            hand_number: 0,
            phase: Phase::BetweenHands,
            community_cards: Vec::with_capacity(5),
            hand_actions: Vec::new(),
            showdown_result: None,
            all_in_amounts: BTreeMap::new(),
            hand_start_total,
        })
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }
    pub fn set_game_id(&mut self, id: impl Into<String>) {
        self.game_id = id.into();
    }
    pub fn status(&self) -> GameStatus {
        self.status
    }
    pub fn set_status(&mut self, status: GameStatus) {
        self.status = status;
    }
    pub fn players(&self) -> &[PlayerState] {
        &self.players
    }
    pub fn player(&self, seat: usize) -> Result<&PlayerState, GameError> {
        self.players.get(seat).ok_or(GameError::UnknownSeat(seat))
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    pub fn community_cards(&self) -> &[Card] {
        &self.community_cards
    }
    pub fn hand_actions(&self) -> &[Action] {
        &self.hand_actions
    }
    pub fn showdown_result(&self) -> Option<&ShowdownResult> {
        self.showdown_result.as_ref()
    }
    pub fn pot_manager(&self) -> &PotManager {
        &self.pots
    }
    pub fn betting_manager(&self) -> &BettingManager {
        &self.betting
    }
    pub fn blind_manager(&self) -> &BlindManager {
        &self.blinds
    }
    pub fn turn_manager(&self) -> &TurnManager {
        &self.turn
    }
    pub fn dealer_position(&self) -> usize {
        self.turn.dealer_position()
    }

    /// Chips on the table: every stack plus every pot.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(|p| p.chips).sum::<u32>() + self.pots.total()
    }

    /// Value of [`total_chips`](Self::total_chips) when the current hand began.
    pub fn hand_start_total(&self) -> u32 {
        self.hand_start_total
    }

    pub fn get_state(&self) -> GameState {
        GameState {
            game_id: self.game_id.clone(),
            status: self.status,
            players: self.players.clone(),
            dealer_position: self.turn.dealer_position(),
            small_blind: self.blinds.small_blind(),
            big_blind: self.blinds.big_blind(),
            blind_level: self.blinds.current_level(),
            hand_number: self.hand_number,
            community_cards: self.community_cards.clone(),
            pots: self.pots.pots().to_vec(),
            current_bet: self.betting.current_bet(),
            min_raise: self.betting.min_raise(),
            phase: self.phase,
            current_hand_actions: self.hand_actions.clone(),
            showdown_result: self.showdown_result.clone(),
            eliminated_players: self
                .players
                .iter()
                .filter(|p| p.eliminated)
                .map(|p| p.seat)
                .collect(),
        }
    }

    // ─── Hand lifecycle ───────────────────────────────────

    /// Moves the button, posts blinds, deals hole cards and opens pre-flop
    /// betting with the big blind as the bet to match.
    pub fn start_hand(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::BetweenHands {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let seated = self.active_player_count();
        if seated < 2 {
            return Err(GameError::NotEnoughPlayers { found: seated });
        }

        self.hand_start_total = self.total_chips();
        self.hand_number += 1;
        self.phase = Phase::PreFlop;
        self.community_cards.clear();
        self.hand_actions.clear();
        self.showdown_result = None;
        self.all_in_amounts.clear();

        for p in self.players.iter_mut().filter(|p| !p.eliminated) {
            p.reset_for_hand();
        }

        self.pots.reset();
        self.deck.reset();
        self.deck.shuffle();

        let dealer = self.turn.advance_dealer(&self.players);
        for p in self.players.iter_mut() {
            p.is_dealer = p.seat == dealer;
        }

        self.post_blinds();
        self.deal_hole_cards()?;
        self.betting.new_round(self.blinds.big_blind());

        tracing::info!(
            hand = self.hand_number,
            dealer,
            small_blind = self.blinds.small_blind(),
            big_blind = self.blinds.big_blind(),
            "hand started"
        );
        Ok(())
    }

    fn post_blinds(&mut self) {
        let (sb_seat, bb_seat) = self.turn.get_blind_positions(&self.players);
        let postings = self.blinds.get_blind_posting(
            sb_seat,
            bb_seat,
            self.players[sb_seat].chips,
            self.players[bb_seat].chips,
        );
        for posting in postings {
            let player = &mut self.players[posting.seat];
            player.commit(posting.amount);
            self.pots.add_bet(posting.seat, posting.amount);
            if player.all_in {
                self.record_all_in(posting.seat);
            }
            self.hand_actions.push(Action {
                seat: posting.seat,
                kind: ActionKind::PostBlind,
                amount: Some(posting.amount),
                raise_to: None,
                timestamp: None,
            });
            tracing::debug!(
                seat = posting.seat,
                amount = posting.amount,
                kind = ?posting.kind,
                "blind posted"
            );
        }
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        let order = self.turn.get_deal_order(&self.players);
        let hands = self.deck.deal_to_players(order.len(), 2)?;
        for (seat, hand) in order.into_iter().zip(hands) {
            self.players[seat].hole_cards = Some([hand[0], hand[1]]);
        }
        Ok(())
    }

    fn record_all_in(&mut self, seat: usize) {
        let committed = self.pots.contributions().get(&seat).copied().unwrap_or(0);
        self.all_in_amounts.entry(seat).or_insert(committed);
    }

    pub fn apply_action(
        &mut self,
        seat: usize,
        kind: ActionKind,
        amount: Option<u32>,
    ) -> Result<Action, GameError> {
        self.apply_action_at(seat, kind, amount, None)
    }

    /// [`apply_action`](Self::apply_action) with a caller-supplied timestamp
    /// stored on the logged action.
    pub fn apply_action_at(
        &mut self,
        seat: usize,
        kind: ActionKind,
        amount: Option<u32>,
        timestamp: Option<DateTime<Utc>>,
    ) -> Result<Action, GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::InvalidPhase(self.phase));
        }
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::UnknownSeat(seat))?;
        let action = self.betting.apply_action(player, kind, amount, timestamp)?;
        let went_all_in = player.all_in;

        if let Some(moved) = action.amount.filter(|a| *a > 0) {
            self.pots.add_bet(seat, moved);
        }
        if went_all_in {
            self.record_all_in(seat);
        }
        if kind == ActionKind::Fold {
            self.pots.remove_eligible(seat);
        }
        self.hand_actions.push(action.clone());
        Ok(action)
    }

    /// Closes the current street: clears round bets, rebuilds side pots and
    /// deals the next street (or moves to showdown after the river).
    pub fn advance_phase(&mut self) -> Result<Phase, GameError> {
        let (next, deal) = match self.phase {
            Phase::PreFlop => (Phase::Flop, 3),
            Phase::Flop => (Phase::Turn, 1),
            Phase::Turn => (Phase::River, 1),
            Phase::River => (Phase::Showdown, 0),
            phase => {
                tracing::warn!(%phase, "cannot advance phase");
                return Err(GameError::InvalidPhase(phase));
            }
        };
        let cards = if deal > 0 {
            self.deck.deal_community(deal, true)?
        } else {
            Vec::new()
        };

        for p in self.players.iter_mut() {
            p.reset_for_round();
        }
        self.recalculate_side_pots();

        self.phase = next;
        self.community_cards.extend(cards);
        if next.is_betting() {
            self.betting.open_round(0, self.blinds.big_blind());
        }
        tracing::info!(phase = %next, board = self.community_cards.len(), "phase advanced");
        Ok(next)
    }

    fn active_seats(&self) -> Vec<usize> {
        self.players
            .iter()
            .filter(|p| p.is_active())
            .map(|p| p.seat)
            .collect()
    }

    fn recalculate_side_pots(&mut self) {
        let active = self.active_seats();
        self.pots.calculate_side_pots(&self.all_in_amounts, &active);
    }

    /// Ranks every contesting hand, awards each pot to the best hands among
    /// its eligible seats and credits the stacks.
    ///
    /// Only valid once the river is out, and only once per hand.
    pub fn run_showdown(&mut self) -> Result<ShowdownResult, GameError> {
        if !matches!(self.phase, Phase::River | Phase::Showdown) || self.showdown_result.is_some() {
            return Err(GameError::InvalidPhase(self.phase));
        }

        let hands: Vec<(usize, [Card; 2])> = self
            .players
            .iter()
            .filter(|p| p.is_active())
            .filter_map(|p| p.hole_cards.map(|h| (p.seat, h)))
            .collect();
        if hands.is_empty() {
            tracing::warn!(hand = self.hand_number, "no players with hole cards at showdown");
            return Err(GameError::NoShowdownHands);
        }
        let (winners, hand_results) = determine_winners(&hands, &self.community_cards)?;

        self.phase = Phase::Showdown;
        self.recalculate_side_pots();

        let mut winners_per_pot = Vec::with_capacity(self.pots.pots().len());
        let mut pot_distributions = Vec::with_capacity(self.pots.pots().len());
        for (pot_index, pot) in self.pots.pots().iter().enumerate() {
            let eligible: Vec<_> = hand_results
                .iter()
                .filter(|r| pot.eligible_players.contains(&r.seat))
                .collect();
            let pot_winners: Vec<usize> = match eligible.first() {
                Some(best) => eligible
                    .iter()
                    .take_while(|r| r.score == best.score)
                    .map(|r| r.seat)
                    .collect(),
                None => winners.clone(),
            };
            pot_distributions.push(PotDistribution {
                pot_index,
                amount: pot.amount,
                eligible_players: pot.eligible_players.clone(),
                winners: pot_winners.clone(),
            });
            winners_per_pot.push(pot_winners);
        }

        let winnings = self.pots.distribute(&winners_per_pot)?;
        self.credit(&winnings);

        let result = ShowdownResult {
            winners,
            hand_results,
            pot_distributions,
        };
        tracing::info!(
            hand = self.hand_number,
            winners = ?result.winners,
            winnings = ?winnings,
            "showdown complete"
        );
        self.showdown_result = Some(result.clone());
        Ok(result)
    }

    /// Gives every pot to the one seat that has not folded.
    pub fn award_pot_to_last_player(&mut self) -> Result<usize, GameError> {
        let active = self.active_seats();
        let [seat] = active.as_slice() else {
            return Err(GameError::ExpectedSingleActivePlayer {
                found: active.len(),
            });
        };
        let seat = *seat;
        let winnings = self.pots.distribute_simple(&[seat])?;
        self.credit(&winnings);
        self.phase = Phase::BetweenHands;
        tracing::info!(
            hand = self.hand_number,
            seat,
            amount = winnings.get(&seat).copied().unwrap_or(0),
            "all others folded"
        );
        Ok(seat)
    }

    fn credit(&mut self, winnings: &BTreeMap<usize, u32>) {
        for (&seat, &amount) in winnings {
            self.players[seat].chips += amount;
        }
    }

    /// Returns to `BetweenHands`, eliminates busted seats and counts the
    /// hand towards the blind schedule. Returns the newly eliminated seats.
    pub fn end_hand(&mut self) -> Result<Vec<usize>, GameError> {
        let left = self.pots.total();
        if left > 0 {
            return Err(GameError::PotNotAwarded { amount: left });
        }
        self.phase = Phase::BetweenHands;

        let mut eliminated = Vec::new();
        for p in self.players.iter_mut() {
            if p.chips == 0 && !p.eliminated {
                p.eliminated = true;
                p.hole_cards = None;
                p.all_in = false;
                eliminated.push(p.seat);
                tracing::info!(
                    seat = p.seat,
                    name = %p.name,
                    hand = self.hand_number,
                    "player eliminated"
                );
            }
        }
        self.blinds.advance_hand();
        Ok(eliminated)
    }

    // ─── Queries ──────────────────────────────────────────

    /// Seats not yet eliminated.
    pub fn active_player_count(&self) -> usize {
        self.players.iter().filter(|p| !p.eliminated).count()
    }

    pub fn is_tournament_over(&self) -> bool {
        self.active_player_count() <= 1
    }

    pub fn get_winner(&self) -> Option<&PlayerState> {
        if !self.is_tournament_over() {
            return None;
        }
        self.players.iter().find(|p| !p.eliminated)
    }

    pub fn get_preflop_order(&self) -> Vec<usize> {
        let (_, bb_seat) = self.turn.get_blind_positions(&self.players);
        self.turn.get_preflop_order(&self.players, bb_seat)
    }

    pub fn get_postflop_order(&self) -> Vec<usize> {
        self.turn.get_postflop_order(&self.players)
    }

    /// Acting order for the street in progress.
    pub fn get_current_order(&self) -> Vec<usize> {
        match self.phase {
            Phase::PreFlop => self.get_preflop_order(),
            phase if phase.is_betting() => self.get_postflop_order(),
            _ => Vec::new(),
        }
    }

    pub fn get_next_player(&self, current: usize) -> Option<usize> {
        self.turn.get_next_player(current, &self.players)
    }

    pub fn is_betting_round_complete(&self) -> bool {
        self.betting.is_round_complete(&self.players)
    }

    pub fn is_betting_round_settled(&self) -> bool {
        self.betting.is_round_settled(&self.players)
    }

    pub fn should_skip_to_showdown(&self) -> bool {
        self.betting.should_skip_to_showdown(&self.players)
    }

    /// At most one seat is still contesting the hand.
    pub fn is_hand_over(&self) -> bool {
        self.betting.is_hand_over(&self.players)
    }

    // ─── Per-seat decision support ────────────────────────

    pub fn needs_action(&self, seat: usize) -> Result<bool, GameError> {
        let player = self.player(seat)?;
        Ok(self.phase.is_betting() && self.betting.needs_action(player))
    }

    pub fn get_valid_actions(&self, seat: usize) -> Result<Vec<ActionKind>, GameError> {
        let player = self.player(seat)?;
        if !self.phase.is_betting() {
            return Ok(Vec::new());
        }
        Ok(self.betting.get_valid_actions(player))
    }

    pub fn get_call_amount(&self, seat: usize) -> Result<u32, GameError> {
        Ok(self.betting.get_call_amount(self.player(seat)?))
    }

    pub fn get_min_raise_to(&self, seat: usize) -> Result<u32, GameError> {
        Ok(self.betting.get_min_raise_to(self.player(seat)?))
    }

    pub fn get_max_raise_to(&self, seat: usize) -> Result<u32, GameError> {
        Ok(self.betting.get_max_raise_to(self.player(seat)?))
    }
}
