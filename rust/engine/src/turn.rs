use std::collections::BTreeSet;

use crate::player::PlayerState;

/// Dealer button and seat ordering.
///
/// Seats are visited clockwise as increasing indices modulo the table size.
#[derive(Debug, Clone)]
pub struct TurnManager {
    num_seats: usize,
    dealer_position: usize,
}

impl TurnManager {
    pub fn new(num_seats: usize) -> Self {
        Self {
            num_seats,
            dealer_position: 0,
        }
    }

    pub fn dealer_position(&self) -> usize {
        self.dealer_position
    }

    pub fn set_dealer_position(&mut self, seat: usize) {
        self.dealer_position = seat;
    }

    /// Moves the button to the next non-eliminated seat. Stays put when
    /// every seat is eliminated.
    pub fn advance_dealer(&mut self, players: &[PlayerState]) -> usize {
        let seated = Self::seated(players);
        if let Some(next) = self.next_in(self.dealer_position, &seated) {
            self.dealer_position = next;
            tracing::debug!(seat = next, "dealer button moved");
        }
        self.dealer_position
    }

    /// `(small_blind_seat, big_blind_seat)`. Heads-up the dealer posts the
    /// small blind; otherwise the two seats after the button post.
    pub fn get_blind_positions(&self, players: &[PlayerState]) -> (usize, usize) {
        let seated = Self::seated(players);
        let sb = if seated.len() == 2 {
            self.dealer_position
        } else {
            self.next_in(self.dealer_position, &seated)
                .unwrap_or(self.dealer_position)
        };
        let bb = self.next_in(sb, &seated).unwrap_or(sb);
        (sb, bb)
    }

    /// Clockwise from the seat after the big blind; the big blind closes the
    /// order when it can still act.
    pub fn get_preflop_order(&self, players: &[PlayerState], bb_seat: usize) -> Vec<usize> {
        let actionable = Self::actionable(players);
        let mut order: Vec<usize> = self
            .clockwise_from(bb_seat)
            .filter(|s| *s != bb_seat && actionable.contains(s))
            .collect();
        if actionable.contains(&bb_seat) {
            order.push(bb_seat);
        }
        order
    }

    /// Clockwise from the seat after the button (heads-up: the non-dealer
    /// first, the dealer last).
    pub fn get_postflop_order(&self, players: &[PlayerState]) -> Vec<usize> {
        let actionable = Self::actionable(players);
        self.clockwise_from(self.dealer_position)
            .filter(|s| actionable.contains(s))
            .collect()
    }

    /// Non-eliminated seats clockwise from the seat after the button, the
    /// order hole cards are pitched in.
    pub fn get_deal_order(&self, players: &[PlayerState]) -> Vec<usize> {
        let seated = Self::seated(players);
        self.clockwise_from(self.dealer_position)
            .filter(|s| seated.contains(s))
            .collect()
    }

    /// Next seat after `current` that can still act, never `current` itself.
    pub fn get_next_player(&self, current: usize, players: &[PlayerState]) -> Option<usize> {
        let actionable = Self::actionable(players);
        self.clockwise_from(current)
            .find(|s| *s != current && actionable.contains(s))
    }

    /// Every seat once, starting after `from` and ending on `from`.
    fn clockwise_from(&self, from: usize) -> impl Iterator<Item = usize> + '_ {
        (1..=self.num_seats).map(move |step| (from + step) % self.num_seats)
    }

    fn next_in(&self, from: usize, seats: &BTreeSet<usize>) -> Option<usize> {
        self.clockwise_from(from).find(|s| seats.contains(s))
    }

    fn seated(players: &[PlayerState]) -> BTreeSet<usize> {
        players
            .iter()
            .filter(|p| !p.eliminated)
            .map(|p| p.seat)
            .collect()
    }

    fn actionable(players: &[PlayerState]) -> BTreeSet<usize> {
        players.iter().filter(|p| p.can_act()).map(|p| p.seat).collect()
    }
}
