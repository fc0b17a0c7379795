use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::DeckError;

/// A 52-card deck with a dealt-count cursor.
///
/// Cards before the cursor have been dealt (or burned); only the undealt
/// suffix is ever shuffled. The generator is created once per deck, so a
/// deck built from a seed yields the same sequence of permutations across
/// any number of `reset` + `shuffle` cycles.
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::new_with_seed(s),
            None => {
                let mut thread = rand::rng();
                Self::with_rng(ChaCha20Rng::from_rng(&mut thread))
            }
        }
    }

    pub fn new_with_seed(seed: u64) -> Self {
        Self::with_rng(ChaCha20Rng::seed_from_u64(seed))
    }

    fn with_rng(rng: ChaCha20Rng) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            position: 0,
            rng,
        }
    }

    /// Shuffles the undealt cards in place.
    pub fn shuffle(&mut self) {
        let position = self.position;
        self.cards[position..].shuffle(&mut self.rng);
        tracing::debug!(remaining = self.remaining(), "deck shuffled");
    }

    /// Restores the full ordered deck. The generator keeps its state.
    pub fn reset(&mut self) {
        self.cards = full_deck();
        self.position = 0;
    }

    pub fn remaining(&self) -> usize {
        self.cards.len().saturating_sub(self.position)
    }

    pub fn dealt_count(&self) -> usize {
        self.position
    }

    /// All 52 cards, dealt and undealt.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn deal(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        let cards = self.peek(count)?.to_vec();
        self.position += count;
        tracing::debug!(count, remaining = self.remaining(), "dealt cards");
        Ok(cards)
    }

    pub fn deal_one(&mut self) -> Result<Card, DeckError> {
        let c = *self
            .cards
            .get(self.position)
            .ok_or(DeckError::Exhausted {
                requested: 1,
                remaining: 0,
            })?;
        self.position += 1;
        Ok(c)
    }

    pub fn burn(&mut self) -> Result<Card, DeckError> {
        self.deal_one()
    }

    /// Deals `per_player` cards to each of `players` seats, one card per seat
    /// per pass, the way a dealer pitches around the table.
    pub fn deal_to_players(
        &mut self,
        players: usize,
        per_player: usize,
    ) -> Result<Vec<Vec<Card>>, DeckError> {
        if players == 0 || per_player == 0 {
            return Err(DeckError::InvalidCount {
                count: players.min(per_player),
            });
        }
        let needed = players * per_player;
        if needed > self.remaining() {
            return Err(DeckError::Exhausted {
                requested: needed,
                remaining: self.remaining(),
            });
        }
        let mut hands: Vec<Vec<Card>> = vec![Vec::with_capacity(per_player); players];
        for _ in 0..per_player {
            for hand in hands.iter_mut() {
                hand.push(self.deal_one()?);
            }
        }
        Ok(hands)
    }

    /// Burns one card first when `burn` is set, then deals `count`.
    pub fn deal_community(&mut self, count: usize, burn: bool) -> Result<Vec<Card>, DeckError> {
        let needed = count + usize::from(burn);
        if count == 0 {
            return Err(DeckError::InvalidCount { count });
        }
        if needed > self.remaining() {
            return Err(DeckError::Exhausted {
                requested: needed,
                remaining: self.remaining(),
            });
        }
        if burn {
            self.burn()?;
        }
        self.deal(count)
    }

    pub fn peek(&self, count: usize) -> Result<&[Card], DeckError> {
        if count == 0 {
            return Err(DeckError::InvalidCount { count });
        }
        if count > self.remaining() {
            return Err(DeckError::Exhausted {
                requested: count,
                remaining: self.remaining(),
            });
        }
        Ok(&self.cards[self.position..self.position + count])
    }
}
