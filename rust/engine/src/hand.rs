use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::{Card, Rank, Suit};
use crate::errors::EvalError;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum Category {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::HighCard => "High Card",
            Category::OnePair => "Pair",
            Category::TwoPair => "Two Pair",
            Category::ThreeOfAKind => "Three of a Kind",
            Category::Straight => "Straight",
            Category::Flush => "Flush",
            Category::FullHouse => "Full House",
            Category::FourOfAKind => "Four of a Kind",
            Category::StraightFlush => "Straight Flush",
            Category::RoyalFlush => "Royal Flush",
        }
    }
}

/// Strength of the best five-card hand. Ordering is category first, then
/// kickers high to low, so `a > b` means `a` wins.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
pub struct HandStrength {
    pub category: Category,
    // kickers: ordered high -> low for tiebreaks
    pub kickers: [u8; 5],
}

impl HandStrength {
    /// Packs the strength into one integer; higher is better and equal
    /// scores are exact ties.
    pub fn score(&self) -> u32 {
        self.kickers
            .iter()
            .fold(self.category as u32, |acc, &k| (acc << 4) | u32::from(k))
    }

    /// Category name plus the deciding ranks, e.g. "Full House, Kings full of Sevens".
    pub fn description(&self) -> String {
        let name = self.category.name();
        let k = |i: usize| Rank::from_u8(self.kickers[i]).unwrap_or(Rank::Two);
        match self.category {
            Category::RoyalFlush => name.to_string(),
            Category::StraightFlush | Category::Straight | Category::Flush => {
                format!("{}, {} high", name, k(0).name())
            }
            Category::FourOfAKind | Category::ThreeOfAKind | Category::OnePair => {
                format!("{}, {}", name, k(0).plural())
            }
            Category::FullHouse => format!("{}, {} full of {}", name, k(0).plural(), k(1).plural()),
            Category::TwoPair => format!("{}, {} and {}", name, k(0).plural(), k(1).plural()),
            Category::HighCard => format!("{}, {}", name, k(0).name()),
        }
    }
}

/// Evaluation of one seat's hand at showdown.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct HandResult {
    pub seat: usize,
    /// Packed strength, higher is better.
    pub score: u32,
    pub category: Category,
    /// Category label, e.g. "Full House".
    pub name: String,
    /// Deciding ranks, e.g. "Full House, Kings full of Sevens".
    pub description: String,
}

impl HandResult {
    pub fn new(seat: usize, strength: &HandStrength) -> Self {
        Self {
            seat,
            score: strength.score(),
            category: strength.category,
            name: strength.category.name().to_string(),
            description: strength.description(),
        }
    }
}

/// Evaluates two hole cards against a 3 to 5 card board.
pub fn evaluate(hole: &[Card], board: &[Card]) -> Result<HandStrength, EvalError> {
    if hole.len() != 2 {
        return Err(EvalError::HoleCards { count: hole.len() });
    }
    if !(3..=5).contains(&board.len()) {
        return Err(EvalError::BoardCards { count: board.len() });
    }
    let mut all = Vec::with_capacity(7);
    all.extend_from_slice(hole);
    all.extend_from_slice(board);
    let unique: HashSet<&Card> = all.iter().collect();
    if unique.len() != all.len() {
        return Err(EvalError::DuplicateCard);
    }
    Ok(evaluate_cards(&all))
}

/// Ranks every seat's hand against the same board, best first. Equal scores
/// are ordered by seat index.
pub fn compare_hands(
    hands: &[(usize, [Card; 2])],
    board: &[Card],
) -> Result<Vec<HandResult>, EvalError> {
    let mut results = hands
        .iter()
        .map(|(seat, hole)| evaluate(hole, board).map(|s| HandResult::new(*seat, &s)))
        .collect::<Result<Vec<_>, _>>()?;
    results.sort_by(|a, b| b.score.cmp(&a.score).then(a.seat.cmp(&b.seat)));
    Ok(results)
}

/// Returns the winning seats (several on a split) and all results best first.
pub fn determine_winners(
    hands: &[(usize, [Card; 2])],
    board: &[Card],
) -> Result<(Vec<usize>, Vec<HandResult>), EvalError> {
    let results = compare_hands(hands, board)?;
    let Some(best) = results.first().map(|r| r.score) else {
        return Ok((Vec::new(), results));
    };
    let winners: Vec<usize> = results
        .iter()
        .take_while(|r| r.score == best)
        .map(|r| r.seat)
        .collect();
    tracing::info!(
        winners = ?winners,
        hand = %results[0].description,
        "hand evaluation complete"
    );
    Ok((winners, results))
}

/// Best five-card strength among 5 to 7 cards. No validation is done here.
pub fn evaluate_cards(cards: &[Card]) -> HandStrength {
    // Count ranks and suits
    let mut rank_counts = [0u8; 15]; // 2..14 used
    let mut rank_mask: u16 = 0;
    let mut suit_counts = [0u8; 4];
    let mut by_suit_mask: [u16; 4] = [0; 4];
    for &c in cards.iter() {
        let r = c.rank.value();
        rank_counts[r as usize] += 1;
        rank_mask |= 1u16 << r;
        let s = suit_index(c.suit);
        suit_counts[s] += 1;
        by_suit_mask[s] |= 1u16 << r;
    }

    let flush_suit = suit_counts.iter().position(|&count| count >= 5);

    // Straight flush
    if let Some(s) = flush_suit {
        if let Some(high) = straight_high_from_mask(by_suit_mask[s]) {
            let category = if high == 14 {
                Category::RoyalFlush
            } else {
                Category::StraightFlush
            };
            return HandStrength {
                category,
                kickers: [high, 0, 0, 0, 0],
            };
        }
    }

    // Four of a kind
    if let Some((quad, kicker)) = detect_quads(&rank_counts) {
        return HandStrength {
            category: Category::FourOfAKind,
            kickers: [quad, kicker, 0, 0, 0],
        };
    }

    // Full house
    if let Some((trip, pair)) = detect_full_house(&rank_counts) {
        return HandStrength {
            category: Category::FullHouse,
            kickers: [trip, pair, 0, 0, 0],
        };
    }

    // Flush
    if let Some(s) = flush_suit {
        let mut k = [0u8; 5];
        let ranks = (2..=14u8).rev().filter(|r| by_suit_mask[s] & (1 << r) != 0);
        for (slot, r) in k.iter_mut().zip(ranks) {
            *slot = r;
        }
        return HandStrength {
            category: Category::Flush,
            kickers: k,
        };
    }

    if let Some(high) = straight_high_from_mask(rank_mask) {
        return HandStrength {
            category: Category::Straight,
            kickers: [high, 0, 0, 0, 0],
        };
    }

    // Three / Two pair / One pair / High card
    let (trips, pairs, singles) = classify_multiples(&rank_counts);
    if let Some(&t) = trips.first() {
        // trips + two highest kickers
        let mut k = [t, 0, 0, 0, 0];
        fill_kickers(&mut k[1..3], &[pairs.as_slice(), singles.as_slice()]);
        return HandStrength {
            category: Category::ThreeOfAKind,
            kickers: k,
        };
    }
    if pairs.len() >= 2 {
        let (high, low) = (pairs[0], pairs[1]);
        let mut k = [high, low, 0, 0, 0];
        // a third pair can play as the kicker
        fill_kickers(&mut k[2..3], &[&pairs[2..], singles.as_slice()]);
        return HandStrength {
            category: Category::TwoPair,
            kickers: k,
        };
    }
    if let Some(&p) = pairs.first() {
        let mut k = [p, 0, 0, 0, 0];
        fill_kickers(&mut k[1..4], &[singles.as_slice()]);
        return HandStrength {
            category: Category::OnePair,
            kickers: k,
        };
    }

    // High card: top 5 ranks
    let mut k = [0u8; 5];
    fill_kickers(&mut k, &[singles.as_slice()]);
    HandStrength {
        category: Category::HighCard,
        kickers: k,
    }
}

fn suit_index(s: Suit) -> usize {
    match s {
        Suit::Clubs => 0,
        Suit::Diamonds => 1,
        Suit::Hearts => 2,
        Suit::Spades => 3,
    }
}

/// Copies the highest ranks from `groups` into `slots`.
fn fill_kickers(slots: &mut [u8], groups: &[&[u8]]) {
    let mut pool: Vec<u8> = groups.iter().flat_map(|g| g.iter().copied()).collect();
    pool.sort_unstable_by(|a, b| b.cmp(a));
    for (slot, r) in slots.iter_mut().zip(pool) {
        *slot = r;
    }
}

fn straight_high_from_mask(mask: u16) -> Option<u8> {
    // Treat Ace as 14 and optionally as 1
    let mut m = mask;
    if (m & (1 << 14)) != 0 {
        m |= 1 << 1;
    }
    // Sliding 5-bit window from Ace(14) down to 5
    for high in (5..=14u8).rev() {
        let window = 0b1_1111u16 << (high - 4);
        if (m & window) == window {
            return Some(high);
        }
    }
    None
}

fn detect_quads(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let quad = (2..=14u8).rev().find(|&r| rank_counts[r as usize] == 4)?;
    let kicker = (2..=14u8)
        .rev()
        .find(|&r| r != quad && rank_counts[r as usize] > 0)
        .unwrap_or(0);
    Some((quad, kicker))
}

fn detect_full_house(rank_counts: &[u8; 15]) -> Option<(u8, u8)> {
    let mut trips: Vec<u8> = vec![];
    let mut pairs: Vec<u8> = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            _ => {}
        }
    }
    let &t = trips.first()?;
    // second set of trips plays as the pair when it outranks every pair
    let pair = trips
        .get(1)
        .copied()
        .into_iter()
        .chain(pairs.first().copied())
        .max()?;
    Some((t, pair))
}

/// Trips, pairs and singles, each sorted high to low.
fn classify_multiples(rank_counts: &[u8; 15]) -> (Vec<u8>, Vec<u8>, Vec<u8>) {
    let mut trips = vec![];
    let mut pairs = vec![];
    let mut singles = vec![];
    for r in (2..=14u8).rev() {
        match rank_counts[r as usize] {
            3 => trips.push(r),
            2 => pairs.push(r),
            1 => singles.push(r),
            _ => {}
        }
    }
    (trips, pairs, singles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wheel_is_five_high() {
        let mask = (1 << 14) | (1 << 2) | (1 << 3) | (1 << 4) | (1 << 5);
        assert_eq!(straight_high_from_mask(mask), Some(5));
    }

    #[test]
    fn broadway_beats_six_high_run() {
        let mask = (10..=14).fold(0u16, |m, r| m | (1 << r)) | (1 << 9);
        assert_eq!(straight_high_from_mask(mask), Some(14));
    }

    #[test]
    fn two_trips_make_full_house_with_lower_trips_as_pair() {
        let mut counts = [0u8; 15];
        counts[13] = 3;
        counts[7] = 3;
        counts[2] = 1;
        assert_eq!(detect_full_house(&counts), Some((13, 7)));
    }

    #[test]
    fn score_orders_categories_before_kickers() {
        let low_pair = HandStrength {
            category: Category::OnePair,
            kickers: [2, 5, 4, 3, 0],
        };
        let ace_high = HandStrength {
            category: Category::HighCard,
            kickers: [14, 13, 12, 11, 9],
        };
        assert!(low_pair.score() > ace_high.score());
        assert!(low_pair > ace_high);
    }
}
