//! Rule-based agent for filling seats in simulations.
//!
//! Rates the hand on a 0-10 scale (starting-hand table pre-flop, made-hand
//! category after), then bets, calls or folds based on that rating and the
//! price of calling.

use holdem_engine::cards::Card;
use holdem_engine::engine::GameEngine;
use holdem_engine::game::Phase;
use holdem_engine::hand::{Category, evaluate};
use holdem_engine::player::ActionKind;

use crate::{Decision, SeatAgent};

/// Deterministic rule-based agent.
///
/// **Pre-flop:** premium pairs and big aces raise, medium hands call when
/// the price is right, weak hands check or fold.
///
/// **Post-flop:** two pair or better bets and calls, one pair calls small
/// bets, the rest checks or folds.
#[derive(Debug, Clone, Default)]
pub struct BaselineAgent;

/// What the seat is looking at when it decides.
#[derive(Debug, Clone, Copy)]
struct Spot {
    to_call: u32,
    stack: u32,
    min_raise_to: u32,
    max_raise_to: u32,
    current_bet: u32,
    pot: u32,
    can_raise: bool,
}

impl BaselineAgent {
    pub fn new() -> Self {
        Self
    }

    /// Starting-hand rating:
    /// - 9-10: AA, KK, QQ, JJ, AKs
    /// - 7-8: TT-99, AK, AQ, KQs
    /// - 5-6: 88-77, AJ, suited broadway, high suited connectors
    /// - 3-4: small pairs, weak aces, suited connectors
    /// - 0-2: everything else
    fn preflop_strength(hole: [Card; 2]) -> u8 {
        let r1 = hole[0].rank as u8;
        let r2 = hole[1].rank as u8;
        let (high, low) = if r1 > r2 { (r1, r2) } else { (r2, r1) };
        let suited = hole[0].suit == hole[1].suit;
        let pick = |s: u8, o: u8| if suited { s } else { o };

        if r1 == r2 {
            return match high {
                13..=14 => 10,
                11..=12 => 9,
                10 => 8,
                9 => 7,
                8 => 6,
                7 => 5,
                _ => 4,
            };
        }

        match (high, low) {
            (14, 13) => pick(10, 8),
            (14, 12) => pick(8, 7),
            (14, 11) => pick(7, 6),
            (14, 10) => pick(6, 5),
            (14, _) => pick(5, 4),
            (13, 12) => pick(7, 6),
            (13, 11) => pick(6, 5),
            (13, 10) | (12, 10) => pick(5, 4),
            (12, 11) => pick(6, 5),
            _ if suited && high - low <= 2 => {
                if high >= 9 {
                    5
                } else {
                    4
                }
            }
            _ if high >= 11 && low >= 9 => 4,
            _ => 2,
        }
    }

    /// Made-hand rating against a 3-5 card board. `None` before the flop.
    fn postflop_strength(hole: [Card; 2], board: &[Card]) -> Option<u8> {
        let strength = evaluate(&hole, board).ok()?;
        let base = match strength.category {
            Category::HighCard => 1,
            Category::OnePair => 3,
            Category::TwoPair => 5,
            Category::ThreeOfAKind => 6,
            Category::Straight => 7,
            Category::Flush => 8,
            Category::FullHouse => 9,
            Category::FourOfAKind | Category::StraightFlush | Category::RoyalFlush => 10,
        };
        // queen-or-better top rank
        let kicker = u8::from(strength.kickers[0] >= 12);
        Some((base + kicker).min(10))
    }

    /// Fraction of the final pot the call buys: pot / (pot + call).
    fn pot_odds(pot: u32, to_call: u32) -> f32 {
        if to_call == 0 {
            return 1.0;
        }
        pot as f32 / (pot + to_call) as f32
    }

    /// Raise-to total of roughly `fraction` of the pot on top of the
    /// current bet, kept within the legal range.
    fn sized_raise(spot: Spot, numerator: u32, denominator: u32) -> u32 {
        let target = spot.current_bet + spot.pot * numerator / denominator;
        target.max(spot.min_raise_to).min(spot.max_raise_to)
    }

    fn decide_spot(strength: u8, spot: Spot) -> Decision {
        if spot.to_call == 0 {
            return match strength {
                9..=10 if spot.can_raise => Decision::raise_to(Self::sized_raise(spot, 2, 3)),
                7..=8 if spot.can_raise => Decision::raise_to(Self::sized_raise(spot, 1, 2)),
                _ => Decision::check(),
            };
        }

        // calling puts the whole stack in
        if spot.to_call >= spot.stack {
            return if strength >= 7 {
                Decision::call()
            } else {
                Decision::fold()
            };
        }

        let odds = Self::pot_odds(spot.pot, spot.to_call);
        match strength {
            9..=10 if spot.can_raise => Decision::raise_to(Self::sized_raise(spot, 1, 2)),
            7..=10 => Decision::call(),
            5..=6 if odds >= 0.3 || spot.to_call <= spot.pot / 4 => Decision::call(),
            3..=4 if odds >= 0.4 || spot.to_call <= spot.pot / 6 => Decision::call(),
            _ => Decision::fold(),
        }
    }
}

impl SeatAgent for BaselineAgent {
    fn decide(&mut self, engine: &GameEngine, seat: usize) -> Decision {
        let (Ok(player), Ok(valid)) = (engine.player(seat), engine.get_valid_actions(seat)) else {
            return Decision::fold();
        };
        let to_call = engine.get_call_amount(seat).unwrap_or(0);
        let Some(hole) = player.hole_cards else {
            return if to_call == 0 {
                Decision::check()
            } else {
                Decision::fold()
            };
        };

        let strength = match engine.phase() {
            Phase::PreFlop => Self::preflop_strength(hole),
            _ => Self::postflop_strength(hole, engine.community_cards())
                .unwrap_or_else(|| Self::preflop_strength(hole)),
        };
        let spot = Spot {
            to_call,
            stack: player.chips,
            min_raise_to: engine.get_min_raise_to(seat).unwrap_or(0),
            max_raise_to: engine.get_max_raise_to(seat).unwrap_or(0),
            current_bet: engine.betting_manager().current_bet(),
            pot: engine.pot_manager().total(),
            can_raise: valid.contains(&ActionKind::Raise),
        };
        Self::decide_spot(strength, spot)
    }

    fn name(&self) -> &str {
        "BaselineAgent"
    }
}
