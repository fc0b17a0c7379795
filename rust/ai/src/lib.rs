//! # holdem-ai: Automated Seats for the Hold'em Engine
//!
//! Seat agents that choose actions from the engine's per-seat decision
//! support (`get_valid_actions`, `get_call_amount`, `get_min_raise_to`,
//! `get_max_raise_to`), and a synchronous driver that plays hands and whole
//! tournaments with them.
//!
//! ## Core Components
//!
//! - [`SeatAgent`] - Trait every automated seat implements
//! - [`baseline`] - Rule-based agent driven by hand strength and price
//! - [`random`] - Seeded agent picking uniformly among legal actions
//! - [`driver`] - Table driver running betting rounds, hands and tournaments
//! - [`create_agent`] - Factory by agent name
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_ai::create_agent;
//! use holdem_ai::driver::TableDriver;
//! use holdem_engine::engine::GameEngine;
//! use holdem_engine::player::PlayerState;
//!
//! let players = vec![PlayerState::new(0, "a", 500), PlayerState::new(1, "b", 500)];
//! let mut engine = GameEngine::new(players, None, Some(42)).unwrap();
//! let agents = vec![
//!     create_agent("baseline", None).unwrap(),
//!     create_agent("random", Some(7)).unwrap(),
//! ];
//! let mut driver = TableDriver::new(agents);
//! driver.play_hand(&mut engine).unwrap();
//! assert_eq!(engine.total_chips(), 1000);
//! ```

use holdem_engine::engine::GameEngine;
use holdem_engine::player::ActionKind;

pub mod baseline;
pub mod driver;
pub mod random;

/// An agent's chosen move, in the form `GameEngine::apply_action` takes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub kind: ActionKind,
    /// Raise-to total; ignored for other kinds
    pub amount: Option<u32>,
}

impl Decision {
    pub fn fold() -> Self {
        Self {
            kind: ActionKind::Fold,
            amount: None,
        }
    }

    pub fn check() -> Self {
        Self {
            kind: ActionKind::Check,
            amount: None,
        }
    }

    pub fn call() -> Self {
        Self {
            kind: ActionKind::Call,
            amount: None,
        }
    }

    pub fn raise_to(amount: u32) -> Self {
        Self {
            kind: ActionKind::Raise,
            amount: Some(amount),
        }
    }
}

/// Decision-maker for one seat.
///
/// Called only when the seat owes an action. A decision the engine rejects is
/// replaced by a fold by the driver, so implementations need not be perfect.
///
/// # Example Implementation
///
/// ```rust
/// use holdem_ai::{Decision, SeatAgent};
/// use holdem_engine::engine::GameEngine;
///
/// struct CallingStation;
///
/// impl SeatAgent for CallingStation {
///     fn decide(&mut self, engine: &GameEngine, seat: usize) -> Decision {
///         match engine.get_call_amount(seat) {
///             Ok(0) => Decision::check(),
///             _ => Decision::call(),
///         }
///     }
///
///     fn name(&self) -> &str {
///         "CallingStation"
///     }
/// }
/// ```
pub trait SeatAgent: Send {
    fn decide(&mut self, engine: &GameEngine, seat: usize) -> Decision;

    fn name(&self) -> &str;
}

/// Builds an agent by name: `"baseline"` or `"random"` (seeded when `seed`
/// is given). Unknown names yield `None`.
///
/// ```rust
/// use holdem_ai::create_agent;
///
/// assert_eq!(create_agent("baseline", None).unwrap().name(), "BaselineAgent");
/// assert!(create_agent("oracle", None).is_none());
/// ```
pub fn create_agent(kind: &str, seed: Option<u64>) -> Option<Box<dyn SeatAgent>> {
    match kind {
        "baseline" => Some(Box::new(baseline::BaselineAgent::new())),
        "random" => Some(Box::new(random::RandomAgent::new(seed))),
        _ => None,
    }
}
