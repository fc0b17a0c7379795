//! # holdem-engine: No-Limit Texas Hold'em Tournament Core
//!
//! A deterministic, synchronous engine for multi-seat tournament play. It
//! owns the table, enforces betting legality, builds side pots, evaluates
//! showdowns and escalates blinds. Waiting on agents, timeouts and
//! persistence are left to the caller.
//!
//! ## Core Modules
//!
//! - [`cards`] - Card representation (Suit, Rank, Card) and parsing
//! - [`deck`] - Seeded deck with ChaCha20 shuffling and burn/deal
//! - [`hand`] - Hand evaluation and showdown ranking
//! - [`player`] - Player state and the action log entry
//! - [`rules`] - Betting round validation and bookkeeping
//! - [`pot`] - Main/side pot construction and distribution
//! - [`turn`] - Dealer button and acting order
//! - [`blinds`] - Blind schedule
//! - [`game`] - Phases and the serializable state snapshot
//! - [`engine`] - Hand lifecycle state machine
//! - [`tournament`] - Multi-hand tournament tracking
//! - [`config`] - TOML/environment configuration
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use holdem_engine::cards::parse_cards;
//! use holdem_engine::hand::{evaluate, Category};
//!
//! let hole = parse_cards("Ah Kh").unwrap();
//! let board = parse_cards("Qh Jh Th 2c 3d").unwrap();
//! let strength = evaluate(&hole, &board).unwrap();
//! assert_eq!(strength.category, Category::RoyalFlush);
//! ```
//!
//! ## Deterministic Gameplay
//!
//! All outcomes are reproducible from a seed:
//!
//! ```rust
//! use holdem_engine::deck::Deck;
//!
//! let mut deck1 = Deck::new_with_seed(42);
//! let mut deck2 = Deck::new_with_seed(42);
//! deck1.shuffle();
//! deck2.shuffle();
//! assert_eq!(deck1.deal(5).unwrap(), deck2.deal(5).unwrap());
//! ```

pub mod blinds;
pub mod cards;
pub mod config;
pub mod deck;
pub mod engine;
pub mod errors;
pub mod game;
pub mod hand;
pub mod player;
pub mod pot;
pub mod rules;
pub mod tournament;
pub mod turn;
