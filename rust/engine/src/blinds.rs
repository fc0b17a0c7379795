use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// One rung of the blind ladder.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindLevel {
    pub small_blind: u32,
    pub big_blind: u32,
}

impl BlindLevel {
    pub const fn new(small_blind: u32, big_blind: u32) -> Self {
        Self {
            small_blind,
            big_blind,
        }
    }
}

/// Default ladder; blinds roughly double each level.
pub const DEFAULT_BLIND_LEVELS: [BlindLevel; 8] = [
    BlindLevel::new(10, 20),
    BlindLevel::new(20, 40),
    BlindLevel::new(40, 80),
    BlindLevel::new(75, 150),
    BlindLevel::new(150, 300),
    BlindLevel::new(300, 600),
    BlindLevel::new(500, 1000),
    BlindLevel::new(1000, 2000),
];

pub const DEFAULT_HANDS_PER_LEVEL: u32 = 10;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlindKind {
    SmallBlind,
    BigBlind,
}

/// A forced bet to post at the start of a hand.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlindPosting {
    pub seat: usize,
    pub amount: u32,
    pub kind: BlindKind,
}

/// Blind schedule and the per-level hand counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlindManager {
    levels: Vec<BlindLevel>,
    hands_per_level: u32,
    current_level: usize,
    hands_at_current_level: u32,
}

impl Default for BlindManager {
    fn default() -> Self {
        Self {
            levels: DEFAULT_BLIND_LEVELS.to_vec(),
            hands_per_level: DEFAULT_HANDS_PER_LEVEL,
            current_level: 0,
            hands_at_current_level: 0,
        }
    }
}

impl BlindManager {
    pub fn new(levels: Vec<BlindLevel>, hands_per_level: u32) -> Result<Self, ConfigError> {
        validate_levels(&levels)?;
        if hands_per_level == 0 {
            return Err(ConfigError::Invalid("hands_per_level must be >= 1".into()));
        }
        Ok(Self {
            levels,
            hands_per_level,
            current_level: 0,
            hands_at_current_level: 0,
        })
    }

    fn level(&self) -> BlindLevel {
        self.levels[self.current_level]
    }

    pub fn small_blind(&self) -> u32 {
        self.level().small_blind
    }

    pub fn big_blind(&self) -> u32 {
        self.level().big_blind
    }

    /// 0-based index into the schedule.
    pub fn current_level(&self) -> usize {
        self.current_level
    }

    pub fn hands_at_current_level(&self) -> u32 {
        self.hands_at_current_level
    }

    pub fn hands_per_level(&self) -> u32 {
        self.hands_per_level
    }

    /// `None` once the final level is reached.
    pub fn hands_until_increase(&self) -> Option<u32> {
        if self.is_max_level() {
            None
        } else {
            Some(self.hands_per_level - self.hands_at_current_level)
        }
    }

    pub fn is_max_level(&self) -> bool {
        self.current_level + 1 >= self.levels.len()
    }

    pub fn next_level(&self) -> Option<BlindLevel> {
        self.levels.get(self.current_level + 1).copied()
    }

    pub fn levels(&self) -> &[BlindLevel] {
        &self.levels
    }

    /// Counts a finished hand. Returns `true` when the blinds went up.
    pub fn advance_hand(&mut self) -> bool {
        self.hands_at_current_level += 1;
        if self.hands_at_current_level < self.hands_per_level || self.is_max_level() {
            return false;
        }
        self.current_level += 1;
        self.hands_at_current_level = 0;
        tracing::info!(
            level = self.current_level,
            small_blind = self.small_blind(),
            big_blind = self.big_blind(),
            "blinds increased"
        );
        true
    }

    /// Blinds to post, each clipped to the poster's stack. A seat with no
    /// chips posts nothing.
    pub fn get_blind_posting(
        &self,
        sb_seat: usize,
        bb_seat: usize,
        sb_stack: u32,
        bb_stack: u32,
    ) -> Vec<BlindPosting> {
        [
            (sb_seat, self.small_blind().min(sb_stack), BlindKind::SmallBlind),
            (bb_seat, self.big_blind().min(bb_stack), BlindKind::BigBlind),
        ]
        .into_iter()
        .filter(|(_, amount, _)| *amount > 0)
        .map(|(seat, amount, kind)| BlindPosting { seat, amount, kind })
        .collect()
    }
}

pub(crate) fn validate_levels(levels: &[BlindLevel]) -> Result<(), ConfigError> {
    if levels.is_empty() {
        return Err(ConfigError::Invalid("blind schedule is empty".into()));
    }
    for (i, l) in levels.iter().enumerate() {
        if l.small_blind == 0 || l.big_blind <= l.small_blind {
            return Err(ConfigError::Invalid(format!(
                "blind level {}: expected 0 < small ({}) < big ({})",
                i + 1,
                l.small_blind,
                l.big_blind
            )));
        }
    }
    if levels.windows(2).any(|w| w[1].big_blind < w[0].big_blind) {
        return Err(ConfigError::Invalid(
            "big blinds must not decrease between levels".into(),
        ));
    }
    Ok(())
}
