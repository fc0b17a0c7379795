use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::GameError;

/// A main or side pot and the seats that can win it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    /// Sorted seat indices
    pub eligible_players: Vec<usize>,
}

impl Pot {
    fn new(amount: u32, eligible: impl IntoIterator<Item = usize>) -> Self {
        let set: BTreeSet<usize> = eligible.into_iter().collect();
        Self {
            amount,
            eligible_players: set.into_iter().collect(),
        }
    }
}

/// Pots for the current hand plus the per-seat contribution ledger.
///
/// Between recalculations every new bet lands in the first pot; the split
/// into main and side pots is rebuilt from the ledger by
/// [`calculate_side_pots`](Self::calculate_side_pots), so the pot total
/// always equals the ledger total until the pots are distributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PotManager {
    pots: Vec<Pot>,
    contributions: BTreeMap<usize, u32>,
}

impl Default for PotManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PotManager {
    pub fn new() -> Self {
        Self {
            pots: vec![Pot::default()],
            contributions: BTreeMap::new(),
        }
    }

    pub fn pots(&self) -> &[Pot] {
        &self.pots
    }

    pub fn main_pot(&self) -> &Pot {
        &self.pots[0]
    }

    pub fn side_pots(&self) -> &[Pot] {
        &self.pots[1..]
    }

    /// Chips currently sitting in the pots.
    pub fn total(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    /// Everything wagered this hand, unaffected by distribution.
    pub fn total_contributed(&self) -> u32 {
        self.contributions.values().sum()
    }

    pub fn contributions(&self) -> &BTreeMap<usize, u32> {
        &self.contributions
    }

    pub fn add_bet(&mut self, seat: usize, amount: u32) {
        if amount == 0 {
            return;
        }
        *self.contributions.entry(seat).or_insert(0) += amount;
        let main = &mut self.pots[0];
        main.amount += amount;
        if let Err(pos) = main.eligible_players.binary_search(&seat) {
            main.eligible_players.insert(pos, seat);
        }
        tracing::debug!(seat, amount, total = self.total(), "bet added to pot");
    }

    /// Drops a folded seat from every pot's eligibility. Its chips stay in.
    pub fn remove_eligible(&mut self, seat: usize) {
        for pot in &mut self.pots {
            pot.eligible_players.retain(|&s| s != seat);
        }
    }

    /// Rebuilds the pots from the ledger. Does nothing once the pots have
    /// been distributed.
    ///
    /// `all_in_amounts` maps each all-in seat to its total commitment for the
    /// hand; `active_players` are the seats still contesting it. Each distinct
    /// all-in level closes a pot built from every active seat's contribution
    /// within that band; anything above the highest level forms a last pot for
    /// the seats that put it in. Folded seats' contributions are added to the
    /// first pot.
    pub fn calculate_side_pots(
        &mut self,
        all_in_amounts: &BTreeMap<usize, u32>,
        active_players: &[usize],
    ) {
        // drained pots stay drained
        if self.total() == 0 {
            return;
        }
        let active: BTreeSet<usize> = active_players.iter().copied().collect();
        if all_in_amounts.is_empty() {
            self.pots = vec![Pot::new(self.total(), active)];
            return;
        }
        if self.contributions.is_empty() {
            return;
        }

        let levels: BTreeSet<u32> = all_in_amounts.values().copied().collect();
        let live: Vec<(usize, u32)> = self
            .contributions
            .iter()
            .filter(|(seat, _)| active.contains(seat))
            .map(|(&seat, &c)| (seat, c))
            .collect();

        let mut pots = Vec::new();
        let mut prev = 0u32;
        for &level in &levels {
            let mut amount = 0;
            let mut eligible = Vec::new();
            for &(seat, total) in &live {
                let share = total.min(level).saturating_sub(prev);
                if share > 0 {
                    amount += share;
                    eligible.push(seat);
                }
            }
            if amount > 0 {
                pots.push(Pot::new(amount, eligible));
            }
            prev = level;
        }

        let top = prev;
        let mut excess_amount = 0;
        let mut excess_eligible = Vec::new();
        for &(seat, total) in &live {
            let excess = total.saturating_sub(top);
            if excess > 0 {
                excess_amount += excess;
                excess_eligible.push(seat);
            }
        }
        if excess_amount > 0 {
            pots.push(Pot::new(excess_amount, excess_eligible));
        }

        let folded: u32 = self
            .contributions
            .iter()
            .filter(|(seat, _)| !active.contains(seat))
            .map(|(_, &c)| c)
            .sum();
        if folded > 0 {
            match pots.first_mut() {
                Some(first) => first.amount += folded,
                None => pots.push(Pot::new(folded, active.iter().copied())),
            }
        }

        self.pots = if pots.is_empty() {
            vec![Pot::default()]
        } else {
            pots
        };
        tracing::info!(pots = self.pots.len(), total = self.total(), "side pots calculated");
    }

    /// Splits each pot evenly among its winners and empties it.
    ///
    /// Winners are taken in ascending seat order (duplicates ignored); odd
    /// chips go one at a time to the lowest seats first, so the outcome does
    /// not depend on the order the caller lists them in. A pot holding chips
    /// with no winners is an error and leaves every pot untouched.
    pub fn distribute(
        &mut self,
        winners_per_pot: &[Vec<usize>],
    ) -> Result<BTreeMap<usize, u32>, GameError> {
        for (index, pot) in self.pots.iter().enumerate() {
            let has_winner = winners_per_pot.get(index).is_some_and(|w| !w.is_empty());
            if pot.amount > 0 && !has_winner {
                return Err(GameError::UnawardedPot {
                    index,
                    amount: pot.amount,
                });
            }
        }

        let mut winnings: BTreeMap<usize, u32> = BTreeMap::new();
        for (index, pot) in self.pots.iter_mut().enumerate() {
            if pot.amount == 0 {
                continue;
            }
            let winners: BTreeSet<usize> = winners_per_pot[index].iter().copied().collect();
            let count = winners.len() as u32;
            let share = pot.amount / count;
            let remainder = pot.amount % count;
            for (j, &seat) in winners.iter().enumerate() {
                let extra = u32::from((j as u32) < remainder);
                *winnings.entry(seat).or_insert(0) += share + extra;
            }
            tracing::info!(
                pot = index,
                amount = pot.amount,
                winners = ?winners,
                "pot distributed"
            );
            pot.amount = 0;
        }
        Ok(winnings)
    }

    /// Awards every pot to the same winners.
    pub fn distribute_simple(&mut self, winners: &[usize]) -> Result<BTreeMap<usize, u32>, GameError> {
        let per_pot = vec![winners.to_vec(); self.pots.len()];
        self.distribute(&per_pot)
    }

    /// Back to a single empty pot and an empty ledger.
    pub fn reset(&mut self) {
        self.pots = vec![Pot::default()];
        self.contributions.clear();
    }
}
