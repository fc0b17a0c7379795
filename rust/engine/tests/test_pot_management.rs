use std::collections::BTreeMap;

use holdem_engine::errors::GameError;
use holdem_engine::pot::{Pot, PotManager};

fn pot(amount: u32, eligible: &[usize]) -> Pot {
    Pot {
        amount,
        eligible_players: eligible.to_vec(),
    }
}

#[test]
fn bets_accumulate_in_the_main_pot() {
    let mut pm = PotManager::new();
    pm.add_bet(2, 20);
    pm.add_bet(0, 10);
    pm.add_bet(2, 30);
    pm.add_bet(1, 0);
    assert_eq!(pm.main_pot(), &pot(60, &[0, 2]));
    assert!(pm.side_pots().is_empty());
    assert_eq!(pm.contributions().get(&2), Some(&50));
    assert_eq!(pm.total(), 60);
}

#[test]
fn three_way_all_in_builds_three_pots() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    pm.add_bet(2, 500);
    let all_ins = BTreeMap::from([(0, 100), (1, 300)]);
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);

    assert_eq!(
        pm.pots(),
        &[pot(300, &[0, 1, 2]), pot(400, &[1, 2]), pot(200, &[2])]
    );
    assert_eq!(pm.total(), 900);
}

#[test]
fn folded_contributions_go_to_the_first_pot() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    pm.add_bet(2, 300);
    pm.add_bet(3, 150); // folded
    let all_ins = BTreeMap::from([(0, 100)]);
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);

    assert_eq!(pm.pots(), &[pot(450, &[0, 1, 2]), pot(400, &[1, 2])]);
    assert_eq!(pm.total(), pm.total_contributed());
}

#[test]
fn no_all_ins_means_one_pot_for_active_seats() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 40);
    pm.add_bet(1, 40);
    pm.add_bet(2, 20);
    pm.calculate_side_pots(&BTreeMap::new(), &[0, 1]);
    assert_eq!(pm.pots(), &[pot(100, &[0, 1])]);
}

#[test]
fn recalculation_is_idempotent() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    pm.add_bet(2, 500);
    let all_ins = BTreeMap::from([(0, 100), (1, 300)]);
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);
    let first = pm.pots().to_vec();
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);
    assert_eq!(pm.pots(), first.as_slice());
}

#[test]
fn split_pot_remainder_goes_to_lowest_seat() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 34);
    pm.add_bet(1, 34);
    pm.add_bet(2, 33);

    // caller order must not matter
    let winnings = pm.distribute(&[vec![2, 0]]).unwrap();
    assert_eq!(winnings, BTreeMap::from([(0, 51), (2, 50)]));
    assert_eq!(pm.total(), 0);
    assert_eq!(pm.total_contributed(), 101);
}

#[test]
fn three_way_split_spreads_remainder_one_chip_each() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 50);
    pm.add_bet(1, 50);
    pm.add_bet(2, 50);
    pm.add_bet(3, 50);
    let winnings = pm.distribute(&[vec![3, 1, 2, 1]]).unwrap();
    assert_eq!(winnings, BTreeMap::from([(1, 67), (2, 67), (3, 66)]));
    assert_eq!(winnings.values().sum::<u32>(), 200);
}

#[test]
fn each_pot_pays_its_own_winners() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    pm.add_bet(2, 500);
    let all_ins = BTreeMap::from([(0, 100), (1, 300)]);
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);

    let winnings = pm.distribute(&[vec![0], vec![2], vec![2]]).unwrap();
    assert_eq!(winnings, BTreeMap::from([(0, 300), (2, 600)]));
    assert!(pm.pots().iter().all(|p| p.amount == 0));

    // the ledger survives distribution but must not refill the pots
    pm.calculate_side_pots(&all_ins, &[0, 1, 2]);
    assert_eq!(pm.total(), 0);
    assert_eq!(pm.total_contributed(), 900);
}

#[test]
fn pot_without_winners_is_an_error() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    let all_ins = BTreeMap::from([(0, 100)]);
    pm.calculate_side_pots(&all_ins, &[0, 1]);

    let err = pm.distribute(&[vec![0]]).unwrap_err();
    assert_eq!(err, GameError::UnawardedPot { index: 1, amount: 200 });
    // nothing paid out
    assert_eq!(pm.total(), 400);
}

#[test]
fn distribute_simple_awards_every_pot() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.add_bet(1, 300);
    let all_ins = BTreeMap::from([(0, 100)]);
    pm.calculate_side_pots(&all_ins, &[0, 1]);
    let winnings = pm.distribute_simple(&[1]).unwrap();
    assert_eq!(winnings, BTreeMap::from([(1, 400)]));
}

#[test]
fn reset_clears_pots_and_ledger() {
    let mut pm = PotManager::new();
    pm.add_bet(0, 100);
    pm.reset();
    assert_eq!(pm.pots(), &[Pot::default()]);
    assert!(pm.contributions().is_empty());
}
