use holdem_engine::player::PlayerState;
use holdem_engine::turn::TurnManager;

fn table(n: usize) -> Vec<PlayerState> {
    (0..n)
        .map(|seat| PlayerState::new(seat, format!("p{seat}"), 1000))
        .collect()
}

#[test]
fn button_skips_eliminated_seats() {
    let mut players = table(4);
    players[1].eliminated = true;
    let mut tm = TurnManager::new(4);
    assert_eq!(tm.advance_dealer(&players), 2);
    assert_eq!(tm.advance_dealer(&players), 3);
    assert_eq!(tm.advance_dealer(&players), 0);
    assert_eq!(tm.advance_dealer(&players), 2);
}

#[test]
fn button_stays_when_everyone_is_eliminated() {
    let mut players = table(3);
    for p in &mut players {
        p.eliminated = true;
    }
    let mut tm = TurnManager::new(3);
    tm.set_dealer_position(1);
    assert_eq!(tm.advance_dealer(&players), 1);
}

#[test]
fn heads_up_dealer_posts_small_blind() {
    let players = table(2);
    let mut tm = TurnManager::new(2);
    tm.set_dealer_position(1);
    assert_eq!(tm.get_blind_positions(&players), (1, 0));
}

#[test]
fn three_handed_blinds_follow_the_button() {
    let players = table(3);
    let mut tm = TurnManager::new(3);
    tm.set_dealer_position(2);
    assert_eq!(tm.get_blind_positions(&players), (0, 1));
}

#[test]
fn blinds_skip_eliminated_seats() {
    let mut players = table(5);
    players[1].eliminated = true;
    let mut tm = TurnManager::new(5);
    tm.set_dealer_position(0);
    assert_eq!(tm.get_blind_positions(&players), (2, 3));

    // down to two live seats: heads-up rules
    players[3].eliminated = true;
    players[4].eliminated = true;
    assert_eq!(tm.get_blind_positions(&players), (0, 2));
}

#[test]
fn preflop_big_blind_acts_last() {
    let players = table(4);
    let mut tm = TurnManager::new(4);
    tm.set_dealer_position(0);
    let (_, bb) = tm.get_blind_positions(&players);
    assert_eq!(bb, 2);
    assert_eq!(tm.get_preflop_order(&players, bb), vec![3, 0, 1, 2]);
}

#[test]
fn heads_up_preflop_dealer_first_postflop_dealer_last() {
    let players = table(2);
    let mut tm = TurnManager::new(2);
    tm.set_dealer_position(0);
    let (sb, bb) = tm.get_blind_positions(&players);
    assert_eq!((sb, bb), (0, 1));
    assert_eq!(tm.get_preflop_order(&players, bb), vec![0, 1]);
    assert_eq!(tm.get_postflop_order(&players), vec![1, 0]);
}

#[test]
fn orders_skip_folded_and_all_in_seats() {
    let mut players = table(4);
    players[1].folded = true;
    players[3].all_in = true;
    let mut tm = TurnManager::new(4);
    tm.set_dealer_position(3);
    assert_eq!(tm.get_postflop_order(&players), vec![0, 2]);
    assert_eq!(tm.get_next_player(0, &players), Some(2));
    assert_eq!(tm.get_next_player(2, &players), Some(0));
}

#[test]
fn next_player_is_never_the_current_seat() {
    let mut players = table(3);
    players[1].folded = true;
    players[2].folded = true;
    let tm = TurnManager::new(3);
    assert_eq!(tm.get_next_player(0, &players), None);
}

#[test]
fn deal_order_starts_left_of_the_button() {
    let mut players = table(4);
    players[0].eliminated = true;
    let mut tm = TurnManager::new(4);
    tm.set_dealer_position(2);
    assert_eq!(tm.get_deal_order(&players), vec![3, 1, 2]);
}
