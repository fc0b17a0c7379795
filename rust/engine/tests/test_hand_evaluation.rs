use holdem_engine::cards::{parse_cards, Card};
use holdem_engine::errors::EvalError;
use holdem_engine::hand::{compare_hands, determine_winners, evaluate, Category};

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("valid card list")
}

fn hole(s: &str) -> [Card; 2] {
    let v = cards(s);
    [v[0], v[1]]
}

#[test]
fn every_category_is_recognized_and_ordered() {
    let cases = [
        ("Ah Kh", "Qh Jh Th 2c 3d", Category::RoyalFlush),
        ("9h 8h", "7h 6h 5h 2c 3d", Category::StraightFlush),
        ("Ac Ad", "Ah As 5h 2c 3d", Category::FourOfAKind),
        ("Kc Kd", "Kh 7s 7h 2c 3d", Category::FullHouse),
        ("Ah 9h", "5h 3h 2h Kc Qd", Category::Flush),
        ("9c 8d", "7h 6s 5h Kc 2d", Category::Straight),
        ("Qc Qd", "Qh 7s 5h 2c 3d", Category::ThreeOfAKind),
        ("Kc Kd", "7h 7s 5h 2c 3d", Category::TwoPair),
        ("6c 6d", "Ah 9s 5h 2c 3d", Category::OnePair),
        ("Ac Jd", "9h 7s 5h 2c 3d", Category::HighCard),
    ];
    let strengths: Vec<_> = cases
        .iter()
        .map(|(h, b, cat)| {
            let s = evaluate(&cards(h), &cards(b)).unwrap();
            assert_eq!(s.category, *cat, "{h} on {b}");
            s
        })
        .collect();
    for pair in strengths.windows(2) {
        assert!(pair[0].score() > pair[1].score(), "{:?} vs {:?}", pair[0], pair[1]);
    }
}

#[test]
fn descriptions_name_the_deciding_ranks() {
    let d = |h: &str, b: &str| evaluate(&cards(h), &cards(b)).unwrap().description();
    assert_eq!(d("Ah Kh", "Qh Jh Th 2c 3d"), "Royal Flush");
    assert_eq!(d("9c 8d", "7h 6s 5h Kc 2d"), "Straight, Nine high");
    assert_eq!(d("Kc Kd", "Kh 7s 7h 2c 3d"), "Full House, Kings full of Sevens");
    assert_eq!(d("Kc Kd", "7h 7s 5h 2c 3d"), "Two Pair, Kings and Sevens");
    assert_eq!(d("6c 6d", "Ah 9s 5h 2c 3d"), "Pair, Sixes");
    assert_eq!(d("Ac Jd", "9h 7s 5h 2c 3d"), "High Card, Ace");
    assert_eq!(d("Ah 9h", "5h 3h 2h Kc Qd"), "Flush, Ace high");
}

#[test]
fn wheel_loses_to_six_high_straight() {
    let wheel = evaluate(&cards("Ac 2d"), &cards("3h 4s 5h Kc Kd")).unwrap();
    let six = evaluate(&cards("6c 2d"), &cards("3h 4s 5h Kc Qd")).unwrap();
    assert_eq!(wheel.category, Category::Straight);
    assert_eq!(wheel.description(), "Straight, Five high");
    assert!(six > wheel);
}

#[test]
fn kickers_break_ties_within_a_category() {
    let board = cards("Ah 9s 5h 2c 3d");
    let ace_king = evaluate(&cards("Ac Kd"), &board).unwrap();
    let ace_queen = evaluate(&cards("As Qd"), &board).unwrap();
    assert_eq!(ace_king.category, Category::OnePair);
    assert!(ace_king.score() > ace_queen.score());
}

#[test]
fn works_with_flop_and_turn_boards() {
    let flop = evaluate(&cards("Ac Ad"), &cards("Ah 7s 2c")).unwrap();
    assert_eq!(flop.category, Category::ThreeOfAKind);
    let turn = evaluate(&cards("Ac Ad"), &cards("Ah 7s 2c 7d")).unwrap();
    assert_eq!(turn.category, Category::FullHouse);
}

#[test]
fn invalid_inputs_are_rejected() {
    assert_eq!(
        evaluate(&cards("Ac"), &cards("Ah 7s 2c")),
        Err(EvalError::HoleCards { count: 1 })
    );
    assert_eq!(
        evaluate(&cards("Ac Kd"), &cards("Ah 7s")),
        Err(EvalError::BoardCards { count: 2 })
    );
    assert_eq!(
        evaluate(&cards("Ac Kd"), &cards("Ah 7s 2c 3d 4h 5h")),
        Err(EvalError::BoardCards { count: 6 })
    );
    assert_eq!(
        evaluate(&cards("Ac Kd"), &cards("Ac 7s 2c")),
        Err(EvalError::DuplicateCard)
    );
}

#[test]
fn board_plays_for_a_split() {
    let board = cards("Ah Kh Qd Js Tc");
    let hands = [(0, hole("2c 3d")), (1, hole("4c 5d")), (2, hole("6c 7d"))];
    let (winners, results) = determine_winners(&hands, &board).unwrap();
    assert_eq!(winners, vec![0, 1, 2]);
    assert!(results.iter().all(|r| r.category == Category::Straight));
}

#[test]
fn compare_hands_sorts_best_first_then_by_seat() {
    let board = cards("Ah 9s 5h 2c 3d");
    let hands = [
        (0, hole("Kc Qd")),
        (1, hole("Ac Kd")),
        (2, hole("9c 9d")),
        (3, hole("Ad Ks")),
    ];
    let results = compare_hands(&hands, &board).unwrap();
    let seats: Vec<usize> = results.iter().map(|r| r.seat).collect();
    assert_eq!(seats, vec![2, 1, 3, 0]);
    assert_eq!(results[0].name, "Three of a Kind");
    assert_eq!(results[1].score, results[2].score);
}
