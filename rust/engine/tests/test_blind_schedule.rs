use holdem_engine::blinds::{
    BlindKind, BlindLevel, BlindManager, BlindPosting, DEFAULT_BLIND_LEVELS,
};
use holdem_engine::errors::ConfigError;

#[test]
fn default_schedule_starts_at_10_20() {
    let bm = BlindManager::default();
    assert_eq!((bm.small_blind(), bm.big_blind()), (10, 20));
    assert_eq!(bm.current_level(), 0);
    assert_eq!(bm.levels(), &DEFAULT_BLIND_LEVELS);
    assert_eq!(bm.hands_until_increase(), Some(10));
    assert_eq!(bm.next_level(), Some(BlindLevel::new(20, 40)));
}

#[test]
fn blinds_increase_after_hands_per_level() {
    let levels = vec![BlindLevel::new(5, 10), BlindLevel::new(10, 20)];
    let mut bm = BlindManager::new(levels, 3).unwrap();
    assert!(!bm.advance_hand());
    assert!(!bm.advance_hand());
    assert_eq!(bm.hands_until_increase(), Some(1));
    assert!(bm.advance_hand());
    assert_eq!((bm.small_blind(), bm.big_blind()), (10, 20));
    assert_eq!(bm.hands_at_current_level(), 0);
    assert!(bm.is_max_level());
    assert_eq!(bm.hands_until_increase(), None);
}

#[test]
fn final_level_holds() {
    let mut bm = BlindManager::new(vec![BlindLevel::new(50, 100)], 1).unwrap();
    for _ in 0..5 {
        assert!(!bm.advance_hand());
    }
    assert_eq!(bm.big_blind(), 100);
    assert_eq!(bm.next_level(), None);
}

#[test]
fn postings_are_clipped_to_the_stack() {
    let bm = BlindManager::default();
    assert_eq!(
        bm.get_blind_posting(0, 1, 5, 1000),
        vec![
            BlindPosting {
                seat: 0,
                amount: 5,
                kind: BlindKind::SmallBlind
            },
            BlindPosting {
                seat: 1,
                amount: 20,
                kind: BlindKind::BigBlind
            },
        ]
    );
    assert_eq!(bm.get_blind_posting(0, 1, 1000, 15)[1].amount, 15);
}

#[test]
fn empty_stack_posts_nothing() {
    let bm = BlindManager::default();
    let postings = bm.get_blind_posting(0, 1, 0, 1000);
    assert_eq!(postings.len(), 1);
    assert_eq!(postings[0].kind, BlindKind::BigBlind);
}

#[test]
fn invalid_schedules_are_rejected() {
    assert!(matches!(
        BlindManager::new(vec![], 10),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BlindManager::new(vec![BlindLevel::new(20, 10)], 10),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BlindManager::new(vec![BlindLevel::new(20, 40), BlindLevel::new(10, 20)], 10),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        BlindManager::new(vec![BlindLevel::new(10, 20)], 0),
        Err(ConfigError::Invalid(_))
    ));
}
