use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use holdem_engine::engine::GameEngine;
use holdem_engine::player::{ActionKind as A, PlayerState};

#[derive(Debug, Clone)]
struct Event {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

impl Event {
    fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Default)]
struct Capture(Arc<Mutex<Vec<Event>>>);

impl Capture {
    fn events(&self) -> Vec<Event> {
        self.0.lock().unwrap().clone()
    }

    fn find(&self, message: &str) -> Vec<Event> {
        self.events()
            .into_iter()
            .filter(|e| e.message == message)
            .collect()
    }
}

#[derive(Default)]
struct Fields {
    message: String,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for Fields {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let v = format!("{value:?}");
        if field.name() == "message" {
            self.message = v;
        } else {
            self.fields.push((field.name().to_string(), v));
        }
    }
}

impl<S: tracing::Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = Fields::default();
        event.record(&mut visitor);
        self.0.lock().unwrap().push(Event {
            level: *event.metadata().level(),
            message: visitor.message,
            fields: visitor.fields,
        });
    }
}

fn captured<F: FnOnce()>(f: F) -> Capture {
    let capture = Capture::default();
    let registry = Registry::default().with(capture.clone());
    tracing::subscriber::with_default(registry, f);
    capture
}

fn engine() -> GameEngine {
    let players = (0..3)
        .map(|seat| PlayerState::new(seat, format!("p{seat}"), 1000))
        .collect();
    GameEngine::new(players, None, Some(13)).unwrap()
}

#[test]
fn hand_start_is_logged_at_info() {
    let capture = captured(|| {
        let mut eng = engine();
        eng.start_hand().unwrap();
    });
    let started = capture.find("hand started");
    assert_eq!(started.len(), 1);
    assert_eq!(started[0].level, Level::INFO);
    assert_eq!(started[0].field("hand"), Some("1"));
    assert_eq!(started[0].field("big_blind"), Some("20"));

    let blinds = capture.find("blind posted");
    assert_eq!(blinds.len(), 2);
    assert!(blinds.iter().all(|e| e.level == Level::DEBUG));
}

#[test]
fn actions_log_at_debug_and_fold_out_at_info() {
    let capture = captured(|| {
        let mut eng = engine();
        eng.start_hand().unwrap();
        for seat in eng.get_preflop_order().into_iter().take(2) {
            eng.apply_action(seat, A::Fold, None).unwrap();
        }
        eng.award_pot_to_last_player().unwrap();
        eng.end_hand().unwrap();
    });
    let folds = capture.find("fold");
    assert_eq!(folds.len(), 2);
    assert!(folds.iter().all(|e| e.level == Level::DEBUG));

    let won = capture.find("all others folded");
    assert_eq!(won.len(), 1);
    assert_eq!(won[0].level, Level::INFO);
    assert_eq!(won[0].field("amount"), Some("30"));
}

#[test]
fn advancing_past_the_hand_warns() {
    let capture = captured(|| {
        let mut eng = engine();
        assert!(eng.advance_phase().is_err());
    });
    let warnings: Vec<Event> = capture
        .events()
        .into_iter()
        .filter(|e| e.level == Level::WARN)
        .collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].message, "cannot advance phase");
}

#[test]
fn eliminations_are_logged() {
    let capture = captured(|| {
        let players = vec![PlayerState::new(0, "big", 1000), PlayerState::new(1, "tiny", 20)];
        let mut eng = GameEngine::new(players, None, Some(4)).unwrap();
        eng.start_hand().unwrap();
        // tiny is on the button and posts 10 of its 20 as small blind
        eng.apply_action(1, A::Call, None).unwrap();
        while eng.phase().is_betting() {
            eng.advance_phase().unwrap();
        }
        eng.run_showdown().unwrap();
        eng.end_hand().unwrap();
    });
    let showdown = capture.find("showdown complete");
    assert_eq!(showdown.len(), 1);
    let eliminated = capture.find("player eliminated");
    assert!(eliminated.len() <= 1);
    for e in eliminated {
        assert_eq!(e.level, Level::INFO);
        assert_eq!(e.field("name"), Some("tiny"));
    }
}
