use std::sync::{Arc, Mutex};

use tracing::Level;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{Layer, Registry};

use holdem_engine::agent::{Agent, Proposal};
use holdem_engine::engine::Engine;
use holdem_engine::errors::GameError;
use holdem_engine::game::{Game, GameConfig};
use holdem_engine::history::HandPhase;
use holdem_engine::player::ActionType as A;

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[derive(Clone, Default)]
struct Capture {
    entries: Arc<Mutex<Vec<Captured>>>,
}

impl Capture {
    fn entries(&self) -> Vec<Captured> {
        self.entries.lock().unwrap().clone()
    }
}

impl<S: tracing::Subscriber> Layer<S> for Capture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);
        self.entries.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message: visitor.message.unwrap_or_default(),
            fields: visitor.fields,
        });
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Vec<(String, String)>,
}

impl tracing::field::Visit for FieldVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        let value_str = format!("{:?}", value);
        if field.name() == "message" {
            self.message = Some(value_str);
        } else {
            self.fields.push((field.name().to_string(), value_str));
        }
    }
}

/// Always asks for something the rules never allow.
struct Stubborn;

impl Agent for Stubborn {
    fn propose(&mut self, _game: &Game, _player_id: usize) -> Proposal {
        Proposal::raise_to(1)
    }

    fn name(&self) -> &str {
        "Stubborn"
    }
}

/// Checks when it can, calls otherwise.
struct Passive;

impl Agent for Passive {
    fn propose(&mut self, game: &Game, player_id: usize) -> Proposal {
        if game.chips_to_call(player_id) > 0 {
            Proposal::new(A::Call)
        } else {
            Proposal::new(A::Check)
        }
    }

    fn name(&self) -> &str {
        "Passive"
    }
}

/// Pushes every hand.
struct Shover;

impl Agent for Shover {
    fn propose(&mut self, game: &Game, player_id: usize) -> Proposal {
        if game.validate_move(player_id, A::AllIn, None) {
            Proposal::new(A::AllIn)
        } else {
            Proposal::new(A::Call)
        }
    }

    fn name(&self) -> &str {
        "Shover"
    }
}

fn heads_up() -> GameConfig {
    GameConfig {
        buy_in: 100,
        max_players: 2,
        ..GameConfig::default()
    }
}

#[test]
fn illegal_proposals_fall_back_to_check_or_fold() {
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(Stubborn), Box::new(Stubborn)];
    let mut engine = Engine::new(heads_up(), agents).unwrap();
    let capture = Capture::default();
    let registry = Registry::default().with(capture.clone());

    let outcome = tracing::subscriber::with_default(registry, || engine.play_hand()).unwrap();

    // facing the big blind, the button can only be folded
    assert_eq!(outcome.corrections, 1);
    assert_eq!(outcome.chip_deltas, vec![-5, 5]);
    assert_eq!(outcome.pot_winners[&0].winners, vec![1]);

    let entries = capture.entries();
    let warning = entries
        .iter()
        .find(|e| e.level == Level::WARN)
        .expect("fallback should be logged");
    assert_eq!(warning.message, "illegal proposal replaced");
    assert!(warning
        .fields
        .contains(&("fallback".to_string(), "Fold".to_string())));
    assert!(warning
        .fields
        .contains(&("agent".to_string(), "\"Stubborn\"".to_string())));
}

#[test]
fn fallback_prefers_check() {
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(Passive), Box::new(Stubborn)];
    let mut engine = Engine::new(heads_up(), agents).unwrap();
    let outcome = engine.play_hand().unwrap();
    // the big blind checks every street instead of folding
    assert_eq!(outcome.corrections, 4);
    assert!(engine.game().hand_history().round(HandPhase::River).is_some());
    assert_eq!(outcome.chip_deltas.iter().sum::<i64>(), 0);
}

#[test]
fn hand_lifecycle_is_traced() {
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(Passive), Box::new(Passive)];
    let mut engine = Engine::new(heads_up(), agents).unwrap();
    let capture = Capture::default();
    let registry = Registry::default().with(capture.clone());

    tracing::subscriber::with_default(registry, || engine.play_hand()).unwrap();

    let messages: Vec<String> = capture.entries().into_iter().map(|e| e.message).collect();
    for expected in ["hand started", "action applied", "betting round opened", "pot awarded"] {
        assert!(
            messages.iter().any(|m| m == expected),
            "missing {expected:?} in {messages:?}"
        );
    }
    assert!(capture
        .entries()
        .iter()
        .any(|e| e.level == Level::INFO && e.message == "pot awarded"));
}

#[test]
fn engine_restakes_busted_tables() {
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(Shover), Box::new(Shover)];
    let mut engine = Engine::new(heads_up(), agents).unwrap();
    let outcomes = engine.play(12).unwrap();
    assert_eq!(outcomes.len(), 12);
    assert_eq!(outcomes.last().map(|o| o.hand_number), Some(12));
    let game = engine.game();
    assert!(game.game_restarts() > 0 || game.buyin_history().iter().any(|&b| b > 0));
}

#[test]
fn agent_count_must_match_seats() {
    let agents: Vec<Box<dyn Agent>> = vec![Box::new(Passive)];
    assert!(matches!(
        Engine::new(heads_up(), agents),
        Err(GameError::InvalidConfig(_))
    ));
}
