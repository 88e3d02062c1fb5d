use holdem_ai::{create_agent, AGENT_KINDS};
use holdem_engine::agent::Agent;
use holdem_engine::engine::Engine;
use holdem_engine::game::GameConfig;

fn table(kinds: &[&str], seed: u64) -> Engine {
    let agents: Vec<Box<dyn Agent>> = kinds
        .iter()
        .enumerate()
        .map(|(seat, kind)| create_agent(kind, seed + seat as u64).unwrap())
        .collect();
    let config = GameConfig {
        max_players: kinds.len(),
        seed,
        ..GameConfig::default()
    };
    Engine::new(config, agents).unwrap()
}

#[test]
fn factory_knows_every_kind() {
    for kind in AGENT_KINDS {
        assert!(create_agent(kind, 0).is_some(), "{kind}");
    }
    assert!(create_agent("", 0).is_none());
}

#[test]
fn built_in_agents_never_need_correcting() {
    let mut engine = table(&["score", "random", "score", "random"], 21);
    for outcome in engine.play(30).unwrap() {
        assert_eq!(outcome.corrections, 0, "hand {}", outcome.hand_number);
        assert_eq!(outcome.chip_deltas.iter().sum::<i64>(), 0);
    }
}

#[test]
fn seeded_tables_replay() {
    let mut a = table(&["random", "score", "random"], 8);
    let mut b = table(&["random", "score", "random"], 8);
    assert_eq!(a.play(15).unwrap(), b.play(15).unwrap());
}
