//! Behavioural properties of the TD agents, driven through the public API

use std::collections::BTreeMap;

use tictactoe_td::{
    CanonicalState,
    ports::{Learner, Player},
    q_learning::{
        ActionSelector, ExpectedSarsaAgent, QLearningAgent, StateActions, TabularPolicy,
        TdAlgorithm, TdSettings, ValueTable, instantiate_agent,
    },
    tictactoe::{BoardState, Mark},
};

const TOL: f64 = 1e-9;

fn state(s: &str) -> CanonicalState {
    CanonicalState::parse(s).unwrap()
}

fn board(s: &str) -> BoardState {
    BoardState::from_string(s).unwrap()
}

fn greedy_settings(discount_rate: f64, step_size: f64) -> TdSettings {
    TdSettings::default()
        .with_epsilon_greedy(false)
        .with_default_q(2.0)
        .with_discount_rate(discount_rate)
        .with_step_size(step_size)
}

/// Every state gets actions 0-3 valued [0, 1, 0, 0]
fn table_with(states: &[&str]) -> ValueTable {
    let row: BTreeMap<String, f64> = [("0", 0.0), ("1", 1.0), ("2", 0.0), ("3", 0.0)]
        .into_iter()
        .map(|(action, value)| (action.to_string(), value))
        .collect();
    let policy = TabularPolicy {
        states: states.iter().map(|s| (s.to_string(), row.clone())).collect(),
    };
    ValueTable::from_policy(&policy, 2.0).unwrap()
}

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < TOL, "{actual:?} != {expected:?}");
    }
}

#[test]
fn lazy_init_is_deterministic() {
    let mut table = ValueTable::new(2.0);
    let s = state("000000000");

    assert!(!table.check_visited(&s, &[0, 1, 2, 3]));
    let first = table.row(&s).unwrap().clone();
    assert_eq!(first.values(), &[2.0; 4]);

    assert!(table.check_visited(&s, &[0, 1, 2, 3]));
    assert_eq!(table.row(&s).unwrap(), &first);
}

#[test]
fn greedy_selection_ignores_generator() {
    let row = StateActions::new(vec![0, 1, 2, 3], vec![0.1, 0.2, 0.1, -2.0]);
    for seed in [0, 1, 42, 9876] {
        let mut selector = ActionSelector::new(
            &TdSettings::default()
                .with_epsilon_greedy(false)
                .with_seed(seed),
        );
        for _ in 0..10 {
            assert_eq!(selector.select(&row), Some(1));
        }
    }
}

#[test]
fn egreedy_probability_vector() {
    let selector = ActionSelector::new(&TdSettings::default().with_epsilon(0.1));
    let probs = selector.egreedy_probs(&[0.0, 5.0, 0.0, 0.0]);
    assert_close(&probs, &[0.025, 0.925, 0.025, 0.025]);
    assert!((probs.iter().sum::<f64>() - 1.0).abs() < TOL);
}

#[test]
fn q_learning_terminal_update() {
    let mut agent =
        QLearningAgent::with_table(Mark::X, greedy_settings(1.0, 0.9), table_with(&["000000000"]))
            .unwrap();

    assert_eq!(agent.make_move(0.0, &board("---------"), &[0, 1, 2, 3]).unwrap(), 1);
    agent.end_game(2.0, &board("X--------"));

    let row = agent.value_table().row(&state("000000000")).unwrap();
    assert_close(row.values(), &[0.0, 1.9, 0.0, 0.0]);
}

#[test]
fn q_learning_bootstrap_update() {
    let mut agent = QLearningAgent::with_table(
        Mark::X,
        greedy_settings(0.8, 0.5),
        table_with(&["000000000", "100000000"]),
    )
    .unwrap();

    agent.make_move(99.0, &board("---------"), &[0, 1, 2, 3]).unwrap();
    let untouched = agent.value_table().row(&state("000000000")).unwrap();
    assert_close(untouched.values(), &[0.0, 1.0, 0.0, 0.0]);

    agent.make_move(3.0, &board("X--------"), &[0, 1, 2, 3]).unwrap();
    let updated = agent.value_table().row(&state("000000000")).unwrap();
    assert_close(updated.values(), &[0.0, 2.4, 0.0, 0.0]);
}

#[test]
fn expected_sarsa_bootstrap_uses_own_epsilon() {
    // probs over [0, 1, 0, 0] at epsilon 0.2: [0.05, 0.85, 0.05, 0.05]
    // target = 3.0 + 0.8 * 0.85 = 3.68, new = 1.0 + 0.5 * 2.68 = 2.34
    let settings = greedy_settings(0.8, 0.5).with_epsilon(0.2);
    let mut agent = ExpectedSarsaAgent::with_table(
        Mark::X,
        settings,
        table_with(&["000000000", "100000000"]),
    )
    .unwrap();

    agent.make_move(0.0, &board("---------"), &[0, 1, 2, 3]).unwrap();
    agent.make_move(3.0, &board("X--------"), &[0, 1, 2, 3]).unwrap();

    let row = agent.value_table().row(&state("000000000")).unwrap();
    assert_close(row.values(), &[0.0, 2.34, 0.0, 0.0]);
}

#[test]
fn frozen_agents_keep_their_values() {
    for algorithm in [TdAlgorithm::QLearning, TdAlgorithm::ExpectedSarsa] {
        let policy = table_with(&["000000000", "100000000"]).to_policy();
        let settings = TdSettings::default().with_epsilon(0.5).with_seed(3);
        let mut agent = instantiate_agent(algorithm, Mark::X, settings, Some(&policy)).unwrap();
        agent.set_frozen(true);

        for _ in 0..20 {
            let first = agent.make_move(1.0, &board("---------"), &[0, 1, 2, 3]).unwrap();
            assert!(first < 4);
            let second = agent.make_move(5.0, &board("X--------"), &[0, 1, 2, 3]).unwrap();
            assert!(second < 4);
            agent.end_game(-7.0, &board("XX-------"));
        }

        assert_eq!(agent.dump_policy(), policy, "{algorithm:?} learned while frozen");
    }
}

#[test]
fn policy_round_trip_into_fresh_agent() {
    let settings = TdSettings::default().with_seed(11).with_step_size(0.7);
    let mut trained = QLearningAgent::new(Mark::X, settings).unwrap();

    let opening = BoardState::new();
    let reply = board("X---O----");
    for _ in 0..5 {
        trained.make_move(0.0, &opening, &opening.empty_cells()).unwrap();
        trained.make_move(0.5, &reply, &reply.empty_cells()).unwrap();
        trained.end_game(1.0, &reply);
    }

    let policy = trained.dump_policy();
    let restored = QLearningAgent::from_policy(&policy, Mark::X, settings).unwrap();

    for (key, actions) in &policy.states {
        let row = restored.value_table().row(&state(key)).unwrap();
        for (action, value) in actions {
            let action: usize = action.parse().unwrap();
            assert!((row.value_of(action).unwrap() - value).abs() < TOL);
        }
    }
    assert_eq!(restored.value_table().len(), trained.value_table().len());
    assert!(restored.pending().is_none());
}

#[test]
fn canonicalization_follows_current_mark() {
    let raw = board("XO-------");
    assert_eq!(CanonicalState::encode(&raw, Mark::X).as_str(), "120000000");
    assert_eq!(CanonicalState::encode(&raw, Mark::O).as_str(), "210000000");

    let mut agent = QLearningAgent::new(Mark::X, greedy_settings(1.0, 0.5)).unwrap();
    agent.make_move(0.0, &raw, &raw.empty_cells()).unwrap();
    agent.end_game(0.0, &raw);
    assert!(agent.value_table().contains(&state("120000000")));

    agent.set_mark(Mark::O);
    agent.make_move(0.0, &raw, &raw.empty_cells()).unwrap();
    agent.end_game(0.0, &raw);
    assert!(agent.value_table().contains(&state("210000000")));
    assert_eq!(agent.value_table().len(), 2);
}
