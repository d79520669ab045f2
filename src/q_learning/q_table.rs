//! Value table for tabular temporal difference learning

use std::collections::{BTreeMap, HashMap, HashSet};

use log::warn;

use super::{policy::argmax, serialization::TabularPolicy};
use crate::{Error, Result, types::CanonicalState};

/// Action values for one visited state.
///
/// `actions()[i]` is a board cell and `values()[i]` its current estimate. The
/// row's domain is fixed when the state is first visited; only the values can
/// change afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct StateActions {
    actions: Vec<usize>,
    values: Vec<f64>,
}

impl StateActions {
    /// # Panics
    ///
    /// Panics if `actions` and `values` differ in length.
    pub fn new(actions: Vec<usize>, values: Vec<f64>) -> Self {
        assert_eq!(
            actions.len(),
            values.len(),
            "actions and values must be index-aligned"
        );
        Self { actions, values }
    }

    /// Row with every action set to `value`
    pub fn uniform(actions: &[usize], value: f64) -> Self {
        Self {
            actions: actions.to_vec(),
            values: vec![value; actions.len()],
        }
    }

    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Estimates in row order, writable in place
    pub fn values_mut(&mut self) -> &mut [f64] {
        &mut self.values
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Index of `action` within the row
    pub fn position_of(&self, action: usize) -> Option<usize> {
        self.actions.iter().position(|&a| a == action)
    }

    /// Current estimate for `action`
    pub fn value_of(&self, action: usize) -> Option<f64> {
        self.position_of(action).map(|idx| self.values[idx])
    }

    /// Greedy action, lowest index winning ties
    pub fn greedy_action(&self) -> Option<usize> {
        if self.is_empty() {
            None
        } else {
            Some(self.actions[argmax(&self.values)])
        }
    }

    /// Action/value pairs in row order
    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.actions.iter().copied().zip(self.values.iter().copied())
    }
}

/// Value table mapping canonical states to their action rows.
///
/// Rows are created lazily on first visit and never removed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    rows: HashMap<CanonicalState, StateActions>,
    default_q: f64,
}

impl ValueTable {
    /// Create an empty table whose new rows start at `default_q`
    pub fn new(default_q: f64) -> Self {
        Self {
            rows: HashMap::new(),
            default_q,
        }
    }

    pub fn default_q(&self) -> f64 {
        self.default_q
    }

    /// Report whether `state` was already known, creating its row if not.
    ///
    /// A new row takes `available` as its actions, each valued at `default_q`.
    /// Returns `true` for a repeat visit and `false` for a first visit.
    pub fn check_visited(&mut self, state: &CanonicalState, available: &[usize]) -> bool {
        if self.rows.contains_key(state) {
            return true;
        }
        self.rows.insert(
            state.clone(),
            StateActions::uniform(available, self.default_q),
        );
        false
    }

    /// Row for a visited state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnvisitedState`] if `state` has never been visited.
    pub fn row(&self, state: &CanonicalState) -> Result<&StateActions> {
        self.rows.get(state).ok_or_else(|| Error::UnvisitedState {
            state: state.to_string(),
        })
    }

    /// Mutable row for a visited state.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnvisitedState`] if `state` has never been visited.
    pub fn row_mut(&mut self, state: &CanonicalState) -> Result<&mut StateActions> {
        self.rows
            .get_mut(state)
            .ok_or_else(|| Error::UnvisitedState {
                state: state.to_string(),
            })
    }

    /// Insert or replace a row
    pub(crate) fn insert(&mut self, state: CanonicalState, row: StateActions) {
        self.rows.insert(state, row);
    }

    pub fn contains(&self, state: &CanonicalState) -> bool {
        self.rows.contains_key(state)
    }

    /// Number of visited states
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CanonicalState, &StateActions)> {
        self.rows.iter()
    }

    /// Serialize into the persisted policy format
    pub fn to_policy(&self) -> TabularPolicy {
        let states = self
            .rows
            .iter()
            .map(|(state, row)| {
                let actions = row
                    .iter()
                    .map(|(action, value)| (action.to_string(), value))
                    .collect();
                (state.to_string(), actions)
            })
            .collect();
        TabularPolicy { states }
    }

    /// Rebuild a table from a persisted policy.
    ///
    /// Each row's actions come out in ascending cell order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCanonicalState`] or [`Error::InvalidActionKey`]
    /// for malformed keys, including an action listed twice for one state.
    pub fn from_policy(policy: &TabularPolicy, default_q: f64) -> Result<Self> {
        let mut table = Self::new(default_q);
        for (state_key, actions) in &policy.states {
            let state = CanonicalState::parse(state_key)?;
            let row = parse_row(state_key, actions)?;
            if row.is_empty() {
                warn!("policy state '{state_key}' has no actions");
            }
            table.insert(state, row);
        }
        Ok(table)
    }
}

fn parse_row(state: &str, actions: &BTreeMap<String, f64>) -> Result<StateActions> {
    let invalid = |action: &str| Error::InvalidActionKey {
        state: state.to_string(),
        action: action.to_string(),
    };

    let mut parsed: Vec<(usize, f64)> = Vec::with_capacity(actions.len());
    let mut seen = HashSet::new();
    for (key, &value) in actions {
        let action: usize = key.trim().parse().map_err(|_| invalid(key))?;
        if action >= crate::types::BOARD_SIZE || !seen.insert(action) {
            return Err(invalid(key));
        }
        parsed.push((action, value));
    }
    parsed.sort_by_key(|&(action, _)| action);

    let (actions, values) = parsed.into_iter().unzip();
    Ok(StateActions::new(actions, values))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(s: &str) -> CanonicalState {
        CanonicalState::parse(s).unwrap()
    }

    #[test]
    fn test_lazy_initialization() {
        let mut table = ValueTable::new(2.0);
        assert!(table.is_empty());

        let s = state("000000000");
        assert!(!table.check_visited(&s, &[0, 1, 2, 3]));
        assert_eq!(table.row(&s).unwrap().values(), &[2.0; 4]);
        assert_eq!(table.row(&s).unwrap().actions(), &[0, 1, 2, 3]);

        // second visit leaves the row alone even with a different action list
        table.row_mut(&s).unwrap().values_mut()[1] = 7.0;
        assert!(table.check_visited(&s, &[5]));
        assert_eq!(table.row(&s).unwrap().values(), &[2.0, 7.0, 2.0, 2.0]);
        assert_eq!(table.row(&s).unwrap().actions(), &[0, 1, 2, 3]);
        assert_eq!(table.len(), 1);

        assert!(!table.check_visited(&state("111111111"), &(0..9).collect::<Vec<_>>()));
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_unvisited_lookup_fails() {
        let table = ValueTable::new(0.0);
        assert!(matches!(
            table.row(&state("000000000")),
            Err(Error::UnvisitedState { .. })
        ));
    }

    #[test]
    fn test_row_helpers() {
        let row = StateActions::new(vec![2, 5, 7], vec![0.5, 1.5, 1.5]);
        assert_eq!(row.position_of(7), Some(2));
        assert_eq!(row.position_of(0), None);
        assert_eq!(row.value_of(5), Some(1.5));
        assert_eq!(row.greedy_action(), Some(5));
        assert_eq!(StateActions::uniform(&[], 1.0).greedy_action(), None);
    }

    #[test]
    #[should_panic(expected = "index-aligned")]
    fn test_misaligned_row_panics() {
        StateActions::new(vec![0, 1], vec![0.0]);
    }

    #[test]
    fn test_policy_round_trip() {
        let mut table = ValueTable::new(0.0);
        table.insert(
            state("120000000"),
            StateActions::new(vec![2, 3, 8], vec![0.25, -1.0, 0.75]),
        );
        table.insert(state("000000000"), StateActions::uniform(&[0, 4], 0.1));

        let policy = table.to_policy();
        assert_eq!(policy.states["120000000"]["3"], -1.0);

        let restored = ValueTable::from_policy(&policy, 0.0).unwrap();
        assert_eq!(restored, table);
    }

    #[test]
    fn test_from_policy_orders_actions_numerically() {
        let mut actions = BTreeMap::new();
        actions.insert("8".to_string(), 1.0);
        actions.insert("1".to_string(), 2.0);
        let mut states = BTreeMap::new();
        states.insert("000000000".to_string(), actions);

        let table = ValueTable::from_policy(&TabularPolicy { states }, 0.0).unwrap();
        let row = table.row(&state("000000000")).unwrap();
        assert_eq!(row.actions(), &[1, 8]);
        assert_eq!(row.values(), &[2.0, 1.0]);
    }

    #[test]
    fn test_from_policy_rejects_bad_keys() {
        let policy: TabularPolicy =
            serde_json::from_str(r#"{"states": {"00000000": {"0": 1.0}}}"#).unwrap();
        assert!(matches!(
            ValueTable::from_policy(&policy, 0.0),
            Err(Error::InvalidCanonicalState { .. })
        ));

        let policy: TabularPolicy =
            serde_json::from_str(r#"{"states": {"000000000": {"nine": 1.0}}}"#).unwrap();
        assert!(matches!(
            ValueTable::from_policy(&policy, 0.0),
            Err(Error::InvalidActionKey { .. })
        ));

        let policy: TabularPolicy =
            serde_json::from_str(r#"{"states": {"000000000": {"1": 1.0, "01": 2.0}}}"#).unwrap();
        assert!(matches!(
            ValueTable::from_policy(&policy, 0.0),
            Err(Error::InvalidActionKey { .. })
        ));
    }
}
