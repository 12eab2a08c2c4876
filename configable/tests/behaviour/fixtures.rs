//! Shared fixtures for the behavioural scenarios.

use configable::record::Record;
use configable::{ConfigableResult, Instance};
use rstest::fixture;
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;

/// Scenario state carrying the record under construction and the outcome.
#[derive(Debug, Default, ScenarioState)]
pub struct DispatchContext {
    pub record: Slot<Record>,
    pub outcome: Slot<ConfigableResult<Instance>>,
}

/// Creates a clean dispatch state for each scenario.
#[fixture]
pub fn dispatch_context() -> DispatchContext {
    DispatchContext::default()
}
