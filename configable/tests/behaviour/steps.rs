//! Steps driving animal construction through the shared zoo taxonomy.

use crate::fixtures::DispatchContext;
use anyhow::{Result, anyhow, ensure};
use configable::record::Record;
use rstest_bdd_macros::{given, then, when};
use serde_json::{Value, json};
use test_helpers::zoo::Zoo;

#[given("an empty animal record")]
fn empty_record(dispatch_context: &DispatchContext) -> Result<()> {
    ensure!(
        dispatch_context.record.is_empty(),
        "animal record already initialised"
    );
    dispatch_context.record.set(Record::new());
    Ok(())
}

#[given("the record sets {key} to {value}")]
fn record_sets(dispatch_context: &DispatchContext, key: String, value: String) -> Result<()> {
    let mut record = dispatch_context
        .record
        .take()
        .ok_or_else(|| anyhow!("animal record has not been initialised"))?;
    record.insert(key, Value::String(value));
    dispatch_context.record.set(record);
    Ok(())
}

#[when("the animal is constructed")]
fn construct_animal(dispatch_context: &DispatchContext) -> Result<()> {
    let zoo = Zoo::build()?;
    let record = dispatch_context
        .record
        .take()
        .ok_or_else(|| anyhow!("animal record has not been initialised"))?;
    dispatch_context
        .outcome
        .set(zoo.registry.construct(zoo.animal, &record));
    Ok(())
}

#[then("the concrete type is {name}")]
fn concrete_type(dispatch_context: &DispatchContext, name: String) -> Result<()> {
    let outcome = dispatch_context
        .outcome
        .get()
        .ok_or_else(|| anyhow!("no construction outcome recorded"))?;
    let animal = outcome.map_err(|err| anyhow!("construction failed: {err}"))?;
    ensure!(
        animal.type_name() == name,
        "expected {name}, got {}",
        animal.type_name()
    );
    Ok(())
}

#[then("the units are {units}")]
fn units_are(dispatch_context: &DispatchContext, units: String) -> Result<()> {
    let outcome = dispatch_context
        .outcome
        .get()
        .ok_or_else(|| anyhow!("no construction outcome recorded"))?;
    let animal = outcome.map_err(|err| anyhow!("construction failed: {err}"))?;
    ensure!(animal.value("units") == Some(&json!(units)));
    Ok(())
}

#[then("construction fails on setting {setting}")]
fn construction_fails(dispatch_context: &DispatchContext, setting: String) -> Result<()> {
    let outcome = dispatch_context
        .outcome
        .take()
        .ok_or_else(|| anyhow!("no construction outcome recorded"))?;
    let err = outcome
        .err()
        .ok_or_else(|| anyhow!("expected construction to fail"))?;
    ensure!(
        err.setting() == Some(setting.as_str()),
        "expected failure on {setting}, got {err}"
    );
    Ok(())
}
