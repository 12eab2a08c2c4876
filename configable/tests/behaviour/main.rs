//! `rstest-bdd` behavioural tests for `configable`.
//!
//! Fixtures and step implementations are registered by the sibling modules;
//! [`scenarios`] binds the `.feature` files under `tests/features`.

mod fixtures;
mod scenarios;
mod steps;
