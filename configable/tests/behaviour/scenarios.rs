//! Binds the behavioural feature files to the shared fixtures.

use crate::fixtures::{DispatchContext, dispatch_context};
use rstest_bdd_macros::scenarios;

scenarios!(
    "tests/features/subtype_dispatch.feature",
    fixtures = [dispatch_context: DispatchContext]
);
