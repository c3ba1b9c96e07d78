//! Order-preserving reading collection.
//!
//! Fork-join over units: one invocation per unit, no cross-unit
//! communication, join before any post-processing. Output order always
//! equals unit order because both tiers map over the unit slice itself,
//! never over completion order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::config::ExecutionTier;
use crate::error::Result;
use crate::unit::{Reading, Unit};

/// Invoke every unit and gather readings in unit order.
///
/// A failed invocation aborts the whole batch: dropping a single reading
/// would shift the reverse-order seal for every unit after it.
pub fn collect(units: &[Unit], context_token: &str, tier: ExecutionTier) -> Result<Vec<Reading>> {
    match tier {
        ExecutionTier::Scalar => collect_scalar(units, context_token),
        ExecutionTier::Parallel => collect_parallel(units, context_token),
    }
}

fn collect_scalar(units: &[Unit], context_token: &str) -> Result<Vec<Reading>> {
    units.iter().map(|u| u.invoke(context_token)).collect()
}

#[cfg(feature = "parallel")]
fn collect_parallel(units: &[Unit], context_token: &str) -> Result<Vec<Reading>> {
    units.par_iter().map(|u| u.invoke(context_token)).collect()
}

/// Without the `parallel` feature the parallel tier degrades to scalar.
#[cfg(not(feature = "parallel"))]
fn collect_parallel(units: &[Unit], context_token: &str) -> Result<Vec<Reading>> {
    collect_scalar(units, context_token)
}
