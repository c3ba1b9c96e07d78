//! # sigil
//!
//! A segment-of-units aggregation pipeline that folds many independent
//! symbolic readings into one deterministic seal.
//!
//! Each segment spawns units along a golden-ratio spiral, binds an optional
//! joint entangled state over them, collects their readings in parallel,
//! optionally relabels the readings with a small online-trained network,
//! amplifies each reading's qualia, and composes everything into a single
//! seal string. Every degraded path (no simulation, no relabeler, tiny
//! batch) still produces a valid seal.
//!
//! ## Quick Start
//!
//! ```
//! use sigil::prelude::*;
//!
//! let cfg = SegmentConfig::default().with_seed(42);
//! let mut segment = Segment::new(0, 0, cfg).unwrap();
//! segment.spawn_units(4);
//!
//! let seal = segment.collapse("context-token").unwrap();
//! assert!(seal.starts_with("SEGMENT_0::"));
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel` (default): parallel reading collection via rayon
//! - `serde` (default): serialization support for configs and readings
//!
//! ## Modules
//!
//! - [`segment`]: batch coordinator from spawn to seal
//! - [`placement`]: deterministic spiral placement
//! - [`entangle`]: joint-state simulation with classical fallback
//! - [`collect`]: order-preserving reading collection
//! - [`classifier`]: optional online relabeling pass
//! - [`amplifier`]: deterministic qualia rescaling
//! - [`seal`]: final string composition
//! - [`observer`]: read-only snapshot adapters

#[path = "core/amplifier.rs"]
pub mod amplifier;

#[path = "core/classifier.rs"]
pub mod classifier;

#[path = "core/collect.rs"]
pub mod collect;

#[path = "core/config.rs"]
pub mod config;

#[path = "core/entangle.rs"]
pub mod entangle;

#[path = "core/error.rs"]
pub mod error;

#[path = "core/placement.rs"]
pub mod placement;

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/seal.rs"]
pub mod seal;

#[path = "core/segment.rs"]
pub mod segment;

#[path = "core/unit.rs"]
pub mod unit;

pub mod observer;

/// Prelude module for convenient imports.
///
/// ```
/// use sigil::prelude::*;
/// ```
pub mod prelude {
    pub use crate::classifier::Classifier;
    pub use crate::config::{ExecutionTier, SegmentConfig};
    pub use crate::entangle::{Entangler, JointState};
    pub use crate::error::{Result, SegmentError};
    pub use crate::seal::{CLASSICAL_MARKER, SEAL_SEPARATOR};
    pub use crate::segment::Segment;
    pub use crate::unit::{
        Position, Reading, Unit, LABEL_CREST, LABEL_DRIFT, LABEL_SURGE, LABEL_TROUGH,
    };
}
