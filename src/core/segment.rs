//! The segment coordinator: one spawn-to-seal batch.
//!
//! A segment owns its units, the joint state bound at spawn time, and the
//! seal produced by collapse. Nothing here is shared across batches: a
//! segment is constructed, spawned, collapsed, and discarded.

use crate::amplifier;
use crate::classifier::Classifier;
use crate::collect;
use crate::config::SegmentConfig;
use crate::entangle::{Entangler, JointState};
use crate::error::Result;
use crate::placement;
use crate::prng::Prng;
use crate::seal;
use crate::unit::{Reading, Unit};

pub struct Segment {
    id: u64,
    start_depth: u64,
    cfg: SegmentConfig,
    rng: Prng,

    entangler: Entangler,
    classifier: Classifier,

    units: Vec<Unit>,
    joint: Option<JointState>,
    readings: Vec<Reading>,
    seal: Option<String>,
}

impl Segment {
    /// Build a segment, rejecting malformed configuration before any batch
    /// work begins.
    pub fn new(id: u64, start_depth: u64, cfg: SegmentConfig) -> Result<Self> {
        cfg.validate()?;

        let rng = Prng::new(cfg.seed.unwrap_or(1));
        let classifier = Classifier::Network {
            hidden_layers: cfg.classifier_depth,
            passes: cfg.classifier_passes,
            rate: cfg.classifier_rate,
        };

        Ok(Self {
            id,
            start_depth,
            cfg,
            rng,
            entangler: Entangler::default(),
            classifier,
            units: Vec::new(),
            joint: None,
            readings: Vec::new(),
            seal: None,
        })
    }

    /// Swap the joint-state capability. `Entangler::Disabled` exercises the
    /// classical fallback without touching the simulation path.
    pub fn set_entangler(&mut self, entangler: Entangler) {
        self.entangler = entangler;
    }

    /// Swap the relabeling capability. `Classifier::Disabled` is the
    /// pass-through stub.
    pub fn set_classifier(&mut self, classifier: Classifier) {
        self.classifier = classifier;
    }

    /// Spawn `count` units along the spiral, then bind the joint state over
    /// everything spawned so far.
    ///
    /// Spawning again extends the batch: depths keep increasing and the
    /// joint state is rebuilt over the full unit set.
    pub fn spawn_units(&mut self, count: usize) {
        let start = self.start_depth + self.units.len() as u64;
        let batch = placement::place(start, count, &self.cfg, &mut self.rng);
        self.units.extend(batch);
        self.joint = self.entangler.entangle(&self.units);
    }

    /// Run the batch to its seal: collect, relabel, amplify, compose.
    ///
    /// Collection order equals unit order on every tier. The joint state
    /// consulted here is the one bound at spawn time.
    pub fn collapse(&mut self, context_token: &str) -> Result<String> {
        let mut readings = collect::collect(&self.units, context_token, self.cfg.tier)?;
        self.classifier.augment(&mut readings, &mut self.rng);
        amplifier::amplify(&mut readings);

        let seal = seal::compose(self.id, &readings, self.joint.as_ref());
        self.readings = readings;
        self.seal = Some(seal.clone());
        Ok(seal)
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn start_depth(&self) -> u64 {
        self.start_depth
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn joint_state(&self) -> Option<&JointState> {
        self.joint.as_ref()
    }

    /// Readings from the most recent collapse.
    pub fn last_readings(&self) -> &[Reading] {
        &self.readings
    }

    pub fn seal(&self) -> Option<&str> {
        self.seal.as_deref()
    }
}
