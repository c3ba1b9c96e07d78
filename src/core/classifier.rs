//! Optional relabeling pass over a batch of readings.
//!
//! A small feed-forward network trains on the batch's own labels and then
//! relabels that same batch. There is no train/test split on purpose: the
//! network learns the current labeling and echoes its fit back as augmented
//! labels. Do not "fix" this into a held-out split; the self-labeling loop
//! is the behavior.

use ndarray::{Array1, Array2, Axis};
use tracing::debug;

use crate::prng::Prng;
use crate::unit::{Reading, LABEL_CREST, LABEL_DRIFT, LABEL_TROUGH};

/// Fixed hidden width of the relabeling network.
const HIDDEN_WIDTH: usize = 128;
/// Input features per reading: x, y, depth, qualia.
const FEATURES: usize = 4;
/// Output categories.
const CATEGORIES: usize = 3;

/// Capability provider for the relabeling pass.
///
/// `Disabled` is the pass-through stub: readings come back untouched, with
/// no augmented labels attached.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Classifier {
    Network {
        hidden_layers: usize,
        passes: usize,
        rate: f32,
    },
    Disabled,
}

impl Classifier {
    /// Train on the batch, then relabel the same batch.
    ///
    /// Every reading gets an augmented label from the trained network's
    /// argmax category. Weight init draws from the segment PRNG, so a fixed
    /// seed reproduces the relabeling exactly.
    pub fn augment(&self, readings: &mut [Reading], rng: &mut Prng) {
        match *self {
            Classifier::Disabled => {
                debug!("relabeling capability disabled, readings pass through");
            }
            Classifier::Network {
                hidden_layers,
                passes,
                rate,
            } => {
                if readings.is_empty() {
                    return;
                }

                let inputs: Vec<Array1<f32>> = readings.iter().map(features).collect();
                let targets: Vec<usize> = readings.iter().map(|r| category(&r.label)).collect();

                let mut net = Network::new(hidden_layers, rng);
                net.train(&inputs, &targets, passes, rate);

                for (reading, input) in readings.iter_mut().zip(&inputs) {
                    let class = net.predict(input);
                    reading.augmented_label = Some(label_for(class).to_string());
                }
            }
        }
    }
}

fn features(r: &Reading) -> Array1<f32> {
    Array1::from(vec![
        r.position.x as f32,
        r.position.y as f32,
        r.depth as f32,
        r.qualia as f32,
    ])
}

/// CREST maps to 0, TROUGH to 1, anything else to 2.
fn category(label: &str) -> usize {
    match label {
        LABEL_CREST => 0,
        LABEL_TROUGH => 1,
        _ => 2,
    }
}

fn label_for(class: usize) -> &'static str {
    match class {
        0 => LABEL_CREST,
        1 => LABEL_TROUGH,
        _ => LABEL_DRIFT,
    }
}

/// Dense layer with Xavier-initialized weights.
#[derive(Debug, Clone)]
struct Dense {
    w: Array2<f32>,
    b: Array1<f32>,
}

impl Dense {
    fn new(input_dim: usize, output_dim: usize, rng: &mut Prng) -> Self {
        let scale = (2.0 / (input_dim + output_dim) as f64).sqrt();
        let w = Array2::from_shape_fn((output_dim, input_dim), |_| {
            (rng.next_gaussian() * scale) as f32
        });
        let b = Array1::zeros(output_dim);
        Self { w, b }
    }

    fn forward(&self, x: &Array1<f32>) -> Array1<f32> {
        self.w.dot(x) + &self.b
    }
}

/// Feed-forward relabeler: 4 -> 128 -> … -> 3 with ReLU between layers.
#[derive(Debug, Clone)]
struct Network {
    layers: Vec<Dense>,
}

impl Network {
    fn new(hidden_layers: usize, rng: &mut Prng) -> Self {
        let mut layers = Vec::with_capacity(hidden_layers + 1);
        layers.push(Dense::new(FEATURES, HIDDEN_WIDTH, rng));
        for _ in 1..hidden_layers {
            layers.push(Dense::new(HIDDEN_WIDTH, HIDDEN_WIDTH, rng));
        }
        layers.push(Dense::new(HIDDEN_WIDTH, CATEGORIES, rng));
        Self { layers }
    }

    /// Forward pass keeping pre-activations and activations for backprop.
    fn forward_trace(&self, x: &Array1<f32>) -> (Vec<Array1<f32>>, Vec<Array1<f32>>) {
        let mut pre = Vec::with_capacity(self.layers.len());
        let mut act = Vec::with_capacity(self.layers.len() + 1);
        let mut current = x.clone();
        act.push(current.clone());

        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&current);
            current = if i + 1 < self.layers.len() {
                z.mapv(relu)
            } else {
                z.clone()
            };
            pre.push(z);
            act.push(current.clone());
        }

        (pre, act)
    }

    /// Full-batch softmax cross-entropy, plain gradient descent.
    fn train(&mut self, inputs: &[Array1<f32>], targets: &[usize], passes: usize, rate: f32) {
        let batch = inputs.len() as f32;

        for _ in 0..passes {
            let mut grad_w: Vec<Array2<f32>> = self
                .layers
                .iter()
                .map(|l| Array2::zeros(l.w.raw_dim()))
                .collect();
            let mut grad_b: Vec<Array1<f32>> = self
                .layers
                .iter()
                .map(|l| Array1::zeros(l.b.raw_dim()))
                .collect();

            for (input, &target) in inputs.iter().zip(targets) {
                let (pre, act) = self.forward_trace(input);

                // Softmax cross-entropy gradient at the logits.
                let mut delta = softmax(&act[self.layers.len()]);
                delta[target] -= 1.0;

                for layer_idx in (0..self.layers.len()).rev() {
                    let col = delta.view().insert_axis(Axis(1));
                    let row = act[layer_idx].view().insert_axis(Axis(0));
                    grad_w[layer_idx] = &grad_w[layer_idx] + &col.dot(&row);
                    grad_b[layer_idx] = &grad_b[layer_idx] + &delta;

                    if layer_idx > 0 {
                        let back = self.layers[layer_idx].w.t().dot(&delta);
                        let mask = pre[layer_idx - 1].mapv(|v| if v > 0.0 { 1.0 } else { 0.0 });
                        delta = back * mask;
                    }
                }
            }

            for (layer, (gw, gb)) in self
                .layers
                .iter_mut()
                .zip(grad_w.into_iter().zip(grad_b.into_iter()))
            {
                layer.w = &layer.w - &(gw * (rate / batch));
                layer.b = &layer.b - &(gb * (rate / batch));
            }
        }
    }

    fn logits(&self, x: &Array1<f32>) -> Array1<f32> {
        let mut current = x.clone();
        for (i, layer) in self.layers.iter().enumerate() {
            let z = layer.forward(&current);
            current = if i + 1 < self.layers.len() { z.mapv(relu) } else { z };
        }
        current
    }

    fn predict(&self, x: &Array1<f32>) -> usize {
        let out = self.logits(x);
        let mut best = 0;
        for (i, &v) in out.iter().enumerate() {
            if v > out[best] {
                best = i;
            }
        }
        best
    }
}

fn relu(v: f32) -> f32 {
    v.max(0.0)
}

/// Numerically stable softmax.
fn softmax(logits: &Array1<f32>) -> Array1<f32> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exp = logits.mapv(|v| (v - max).exp());
    let sum = exp.sum().max(1e-10);
    exp / sum
}
