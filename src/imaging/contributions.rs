//! Per-axis contribution tables for separable resampling.
//!
//! For each output coordinate the table lists which source samples feed it
//! and with what weight. Tables are built once per axis and shared by every
//! row (horizontal pass) or column (vertical pass), so each output sample on
//! an axis is always computed from the same weights in the same order.

use super::kernel::Kernel;

/// Weights below this sum are treated as "no coverage" and replaced by a
/// single nearest-sample entry.
const MIN_WEIGHT_SUM: f64 = 1e-12;

/// Contiguous run of source samples feeding one output sample.
#[derive(Debug, Clone, PartialEq)]
pub struct Contribution {
    /// First source index.
    pub start: usize,
    /// Normalized weights for `start..start + weights.len()`; they sum to 1.
    pub weights: Vec<f32>,
}

impl Contribution {
    /// `(source index, weight)` pairs in ascending index order.
    pub fn pairs(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.weights
            .iter()
            .enumerate()
            .map(move |(i, &w)| (self.start + i, w))
    }

    pub fn end(&self) -> usize {
        self.start + self.weights.len()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContributionTable {
    entries: Vec<Contribution>,
}

impl ContributionTable {
    /// Build the table mapping `source_len` samples onto `target_len` samples.
    ///
    /// The output sample `o` is centred at `c = (o + 0.5) * scale - 0.5` in
    /// source space, with `scale = source_len / target_len`. When downscaling
    /// the kernel is stretched by `scale` so every skipped source sample is
    /// still integrated. Indices that fall off either edge are clamped onto the
    /// edge sample (edge replication) and the weights are renormalized.
    ///
    /// Both lengths must be at least 1.
    pub fn build(kernel: Kernel, source_len: usize, target_len: usize) -> Self {
        debug_assert!(source_len > 0 && target_len > 0);
        let scale = source_len as f64 / target_len as f64;
        let filter_scale = scale.max(1.0);
        let support = kernel.radius() * filter_scale;
        let last = source_len as isize - 1;

        let entries = (0..target_len)
            .map(|o| {
                let center = (o as f64 + 0.5) * scale - 0.5;
                let first = (center - support).ceil() as isize;
                let end = (center + support).floor() as isize;

                let start = first.clamp(0, last);
                let stop = end.clamp(0, last);
                let mut weights = vec![0.0f64; (stop - start) as usize + 1];
                let mut sum = 0.0;

                for i in first..=end {
                    let w = kernel.weight((i as f64 - center) / filter_scale);
                    weights[(i.clamp(0, last) - start) as usize] += w;
                    sum += w;
                }

                if sum.abs() < MIN_WEIGHT_SUM {
                    // Degenerate coverage: fall back to the closest sample.
                    let nearest = (center.round() as isize).clamp(0, last);
                    return Contribution {
                        start: nearest as usize,
                        weights: vec![1.0],
                    };
                }

                Contribution {
                    start: start as usize,
                    weights: weights.into_iter().map(|w| (w / sum) as f32).collect(),
                }
            })
            .collect();

        Self { entries }
    }

    /// Number of output samples on this axis.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Contribution> {
        self.entries.get(index)
    }

    pub fn entries(&self) -> &[Contribution] {
        &self.entries
    }

    /// Total number of `(index, weight)` pairs across all entries.
    pub fn taps(&self) -> usize {
        self.entries.iter().map(|c| c.weights.len()).sum()
    }
}
