//! Seeded isolation forest over normalized feature rows.
//!
//! Training is randomized but fully seeded, so repeated fits on identical
//! data produce identical forests. Inference walks the fitted trees without
//! any randomness, so verdicts are deterministic.
//!
//! The decision threshold is fixed after fitting at the (1 - contamination)
//! quantile of the training scores: roughly the configured fraction of the
//! training set scores above it, and only points scoring strictly above the
//! threshold are flagged at inference time.

use super::{FeatureRow, FEATURE_COUNT};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// Number of trees in the forest.
const TREE_COUNT: usize = 100;

/// Per-tree subsample cap.
const MAX_SAMPLE: usize = 256;

/// Euler-Mascheroni constant, used in the average-path normalization.
const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// One node of an isolation tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

/// A fitted isolation forest with a fixed decision threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IsolationForest {
    trees: Vec<Node>,
    sample_size: usize,
    threshold: f64,
}

impl IsolationForest {
    pub(crate) fn fit(rows: &[FeatureRow], contamination: f64, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let sample_size = rows.len().min(MAX_SAMPLE).max(1);
        let height_limit = (sample_size as f64).log2().ceil().max(1.0) as usize;

        let trees = (0..TREE_COUNT)
            .map(|_| {
                let mut sample: Vec<FeatureRow> = rows
                    .choose_multiple(&mut rng, sample_size)
                    .copied()
                    .collect();
                build_node(&mut sample, 0, height_limit, &mut rng)
            })
            .collect();

        let mut forest = Self {
            trees,
            sample_size,
            threshold: f64::INFINITY,
        };

        let mut scores: Vec<f64> = rows.iter().map(|row| forest.score(*row)).collect();
        scores.sort_by(f64::total_cmp);
        let cut = ((scores.len() as f64) * (1.0 - contamination)) as usize;
        forest.threshold = scores[cut.min(scores.len() - 1)];
        forest
    }

    /// Anomaly score in (0, 1]: higher means easier to isolate.
    pub fn score(&self, row: FeatureRow) -> f64 {
        let total: f64 = self
            .trees
            .iter()
            .map(|tree| path_length(tree, &row, 0.0))
            .sum();
        let avg_path = total / self.trees.len() as f64;
        let norm = average_path_length(self.sample_size);
        if norm <= 0.0 {
            return 0.5;
        }
        2f64.powf(-avg_path / norm)
    }

    /// Binary verdict for one point: does it score above the fitted
    /// training-quantile threshold?
    pub fn is_anomalous(&self, row: FeatureRow) -> bool {
        self.score(row) > self.threshold
    }
}

/// Recursively grow one isolation tree over a subsample.
fn build_node(sample: &mut [FeatureRow], depth: usize, limit: usize, rng: &mut StdRng) -> Node {
    if depth >= limit || sample.len() <= 1 {
        return Node::Leaf { size: sample.len() };
    }

    // Only features with spread in this subsample can be split on.
    let splittable: Vec<usize> = (0..FEATURE_COUNT)
        .filter(|&f| {
            let (min, max) = feature_bounds(sample, f);
            max > min
        })
        .collect();
    if splittable.is_empty() {
        return Node::Leaf { size: sample.len() };
    }

    let feature = splittable[rng.gen_range(0..splittable.len())];
    let (min, max) = feature_bounds(sample, feature);
    let threshold = rng.gen_range(min..max);

    let mid = partition(sample, feature, threshold);
    let (left_rows, right_rows) = sample.split_at_mut(mid);

    Node::Split {
        feature,
        threshold,
        left: Box::new(build_node(left_rows, depth + 1, limit, rng)),
        right: Box::new(build_node(right_rows, depth + 1, limit, rng)),
    }
}

/// Min/max of one feature across a subsample.
fn feature_bounds(sample: &[FeatureRow], feature: usize) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in sample {
        min = min.min(row[feature]);
        max = max.max(row[feature]);
    }
    (min, max)
}

/// In-place partition: rows with `row[feature] < threshold` first.
/// Returns the boundary index.
fn partition(sample: &mut [FeatureRow], feature: usize, threshold: f64) -> usize {
    let mut mid = 0;
    for i in 0..sample.len() {
        if sample[i][feature] < threshold {
            sample.swap(i, mid);
            mid += 1;
        }
    }
    mid
}

/// Walk one tree, returning the path length to the point's leaf plus the
/// expected remaining depth for the leaf's population.
fn path_length(node: &Node, row: &FeatureRow, depth: f64) -> f64 {
    match node {
        Node::Leaf { size } => depth + average_path_length(*size),
        Node::Split {
            feature,
            threshold,
            left,
            right,
        } => {
            if row[*feature] < *threshold {
                path_length(left, row, depth + 1.0)
            } else {
                path_length(right, row, depth + 1.0)
            }
        }
    }
}

/// Expected path length of an unsuccessful BST search over `n` points.
fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}
