//! Seeded k-means over planar `(lat, lng)` samples.
//!
//! k-means++ seeding from a `ChaCha8Rng`, Lloyd iterations, and several
//! restarts of which the lowest-inertia labelling wins. The same seed and
//! input always produce the same labels.

use rand::distributions::{Distribution, WeightedIndex};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tuning for the day clustering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KMeansOptions {
    /// Seed for center initialization.
    pub seed: u64,
    /// Maximum Lloyd iterations per restart.
    pub max_iterations: usize,
    /// Number of independently seeded runs; the lowest inertia wins.
    pub restarts: usize,
    /// Convergence threshold on center movement, relative to the mean
    /// coordinate variance.
    pub tolerance: f64,
}

impl Default for KMeansOptions {
    fn default() -> Self {
        Self {
            seed: 0,
            max_iterations: 300,
            restarts: 10,
            tolerance: 1e-4,
        }
    }
}

type Sample = [f64; 2];

/// Labels each sample with a cluster in `0..k`.
///
/// Callers guarantee `0 < k <= samples.len()`.
pub(crate) fn kmeans(samples: &[Sample], k: usize, options: &KMeansOptions) -> Vec<usize> {
    debug_assert!(k > 0 && k <= samples.len());

    let mut rng = ChaCha8Rng::seed_from_u64(options.seed);
    let threshold = options.tolerance * mean_variance(samples);

    let mut best: Option<(f64, Vec<usize>)> = None;
    for _ in 0..options.restarts.max(1) {
        let centers = seed_centers(samples, k, &mut rng);
        let (labels, inertia) = lloyd(samples, centers, options.max_iterations, threshold);
        if best.as_ref().is_none_or(|(best_inertia, _)| inertia < *best_inertia) {
            best = Some((inertia, labels));
        }
    }

    best.map(|(_, labels)| labels).unwrap_or_default()
}

/// k-means++: each further center is drawn with probability proportional to
/// its squared distance from the nearest center chosen so far.
fn seed_centers(samples: &[Sample], k: usize, rng: &mut ChaCha8Rng) -> Vec<Sample> {
    let mut centers = Vec::with_capacity(k);
    let first = samples[rng.gen_range(0..samples.len())];
    centers.push(first);

    let mut closest: Vec<f64> = samples.iter().map(|s| squared_distance(*s, first)).collect();

    while centers.len() < k {
        let next = match WeightedIndex::new(&closest) {
            Ok(weights) => weights.sample(&mut *rng),
            // Every sample already coincides with a center.
            Err(_) => rng.gen_range(0..samples.len()),
        };
        let center = samples[next];
        centers.push(center);

        for (distance, sample) in closest.iter_mut().zip(samples) {
            *distance = distance.min(squared_distance(*sample, center));
        }
    }

    centers
}

fn lloyd(
    samples: &[Sample],
    mut centers: Vec<Sample>,
    max_iterations: usize,
    threshold: f64,
) -> (Vec<usize>, f64) {
    let mut labels = assign(samples, &centers);

    for _ in 0..max_iterations {
        let updated = recenter(samples, &labels, &centers);
        let shift: f64 = centers
            .iter()
            .zip(&updated)
            .map(|(old, new)| squared_distance(*old, *new))
            .sum();
        centers = updated;
        labels = assign(samples, &centers);

        if shift <= threshold {
            break;
        }
    }

    let inertia = samples
        .iter()
        .zip(&labels)
        .map(|(sample, &label)| squared_distance(*sample, centers[label]))
        .sum();

    (labels, inertia)
}

/// Nearest center per sample; ties go to the lower center index.
fn assign(samples: &[Sample], centers: &[Sample]) -> Vec<usize> {
    samples
        .iter()
        .map(|sample| {
            let mut best_cluster = 0;
            let mut best_dist = f64::INFINITY;
            for (j, center) in centers.iter().enumerate() {
                let dist = squared_distance(*sample, *center);
                if dist < best_dist {
                    best_dist = dist;
                    best_cluster = j;
                }
            }
            best_cluster
        })
        .collect()
}

/// Moves each center to the mean of its members. Empty clusters keep their center.
fn recenter(samples: &[Sample], labels: &[usize], centers: &[Sample]) -> Vec<Sample> {
    let mut sums = vec![[0.0, 0.0]; centers.len()];
    let mut counts = vec![0usize; centers.len()];
    for (sample, &label) in samples.iter().zip(labels) {
        sums[label][0] += sample[0];
        sums[label][1] += sample[1];
        counts[label] += 1;
    }

    centers
        .iter()
        .zip(sums.iter().zip(&counts))
        .map(|(center, (sum, &count))| {
            if count == 0 {
                *center
            } else {
                [sum[0] / count as f64, sum[1] / count as f64]
            }
        })
        .collect()
}

fn mean_variance(samples: &[Sample]) -> f64 {
    let n = samples.len() as f64;
    let mut variance = 0.0;
    for axis in 0..2 {
        let mean = samples.iter().map(|s| s[axis]).sum::<f64>() / n;
        variance += samples.iter().map(|s| (s[axis] - mean).powi(2)).sum::<f64>() / n;
    }
    variance / 2.0
}

fn squared_distance(a: Sample, b: Sample) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2)
}
