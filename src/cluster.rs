//! Generic k-means clustering over any value type.
//!
//! The engine knows nothing about images. Values, their distance and their
//! mean all come from a caller-supplied [`Space`]. Training follows Lloyd's
//! algorithm: every round recomputes each group's mean and then reclassifies
//! the full sample set against the new labels, stopping once the variance no
//! longer strictly decreases.

use log::{debug, warn};
use rand::seq::SliceRandom;

use crate::error::ClusterError;

/// Safety cap on Lloyd rounds in case the variance rule fails to bite.
const MAX_ROUNDS: usize = 64;

/// The distance/mean contract the engine clusters over.
pub trait Space {
    type Value: Clone;

    /// Distance between two values.
    fn dist(&self, a: &Self::Value, b: &Self::Value) -> f64;

    /// Mean of a group of values. Must return a usable value for an empty
    /// group; which fallback to use is the space's policy.
    fn mean(&self, values: &[Self::Value]) -> Self::Value;
}

/// A k-clustering: k labels and the partition of the samples under them.
///
/// Each `group(i)` holds exactly the samples that classified to `labels()[i]`
/// at construction time. Immutable once built; [`Clustering::iterate`]
/// produces a fresh clustering rather than editing this one.
#[derive(Debug)]
pub struct Clustering<S: Space> {
    space: S,
    labels: Vec<S::Value>,
    groups: Vec<Vec<S::Value>>,
}

impl<S: Space> Clustering<S> {
    fn new(space: S, samples: &[S::Value], labels: Vec<S::Value>) -> Self {
        let mut groups: Vec<Vec<S::Value>> = labels.iter().map(|_| Vec::new()).collect();
        for sample in samples {
            let i = nearest(&space, &labels, sample);
            groups[i].push(sample.clone());
        }
        Self {
            space,
            labels,
            groups,
        }
    }

    /// The number of clusters.
    pub fn k(&self) -> usize {
        self.labels.len()
    }

    /// The representative value of each cluster, by cluster index.
    pub fn labels(&self) -> &[S::Value] {
        &self.labels
    }

    /// The samples assigned to cluster `i`.
    pub fn group(&self, i: usize) -> &[S::Value] {
        &self.groups[i]
    }

    /// Index of the cluster whose label is closest to `v`.
    ///
    /// Ties break to the lowest index: the comparison is a strict `<`
    /// against the running minimum, so the first index reaching a given
    /// distance is never displaced by a later equal one.
    pub fn classify(&self, v: &S::Value) -> usize {
        nearest(&self.space, &self.labels, v)
    }

    /// Sum of squared distances from each sample to its cluster's label.
    pub fn variance(&self) -> f64 {
        let mut total = 0.0;
        for (label, group) in self.labels.iter().zip(&self.groups) {
            for sample in group {
                let d = self.space.dist(label, sample);
                total += d * d;
            }
        }
        total
    }

    /// One Lloyd round: labels become the current group means, and the full
    /// sample set is reclassified against them.
    pub fn iterate(&self) -> Self
    where
        S: Clone,
    {
        let labels: Vec<S::Value> = self.groups.iter().map(|g| self.space.mean(g)).collect();
        let samples: Vec<S::Value> = self.groups.iter().flatten().cloned().collect();
        Clustering::new(self.space.clone(), &samples, labels)
    }
}

#[inline]
fn nearest<S: Space>(space: &S, labels: &[S::Value], v: &S::Value) -> usize {
    let mut closest = 0;
    let mut closest_dist = f64::INFINITY;
    for (i, label) in labels.iter().enumerate() {
        let d = space.dist(label, v);
        if d < closest_dist {
            closest_dist = d;
            closest = i;
        }
    }
    closest
}

/// Cluster `samples` into `k` groups, drawing the initial labels at random
/// without replacement from a shuffled copy of the input.
pub fn cluster<S>(space: S, samples: &[S::Value], k: usize) -> Result<Clustering<S>, ClusterError>
where
    S: Space + Clone,
{
    if k == 0 || k > samples.len() {
        return Err(ClusterError::InsufficientSamples {
            requested: k,
            available: samples.len(),
        });
    }
    let mut shuffled: Vec<S::Value> = samples.to_vec();
    shuffled.shuffle(&mut rand::thread_rng());
    let seeds = shuffled[..k].to_vec();
    cluster_with_seeds(space, &shuffled, seeds)
}

/// Cluster with caller-supplied initial labels.
///
/// Runs the convergence loop until an iteration fails to strictly decrease
/// the variance, then returns the best clustering seen. Hitting the round
/// budget logs a warning and returns the best so far rather than failing.
pub fn cluster_with_seeds<S>(
    space: S,
    samples: &[S::Value],
    seeds: Vec<S::Value>,
) -> Result<Clustering<S>, ClusterError>
where
    S: Space + Clone,
{
    if seeds.is_empty() {
        return Err(ClusterError::InsufficientSamples {
            requested: 0,
            available: samples.len(),
        });
    }

    let mut best = Clustering::new(space, samples, seeds);
    let mut best_variance = best.variance();
    for round in 0..MAX_ROUNDS {
        let next = best.iterate();
        let next_variance = next.variance();
        if next_variance >= best_variance {
            debug!("clustering converged after {round} rounds at variance {best_variance}");
            return Ok(best);
        }
        best = next;
        best_variance = next_variance;
    }
    warn!("clustering stopped at the {MAX_ROUNDS}-round budget, keeping variance {best_variance}");
    Ok(best)
}
