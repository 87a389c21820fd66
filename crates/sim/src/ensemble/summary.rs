//! Cross-run summary statistics.
//!
//! Quantiles use nearest-rank indices into the sorted values: the median is
//! the element at `floor(n / 2)` (the upper-middle element for even `n`)
//! and the quartiles are at `floor(n * 0.25)` and `floor(n * 0.75)`. No
//! interpolation is done.

use serde::{Deserialize, Serialize};

use crate::simulation::Trajectory;

/// Statistics of one sampled generation across the runs of an ensemble.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryPoint {
    pub generation: usize,
    pub mean: f64,
    /// Sorted value at index `floor(n / 2)`; the upper of the two middle
    /// values for even `n`, never their average
    pub median: f64,
    pub q25: f64,
    pub q75: f64,
    pub min: f64,
    pub max: f64,
}

impl SummaryPoint {
    /// Summarize `values` at `generation`. Sorts `values` in place.
    /// Returns `None` for an empty slice.
    pub fn from_values(generation: usize, values: &mut [f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        values.sort_by(f64::total_cmp);

        let n = values.len();
        let mean = values.iter().sum::<f64>() / n as f64;
        let rank = |q: f64| values[((n as f64 * q).floor() as usize).min(n - 1)];

        Some(Self {
            generation,
            mean,
            median: values[n / 2],
            q25: rank(0.25),
            q75: rank(0.75),
            min: values[0],
            max: values[n - 1],
        })
    }

    /// Width of the interquartile range.
    pub fn iqr(&self) -> f64 {
        self.q75 - self.q25
    }
}

/// Summary points ordered by generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummarySeries {
    points: Vec<SummaryPoint>,
}

impl SummarySeries {
    pub fn from_points(points: Vec<SummaryPoint>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[SummaryPoint] {
        &self.points
    }

    /// The point at exactly `generation`.
    pub fn at(&self, generation: usize) -> Option<&SummaryPoint> {
        self.points
            .binary_search_by_key(&generation, |p| p.generation)
            .ok()
            .map(|idx| &self.points[idx])
    }

    /// The point whose generation is closest to `generation`. Ties go to
    /// the earlier point.
    pub fn nearest(&self, generation: usize) -> Option<&SummaryPoint> {
        self.points
            .iter()
            .min_by_key(|p| p.generation.abs_diff(generation))
    }

    /// The last sampled generation.
    pub fn final_point(&self) -> Option<&SummaryPoint> {
        self.points.last()
    }
}

/// Summarize an ensemble's trajectories generation by generation.
///
/// The generations are those of the first trajectory. A trajectory missing
/// a generation is skipped for that generation only. An empty ensemble
/// yields an empty series.
pub fn summarize(trajectories: &[Trajectory]) -> SummarySeries {
    let Some(first) = trajectories.first() else {
        return SummarySeries::default();
    };

    let mut values = Vec::with_capacity(trajectories.len());
    let points = first
        .generations()
        .filter_map(|generation| {
            values.clear();
            values.extend(
                trajectories
                    .iter()
                    .filter_map(|t| t.at(generation))
                    .map(|p| p.divergence),
            );
            SummaryPoint::from_values(generation, &mut values)
        })
        .collect();

    SummarySeries::from_points(points)
}
