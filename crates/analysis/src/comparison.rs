//! Placement of observed divergence within a simulated neutral band.

use rrnevo_sim::ensemble::{SummaryPoint, SummarySeries};
use rrnevo_sim::simulation::StrainPreset;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::observed::ObservedSeries;

/// Where an observed value falls relative to a summary point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BandPosition {
    /// Below the smallest simulated value
    BelowRange,
    /// Between the minimum and the first quartile
    LowerTail,
    /// Within the interquartile range (inclusive)
    Interquartile,
    /// Between the third quartile and the maximum (inclusive)
    UpperTail,
    /// Above the largest simulated value
    AboveRange,
}

impl BandPosition {
    pub fn classify(value: f64, band: &SummaryPoint) -> Self {
        if value < band.min {
            BandPosition::BelowRange
        } else if value < band.q25 {
            BandPosition::LowerTail
        } else if value <= band.q75 {
            BandPosition::Interquartile
        } else if value <= band.max {
            BandPosition::UpperTail
        } else {
            BandPosition::AboveRange
        }
    }

    /// Whether the value lies outside [min, max].
    pub fn is_outside(self) -> bool {
        matches!(self, BandPosition::BelowRange | BandPosition::AboveRange)
    }

    pub fn label(self) -> &'static str {
        match self {
            BandPosition::BelowRange => "below range",
            BandPosition::LowerTail => "lower tail",
            BandPosition::Interquartile => "interquartile",
            BandPosition::UpperTail => "upper tail",
            BandPosition::AboveRange => "above range",
        }
    }
}

impl fmt::Display for BandPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One observed point against the band at the nearest sampled generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointComparison {
    pub generation: usize,
    pub observed: f64,
    pub band: SummaryPoint,
    pub position: BandPosition,
}

/// All points of one strain against one band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrainComparison {
    pub strain: String,
    /// Preset the band was simulated with, `None` for custom rates
    pub preset: Option<StrainPreset>,
    pub points: Vec<PointComparison>,
}

impl StrainComparison {
    /// Name of the band's rate source.
    pub fn band_label(&self) -> &'static str {
        self.preset.map_or("custom", StrainPreset::name)
    }

    /// Points outside the simulated [min, max] range.
    pub fn outside_range(&self) -> usize {
        self.points.iter().filter(|p| p.position.is_outside()).count()
    }
}

/// Compare a strain's observed series against `band`.
///
/// Points are matched to the summary point at the nearest sampled
/// generation. An empty band yields no comparisons.
pub fn compare_series(series: &ObservedSeries, band: &SummarySeries) -> StrainComparison {
    let points = series
        .points
        .iter()
        .filter_map(|point| {
            let nearest = band.nearest(point.generation)?;
            Some(PointComparison {
                generation: point.generation,
                observed: point.divergence,
                band: *nearest,
                position: BandPosition::classify(point.divergence, nearest),
            })
        })
        .collect();

    StrainComparison {
        strain: series.strain.clone(),
        preset: Some(series.preset()),
        points,
    }
}
