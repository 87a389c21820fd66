//! Observed divergence from mutation-call tables.
//!
//! Each file holds the polymorphisms called in one population sample.
//! Samples of the same strain at the same generation are pooled, each
//! polymorphic site is counted once at its highest frequency, and the
//! frequencies are summed per locus and divided by the locus length.

use rrnevo_sim::genome::{LONG_LOCUS_LENGTH, SHORT_LOCUS_LENGTH};
use rrnevo_sim::simulation::StrainPreset;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Lineages carrying a mutator phenotype.
pub const MUTATOR_LINEAGES: [&str; 6] = ["Ara-1", "Ara-2", "Ara-3", "Ara-4", "Ara+3", "Ara+6"];

/// Strain preset matching an observed lineage.
pub fn lineage_preset(strain: &str) -> StrainPreset {
    if MUTATOR_LINEAGES
        .iter()
        .any(|lineage| lineage.eq_ignore_ascii_case(strain))
    {
        StrainPreset::Mutator
    } else {
        StrainPreset::Normal
    }
}

/// One row of a mutation-call table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MutationCall {
    pub seq_id: String,
    pub position: u64,
    pub ref_base: String,
    pub new_base: String,
    pub new_cov: Option<u64>,
    pub ref_cov: Option<u64>,
    pub total_cov: Option<u64>,
    /// Fraction of reads carrying the new base
    pub frequency: f64,
}

/// A parsed mutation-call file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedFile {
    pub name: String,
    pub strain: String,
    pub generation: usize,
    pub file_id: String,
    pub calls: Vec<MutationCall>,
}

/// Sequence ids and lengths of the two observed loci.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObservedLoci {
    pub short_id: String,
    pub long_id: String,
    pub short_length: usize,
    pub long_length: usize,
}

impl Default for ObservedLoci {
    fn default() -> Self {
        Self {
            short_id: "rrsB".to_string(),
            long_id: "rrlB".to_string(),
            short_length: SHORT_LOCUS_LENGTH,
            long_length: LONG_LOCUS_LENGTH,
        }
    }
}

/// Divergence of one strain at one generation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservedPoint {
    pub generation: usize,
    /// Frequency sum over both loci divided by their combined length
    pub divergence: f64,
    pub short_divergence: f64,
    pub long_divergence: f64,
    /// Distinct polymorphic sites, any sequence id
    pub total_polymorphisms: usize,
    pub short_count: usize,
    pub long_count: usize,
    /// Files pooled into this point
    pub file_count: usize,
}

/// All observed points of one strain, ordered by generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservedSeries {
    pub strain: String,
    pub points: Vec<ObservedPoint>,
}

impl ObservedSeries {
    /// Preset whose neutral band applies to this strain.
    pub fn preset(&self) -> StrainPreset {
        lineage_preset(&self.strain)
    }

    /// First and last observed generation.
    pub fn generation_range(&self) -> Option<(usize, usize)> {
        Some((self.points.first()?.generation, self.points.last()?.generation))
    }
}

/// Pool `files` by (strain, generation) and compute divergence per pool.
///
/// Series are ordered by strain name, points by generation.
pub fn aggregate(files: &[ObservedFile], loci: &ObservedLoci) -> Vec<ObservedSeries> {
    let mut pools: BTreeMap<(&str, usize), Vec<&ObservedFile>> = BTreeMap::new();
    for file in files {
        pools
            .entry((file.strain.as_str(), file.generation))
            .or_default()
            .push(file);
    }

    let mut strains: BTreeMap<&str, Vec<ObservedPoint>> = BTreeMap::new();
    for ((strain, generation), pool) in pools {
        let point = pool_point(generation, &pool, loci);
        strains.entry(strain).or_default().push(point);
    }

    strains
        .into_iter()
        .map(|(strain, points)| ObservedSeries {
            strain: strain.to_string(),
            points,
        })
        .collect()
}

fn pool_point(generation: usize, pool: &[&ObservedFile], loci: &ObservedLoci) -> ObservedPoint {
    // Highest frequency per site; ties keep the first call seen
    let mut sites: HashMap<(&str, u64), &MutationCall> = HashMap::new();
    for call in pool.iter().flat_map(|file| file.calls.iter()) {
        sites
            .entry((call.seq_id.as_str(), call.position))
            .and_modify(|best| {
                if best.frequency < call.frequency {
                    *best = call;
                }
            })
            .or_insert(call);
    }

    let (mut short_sum, mut short_count) = (0.0, 0);
    let (mut long_sum, mut long_count) = (0.0, 0);
    for call in sites.values() {
        if call.seq_id == loci.short_id {
            short_sum += call.frequency;
            short_count += 1;
        } else if call.seq_id == loci.long_id {
            long_sum += call.frequency;
            long_count += 1;
        }
    }

    ObservedPoint {
        generation,
        divergence: ratio(short_sum + long_sum, loci.short_length + loci.long_length),
        short_divergence: ratio(short_sum, loci.short_length),
        long_divergence: ratio(long_sum, loci.long_length),
        total_polymorphisms: sites.len(),
        short_count,
        long_count,
        file_count: pool.len(),
    }
}

fn ratio(sum: f64, length: usize) -> f64 {
    if length == 0 {
        0.0
    } else {
        sum / length as f64
    }
}
