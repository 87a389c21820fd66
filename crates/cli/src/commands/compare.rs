use anyhow::{Context, Result};
use log::info;
use rrnevo_analysis::{aggregate, compare_series, ObservedLoci, ObservedReader, ObservedSeries};
use rrnevo_sim::ensemble::SummarySeries;
use rrnevo_sim::simulation::{Configuration, StrainPreset};
use std::collections::HashMap;

use crate::args::{load_config, CompareArgs, OutputFormat};
use crate::commands::{emit, run_ensemble};
use crate::printing::{print_parameters, render_comparison};

/// Rates the band of one strain is simulated with.
///
/// Preset rates follow each lineage only while the configuration itself
/// came from a preset; custom rates, from flags or a loaded file, give one
/// band for every strain.
fn band_preset(config: &Configuration, series: &ObservedSeries) -> Option<StrainPreset> {
    config.strain.map(|_| series.preset())
}

pub fn compare_files(args: &CompareArgs) -> Result<()> {
    let reader = ObservedReader::new()?;
    let files = reader
        .load_files(&args.files)
        .context("Failed to load observed data")?;
    if files.is_empty() {
        anyhow::bail!("None of the {} files has a parsable name", args.files.len());
    }
    let observed = aggregate(&files, &ObservedLoci::default());

    let base = args.model.apply(load_config(args.config.as_ref())?)?;
    let chatty = args.output.is_some() || args.format == OutputFormat::Pretty;
    // An explicit --strain applies to every lineage
    let forced = args.model.strain.is_some();

    let mut bands: HashMap<Option<StrainPreset>, SummarySeries> = HashMap::new();
    let mut comparisons = Vec::with_capacity(observed.len());
    for series in &observed {
        let preset = if forced {
            base.strain
        } else {
            band_preset(&base, series)
        };

        if !bands.contains_key(&preset) {
            let mut config = base.clone();
            if let Some(preset) = preset {
                config.parameters.mutation_rate = preset.mutation_rate();
                config.parameters.gene_conversion_rate = preset.gene_conversion_rate();
                config.strain = Some(preset);
            }

            match preset {
                Some(preset) => info!("Simulating {preset} band for {}", series.strain),
                None => info!("Simulating custom-rate band for {}", series.strain),
            }
            if chatty {
                print_parameters(&config);
            }
            bands.insert(preset, run_ensemble(&config, chatty && !args.no_progress)?);
        }

        let band = bands.get(&preset).context("Missing band for preset")?;
        let mut comparison = compare_series(series, band);
        comparison.preset = preset;
        comparisons.push(comparison);
    }

    emit(&render_comparison(&comparisons, args.format)?, args.output.as_ref())
}
