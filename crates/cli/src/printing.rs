use anyhow::Result;
use rrnevo_analysis::{ObservedSeries, StrainComparison};
use rrnevo_sim::ensemble::SummarySeries;
use rrnevo_sim::simulation::Configuration;
use std::fmt::Write;

use crate::args::OutputFormat;

pub fn print_parameters(config: &Configuration) {
    let params = &config.parameters;
    let layout = &params.layout;

    println!("\n📋 Ensemble Configuration");
    println!("  • Runs: {} [-n, --runs]", config.execution.runs);
    match config.execution.seed {
        Some(seed) => println!("  • Random Seed: {seed} [--seed]"),
        None => println!("  • Random Seed: Random [--seed]"),
    }
    println!(
        "  • Generations: {} sampled every {} [-g, -i]",
        params.generations, params.sampling_interval
    );

    println!("\n🧬 Genome Structure");
    println!(
        "  • Operon Copies: {} ({}), reference {}",
        layout.copy_count(),
        layout.copies.join(", "),
        layout.reference
    );
    println!(
        "  • Loci: short {} bp, long {} bp",
        layout.short_length, layout.long_length
    );
    println!(
        "  • Initial Divergence: {} [-d, --initial-divergence]",
        params.initial_divergence
    );

    println!("\n⚡ Neutral Processes");
    if let Some(strain) = config.strain {
        println!("  • Strain: {} [-s, --strain]", strain.label());
    } else {
        println!("  • Strain: Custom rates");
    }
    println!(
        "  • Mutation Rate: {:.2e} /bp/gen [-m, --mutation-rate]",
        params.mutation_rate
    );
    println!(
        "  • Gene Conversion Rate: {:.2e} /pair/gen [-c, --gene-conversion-rate]",
        params.gene_conversion_rate
    );
    println!(
        "  • Tract Length: {}..{} bp",
        params.tract.min(),
        params.tract.max()
    );
    println!();
}

pub fn render_summary(series: &SummarySeries, format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = serde_json::to_string_pretty(series.points())?,
        OutputFormat::Csv => {
            out.push_str("generation,mean,median,q25,q75,min,max\n");
            for p in series.points() {
                writeln!(
                    out,
                    "{},{},{},{},{},{},{}",
                    p.generation, p.mean, p.median, p.q25, p.q75, p.min, p.max
                )?;
            }
        }
        OutputFormat::Pretty => {
            writeln!(
                out,
                "{:>10} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
                "Generation", "Mean", "Median", "Q25", "Q75", "Min", "Max"
            )?;
            for p in series.points() {
                writeln!(
                    out,
                    "{:>10} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.6} {:>10.6}",
                    p.generation, p.mean, p.median, p.q25, p.q75, p.min, p.max
                )?;
            }
        }
    }
    Ok(out)
}

pub fn render_observed(series: &[ObservedSeries], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = serde_json::to_string_pretty(series)?,
        OutputFormat::Csv => {
            out.push_str(
                "strain,generation,divergence,short_divergence,long_divergence,\
                 total_polymorphisms,short_count,long_count,files\n",
            );
            for s in series {
                for p in &s.points {
                    writeln!(
                        out,
                        "{},{},{},{},{},{},{},{},{}",
                        s.strain,
                        p.generation,
                        p.divergence,
                        p.short_divergence,
                        p.long_divergence,
                        p.total_polymorphisms,
                        p.short_count,
                        p.long_count,
                        p.file_count
                    )?;
                }
            }
        }
        OutputFormat::Pretty => {
            for s in series {
                let (first, last) = s.generation_range().unwrap_or_default();
                writeln!(
                    out,
                    "\n{} ({}, {} timepoints, generations {first}-{last})",
                    s.strain,
                    s.preset(),
                    s.points.len()
                )?;
                writeln!(
                    out,
                    "{:>10} {:>12} {:>12} {:>12} {:>8} {:>6}",
                    "Generation", "Divergence", "Short", "Long", "Sites", "Files"
                )?;
                for p in &s.points {
                    writeln!(
                        out,
                        "{:>10} {:>12.3e} {:>12.3e} {:>12.3e} {:>8} {:>6}",
                        p.generation,
                        p.divergence,
                        p.short_divergence,
                        p.long_divergence,
                        p.total_polymorphisms,
                        p.file_count
                    )?;
                }
            }
        }
    }
    Ok(out)
}

pub fn render_comparison(comparisons: &[StrainComparison], format: OutputFormat) -> Result<String> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => out = serde_json::to_string_pretty(comparisons)?,
        OutputFormat::Csv => {
            out.push_str("strain,preset,generation,band_generation,observed,min,q25,median,q75,max,position\n");
            for c in comparisons {
                for p in &c.points {
                    writeln!(
                        out,
                        "{},{},{},{},{},{},{},{},{},{},{}",
                        c.strain,
                        c.band_label(),
                        p.generation,
                        p.band.generation,
                        p.observed,
                        p.band.min,
                        p.band.q25,
                        p.band.median,
                        p.band.q75,
                        p.band.max,
                        p.position
                    )?;
                }
            }
        }
        OutputFormat::Pretty => {
            for c in comparisons {
                writeln!(
                    out,
                    "\n{} vs {} band: {} of {} points outside [min, max]",
                    c.strain,
                    c.band_label(),
                    c.outside_range(),
                    c.points.len()
                )?;
                for p in &c.points {
                    writeln!(
                        out,
                        "  gen {:>6} (band {:>6}): {:.3e} in [{:.3e}, {:.3e}] → {}",
                        p.generation, p.band.generation, p.observed, p.band.min, p.band.max, p.position
                    )?;
                }
            }
        }
    }
    Ok(out)
}
