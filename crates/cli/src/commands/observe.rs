use anyhow::{Context, Result};
use rrnevo_analysis::{aggregate, ObservedLoci, ObservedReader};

use crate::args::{ObserveArgs, OutputFormat};
use crate::commands::emit;
use crate::printing::render_observed;

pub fn observe_files(args: &ObserveArgs) -> Result<()> {
    let reader = ObservedReader::new()?;
    let files = reader
        .load_files(&args.files)
        .context("Failed to load observed data")?;
    if files.is_empty() {
        anyhow::bail!("None of the {} files has a parsable name", args.files.len());
    }

    let series = aggregate(&files, &ObservedLoci::default());
    if args.output.is_some() || args.format == OutputFormat::Pretty {
        println!(
            "📊 Observed divergence: {} files, {} strains",
            files.len(),
            series.len()
        );
    }
    emit(&render_observed(&series, args.format)?, args.output.as_ref())
}
