pub mod compare;
pub mod init;
pub mod observe;
pub mod presets;
pub mod simulate;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rrnevo_sim::ensemble::{EnsembleObserver, EnsembleRunner, SummarySeries};
use rrnevo_sim::simulation::Configuration;
use std::fs;
use std::path::PathBuf;

/// Ticks a progress bar once per completed run.
struct ProgressObserver {
    bar: ProgressBar,
}

impl EnsembleObserver for ProgressObserver {
    fn on_run_complete(&self, _completed: usize, _total: usize) {
        self.bar.inc(1);
    }
}

/// Run the ensemble described by `config` and summarize it.
pub fn run_ensemble(config: &Configuration, show_progress: bool) -> Result<SummarySeries> {
    let runner = EnsembleRunner::from_config(config).context("Invalid simulation parameters")?;

    let bar = if show_progress {
        let bar = ProgressBar::new(runner.runs() as u64);
        bar.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} runs ({eta})",
                )?
                .progress_chars("#>-"),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let observer = ProgressObserver { bar };
    let outcome = runner
        .run_with(&observer)
        .context("Failed to run ensemble")?;
    observer.bar.finish_and_clear();

    if outcome.cancelled {
        anyhow::bail!(
            "Ensemble stopped after {} of {} runs",
            outcome.completed,
            outcome.requested
        );
    }
    Ok(outcome.ensemble.summarize())
}

/// Write `content` to `output`, or to stdout.
pub fn emit(content: &str, output: Option<&PathBuf>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            println!("✓ Output written to: {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}
