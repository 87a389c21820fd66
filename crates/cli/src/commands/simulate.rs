use anyhow::Result;

use crate::args::{load_config, OutputFormat, SimulateArgs};
use crate::commands::{emit, run_ensemble};
use crate::printing::{print_parameters, render_summary};

pub fn run_simulation(args: &SimulateArgs) -> Result<()> {
    let config = args.model.apply(load_config(args.config.as_ref())?)?;

    // Machine-readable output on stdout stays clean
    let chatty = args.output.is_some() || args.format == OutputFormat::Pretty;
    if chatty {
        println!("🧬 rrnevo - Running Ensemble");
        println!("============================================");
        print_parameters(&config);
    }

    let series = run_ensemble(&config, chatty && !args.no_progress)?;

    if chatty {
        println!("📈 Summary Series ({} points)\n", series.len());
    }
    emit(&render_summary(&series, args.format)?, args.output.as_ref())
}
