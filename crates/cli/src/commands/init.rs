use anyhow::{Context, Result};

use crate::args::InitArgs;
use crate::printing::print_parameters;

pub fn init_config(args: &InitArgs) -> Result<()> {
    println!("🧬 rrnevo - rRNA Operon Neutral Model");
    println!("============================================\n");

    let config = args.model.apply(None)?;
    print_parameters(&config);

    config
        .to_json_file(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("✓ Configuration written: {}", args.output.display());
    println!(
        "\n💡 Use 'rrnevo simulate --config {}' to run the ensemble",
        args.output.display()
    );

    Ok(())
}
