use anyhow::Result;
use rrnevo_analysis::MUTATOR_LINEAGES;
use rrnevo_sim::evolution::TractLength;
use rrnevo_sim::simulation::StrainPreset;

pub fn list_presets() -> Result<()> {
    println!("\n🧫 Strain Presets");
    println!("{}", "=".repeat(50));

    for strain in StrainPreset::ALL {
        println!("  • {strain}: {}", strain.label());
        println!("    - Mutation Rate: {:.2e} /bp/gen", strain.mutation_rate());
        println!(
            "    - Gene Conversion Rate: {:.2e} /pair/gen",
            strain.gene_conversion_rate()
        );
    }

    let tract = TractLength::default();
    println!("\n  Tract length: {}..{} bp", tract.min(), tract.max());
    println!("  Mutator lineages: {}", MUTATOR_LINEAGES.join(", "));
    println!("\n💡 Use 'rrnevo simulate --strain <name>' to run an ensemble");

    Ok(())
}
