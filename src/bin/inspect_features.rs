use anyhow::{bail, Context};
use std::path::Path;
use variant_scorer_rust::validators::validate_derived_columns;
use variant_scorer_rust::{
    init_logging, load_variant_table, transform_table, ModelFeatureContract, PipelineConfig,
    RunContext, TransformerPipeline,
};

/// Load an annotated TSV, run the transformers and print the resulting
/// feature schema. With a model contract, also check that every derived
/// column the model needs was produced.
///
/// Usage: inspect_features <annotated.tsv> [config.json] [contract.json]
fn main() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!("usage: {} <annotated.tsv> [config.json] [contract.json]", args[0]);
    }

    let config = match args.get(2) {
        Some(path) => PipelineConfig::load(Path::new(path))
            .with_context(|| format!("Failed to load config: {}", path))?,
        None => PipelineConfig::default(),
    };
    init_logging(&config.log_filter)?;

    let input = Path::new(&args[1]);
    let table = load_variant_table(input, &config)
        .with_context(|| format!("Failed to load variants: {}", input.display()))?;

    println!("\n=== INSPECTING FEATURES: {} ===\n", input.display());
    println!("Raw table: {} rows × {} columns", table.height(), table.width());

    let pipeline = TransformerPipeline::from_config(&config)?;
    let ctx = RunContext::new(config);
    let (features, report) = transform_table(&pipeline, table, &ctx)?;

    println!("\nTransformed sources:");
    for (source, columns) in &report.processed {
        println!("  {:<22} → {}", source, columns.join(", "));
    }
    if !report.skipped.is_empty() {
        println!("Skipped (absent): {}", report.skipped.join(", "));
    }
    println!("Dropped: {}", report.dropped.join(", "));

    println!("\nFeature schema ({} columns):", features.width());
    for column in features.get_columns() {
        println!(
            "  {:<40} {:<8} nulls: {}",
            column.name().as_str(),
            column.dtype().to_string(),
            column.null_count()
        );
    }

    if let Some(path) = args.get(3) {
        let contract = ModelFeatureContract::from_json_file(Path::new(path))
            .with_context(|| format!("Failed to load model contract: {}", path))?;
        validate_derived_columns(&features, &contract.vep_features)?;
        println!(
            "\n✓ All derived columns for model {} present",
            contract.model_version
        );
    }

    Ok(())
}
