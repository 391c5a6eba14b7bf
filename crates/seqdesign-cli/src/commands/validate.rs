use crate::cli::ValidateArgs;
use crate::config::builder::{ConfigOverrides, build_config};
use crate::data::DataManager;
use crate::error::Result;
use seqdesign::core::models::structure::ParsedStructure;
use seqdesign::engine::validation;
use std::path::Path;
use tracing::{info, warn};

pub async fn run(args: ValidateArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    let overrides = ConfigOverrides {
        config_file: args.config.clone(),
        set_values: args.set_values.clone(),
        ..Default::default()
    };
    let app_config = build_config(&overrides, &data_manager)?;

    info!("Validating {:?} for chain(s) {:?}", &args.input, &args.chains);
    let structure = validation::validate(&args.input, &args.chains, &app_config.design.validation)?;

    let hetero_records = match validation::count_hetero_records(&args.input) {
        Ok(count) => Some(count),
        Err(e) => {
            warn!("Could not count HETATM records: {}", e);
            None
        }
    };

    print!(
        "{}",
        render_summary(&args.input, &structure, &args.chains, hetero_records)
    );
    Ok(())
}

fn render_summary(
    path: &Path,
    structure: &ParsedStructure,
    chains: &[char],
    hetero_records: Option<usize>,
) -> String {
    let mut out = format!("✓ {} is valid for sequence design\n", path.display());

    let mut seen = Vec::with_capacity(chains.len());
    for &chain in chains {
        if seen.contains(&chain) {
            continue;
        }
        seen.push(chain);
        let residues = structure.standard_residue_count(chain).unwrap_or(0);
        out.push_str(&format!("  Chain {}: {} standard residue(s)\n", chain, residues));
    }

    if let Some(count) = hetero_records {
        out.push_str(&format!("  HETATM records: {}\n", count));
    }
    out
}
