use crate::cli::HealthArgs;
use crate::config::builder::{ConfigOverrides, build_config};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use seqdesign::engine::readiness;
use tracing::{debug, info};

pub async fn run(args: HealthArgs) -> Result<()> {
    let data_manager = DataManager::new()?;
    let overrides = ConfigOverrides {
        config_file: args.config,
        ..Default::default()
    };
    let app_config = build_config(&overrides, &data_manager)?;

    let weights = app_config.invocation.weights_file();
    debug!("Checking model weights at {:?}", &weights);
    let state = readiness::initialize(&weights);
    info!(ready = state.is_ready(), "Model readiness determined");

    let json = serde_json::to_string_pretty(&readiness::health())
        .map_err(|e| CliError::Other(e.into()))?;
    println!("{}", json);
    Ok(())
}
