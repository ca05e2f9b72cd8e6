use anyhow::Context;
use clap::Parser;
use nml::utils::{logger, validation::Validate};
use nml::{CliConfig, TopologyDescription};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Loading topology description from {}", config.description.display());
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }

    let description = match TopologyDescription::from_file(&config.description) {
        Ok(description) => description,
        Err(e) => {
            tracing::error!(
                "Failed to load description '{}': {}",
                config.description.display(),
                e
            );
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    let (graph, root) = match description.build() {
        Ok(built) => built,
        Err(e) => {
            tracing::error!("Failed to build topology: {}", e);
            tracing::error!("Suggestion: {}", e.recovery_suggestion());
            std::process::exit(if e.is_validation() { 2 } else { 1 });
        }
    };

    let document = graph
        .render(root, &config.render_options())
        .context("serializing topology")?;

    match &config.output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("writing {}", path.display()))?;
            tracing::info!("Document written to {}", path.display());
        }
        None => print!("{}", document),
    }

    Ok(())
}
