pub mod description;

pub use description::TopologyDescription;

#[cfg(feature = "cli")]
use crate::core::RenderOptions;
#[cfg(feature = "cli")]
use crate::utils::error::{NmlError, Result};
#[cfg(feature = "cli")]
use crate::utils::validation::{validate_path, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "nml-gen")]
#[command(about = "Render a TOML topology description as an NML document")]
pub struct CliConfig {
    /// Path to the TOML topology description
    pub description: PathBuf,

    /// Write the document here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Indent nested elements
    #[arg(long)]
    pub pretty: bool,

    /// Omit the XML declaration
    #[arg(long)]
    pub no_declaration: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            declaration: !self.no_declaration,
            indent: self.pretty.then_some(2),
        }
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("description", &self.description.to_string_lossy())?;
        if let Some(output) = &self.output {
            validate_path("output", &output.to_string_lossy())?;
            if output == &self.description {
                return Err(NmlError::description(
                    "output would overwrite the description file",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cli_args() {
        let config =
            CliConfig::try_parse_from(["nml-gen", "topology.toml", "--pretty", "-o", "out.xml"])
                .unwrap();
        assert_eq!(config.description, PathBuf::from("topology.toml"));
        assert_eq!(config.output, Some(PathBuf::from("out.xml")));
        assert_eq!(config.render_options(), RenderOptions::pretty());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_output_must_differ_from_description() {
        let config =
            CliConfig::try_parse_from(["nml-gen", "topology.toml", "-o", "topology.toml"]).unwrap();
        assert!(config.validate().is_err());
    }
}
