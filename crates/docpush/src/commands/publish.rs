//! `docpush publish` command implementation.

use std::path::PathBuf;

use clap::Args;
use docpush_config::{CliSettings, Config, ConfluenceConfig};
use docpush_confluence::{ConfluenceClient, Publisher};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the publish command.
#[derive(Args)]
pub(crate) struct PublishArgs {
    /// Path to the metadata file describing the page tree.
    metadata_file: PathBuf,

    /// Confluence REST API endpoint (overrides config).
    #[arg(long)]
    endpoint: Option<String>,

    /// Username for basic authentication (overrides config).
    #[arg(short, long)]
    username: Option<String>,

    /// Password or API token for basic authentication (overrides config).
    #[arg(short, long, env = "DOCPUSH_PASSWORD")]
    password: Option<String>,

    /// Path to configuration file (default: auto-discover docpush.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Enable verbose logging.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl PublishArgs {
    /// Execute the publish command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration is missing or the publish run
    /// fails. A failed run leaves already-created remote content in place.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        // Load config
        let cli_settings = CliSettings {
            endpoint: self.endpoint.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        // Require confluence config
        let conf_config = require_confluence_config(&config, &output)?;

        let client = ConfluenceClient::new(
            &conf_config.endpoint,
            &conf_config.username,
            &conf_config.password,
        );

        let publisher = Publisher::from_metadata_file(&client, &self.metadata_file)?;

        let metadata = publisher.metadata();
        output.info(&format!(
            "Publishing {} pages ({} attachments) to space '{}'...",
            metadata.page_count(),
            metadata.attachment_count(),
            metadata.space_key
        ));

        publisher.publish()?;

        output.success(&format!(
            "Published {} pages to space '{}'.",
            publisher.metadata().page_count(),
            publisher.metadata().space_key
        ));
        Ok(())
    }
}

fn require_confluence_config<'a>(
    config: &'a Config,
    output: &Output,
) -> Result<&'a ConfluenceConfig, CliError> {
    match config.require_confluence() {
        Ok(conf) => Ok(conf),
        Err(err) => {
            output.error("Error: confluence configuration required");
            output.info("\nAdd the following to your docpush.toml:");
            output.info("\n[confluence]");
            output.info(r#"endpoint = "https://confluence.example.com/rest/api""#);
            output.info(r#"username = "publisher""#);
            output.info(r#"password = "${CONFLUENCE_PASSWORD}""#);
            Err(CliError::Validation(err.to_string()))
        }
    }
}
