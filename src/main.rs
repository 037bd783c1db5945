use anyhow::{Context, Result};
use cfn_artifacts_config::{RuntimeConfig, TemplateFormat};
use cfn_artifacts_core::TemplateStage;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Inspect a CloudFormation stack and download its Lambda artifacts
#[derive(Parser)]
#[command(name = "cfn-artifacts")]
#[command(version)]
#[command(about = "Inspect a CloudFormation stack and download its Lambda artifacts", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to configuration file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// AWS region (overrides config file and environment)
    #[arg(long, value_name = "REGION", global = true)]
    region: Option<String>,

    /// AWS shared-config profile
    #[arg(long, value_name = "PROFILE", global = true)]
    profile: Option<String>,

    /// Custom endpoint for CloudFormation and S3 (e.g. LocalStack)
    #[arg(long, value_name = "URL", global = true)]
    endpoint_url: Option<String>,

    /// Log level: trace, debug, info, warn, error
    #[arg(short = 'v', long, value_name = "LEVEL", global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the stack's deployed template
    Template {
        /// CloudFormation stack name or ID
        stack_name: String,

        /// Output format: yaml or json
        #[arg(long, value_name = "FORMAT")]
        format: Option<TemplateFormat>,

        /// Show the template after transforms (e.g. AWS::Serverless) are applied
        #[arg(long)]
        processed: bool,
    },
    /// Download Lambda function code and layer content referenced by the stack
    Download {
        /// CloudFormation stack name or ID
        stack_name: String,

        /// Directory to write <ResourceName>.zip files into (created if missing)
        download_to: PathBuf,

        /// Read resources from the template after transforms are applied
        #[arg(long)]
        processed: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?
        .block_on(async_main(cli))
}

async fn async_main(cli: Cli) -> Result<()> {
    // Step 1: Load base configuration
    let mut config = if let Some(config_path) = &cli.config {
        RuntimeConfig::load_from_path(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        RuntimeConfig::load().context("Failed to load configuration")?
    };

    // Step 2: Apply CLI overrides (highest priority)
    apply_cli_overrides(&mut config, &cli);

    // Step 3: Initialize tracing early so validation warnings show up
    cfn_artifacts::init_tracing(&config);

    // Step 4: Validate the merged configuration
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Template {
            stack_name,
            format,
            processed,
        } => {
            let format = format.unwrap_or(config.output.template_format);
            cfn_artifacts::run_template(&config, &stack_name, stage(processed), format).await
        }
        Commands::Download {
            stack_name,
            download_to,
            processed,
        } => cfn_artifacts::run_download(&config, &stack_name, &download_to, stage(processed)).await,
    }
}

fn apply_cli_overrides(config: &mut RuntimeConfig, cli: &Cli) {
    if let Some(region) = &cli.region {
        config.aws.region = Some(region.clone());
    }
    if let Some(profile) = &cli.profile {
        config.aws.profile = Some(profile.clone());
    }
    if let Some(endpoint) = &cli.endpoint_url {
        config.aws.endpoint_url = Some(endpoint.clone());
    }
    if let Some(level) = &cli.log_level {
        config.log.level = level.clone();
    }
}

fn stage(processed: bool) -> TemplateStage {
    if processed {
        TemplateStage::Processed
    } else {
        TemplateStage::Original
    }
}
