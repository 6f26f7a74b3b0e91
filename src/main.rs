//! tfblast CLI entry point.
//!
//! This binary provides the command-line interface for tfblast.

use clap::Parser;
use tfblast::cli::{Cli, Commands};
use tfblast::{Config, Scanner};
use std::error::Error;
use std::process::ExitCode;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose, cli.quiet);

    // Run the appropriate command
    match run(cli).await {
        Ok(exit_code) => exit_code,
        Err(e) => {
            tracing::error!(error = %e, "Fatal error");

            eprintln!("Error: {e}");

            // Print error chain (cause chain)
            let mut source = e.source();
            if source.is_some() {
                eprintln!("\nCaused by:");
                let mut i = 0;
                while let Some(cause) = source {
                    eprintln!("  {i}: {cause}");
                    source = cause.source();
                    i += 1;
                }
            }

            let code = e
                .downcast_ref::<tfblast::TfBlastError>()
                .map_or(1, tfblast::TfBlastError::exit_code);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        // First try to use RUST_LOG from environment, otherwise use verbose flag
        EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            let base_level = match verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            };
            // tfblast at the requested level, everything else at warn
            EnvFilter::new(format!("warn,tfblast={base_level}"))
        })
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(false))
        .with(filter)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    // Load configuration
    tracing::debug!("Loading configuration");
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Scan(args) => {
            let mut config = config;
            config.merge_cli_args(&args);

            let scanner = Scanner::new(config.clone());
            let result = scanner.scan_path(&args.path).await?;

            let reporter = tfblast::reporter::Reporter::new(&config);
            let report = reporter.generate(&result, args.format)?;

            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &report)?;
                tracing::info!(path = %output_path.display(), "Report written");
            } else {
                println!("{report}");
            }

            Ok(ExitCode::from(0))
        }

        Commands::Graph(args) => {
            let scanner = Scanner::new(config);
            let result = scanner.scan_path(&args.path).await?;

            let graph_output = tfblast::graph::export_graph(&result.graph, args.format)?;

            if let Some(output_path) = args.output {
                std::fs::write(&output_path, &graph_output)?;
                tracing::info!(path = %output_path.display(), "Graph written");
            } else {
                println!("{graph_output}");
            }

            Ok(ExitCode::from(0))
        }

        Commands::Radius(args) => {
            let scanner = Scanner::new(config);
            let result = scanner.scan_path(&args.path).await?;

            if !result.graph.contains_node(&args.identifier) {
                eprintln!("Unknown entity: {}", args.identifier);
                return Ok(ExitCode::from(1));
            }

            let affected = result.graph.blast_radius(&args.identifier);
            if affected.is_empty() {
                println!("Nothing depends on {}", args.identifier);
            } else {
                println!(
                    "{} entities affected by a change to {}:",
                    affected.len(),
                    args.identifier
                );
                for node in affected {
                    println!("  {} ({})", node.id, node.kind);
                }
            }

            Ok(ExitCode::from(0))
        }

        Commands::Init => {
            // Generate example configuration file
            let example_config = Config::example_yaml();
            let config_path = std::path::Path::new("tfblast.yaml");

            if config_path.exists() {
                anyhow::bail!(
                    "Configuration file already exists: {}",
                    config_path.display()
                );
            }

            std::fs::write(config_path, example_config)?;
            println!("Created example configuration: tfblast.yaml");
            Ok(ExitCode::from(0))
        }

        Commands::Validate(args) => {
            // Validate configuration file
            let config_content = std::fs::read_to_string(&args.config)?;
            match Config::from_yaml(&config_content) {
                Ok(_) => {
                    println!("Configuration is valid: {}", args.config.display());
                    Ok(ExitCode::from(0))
                }
                Err(e) => {
                    eprintln!("Configuration error: {e}");
                    Ok(ExitCode::from(1))
                }
            }
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    // Check for explicit config file
    if let Some(ref config_path) = cli.config {
        tracing::debug!(path = %config_path.display(), "Loading configuration from explicit path");
        let content = std::fs::read_to_string(config_path)?;
        return Ok(Config::from_yaml(&content)?);
    }

    // Look for default config files
    let default_paths = ["tfblast.yaml", "tfblast.yml", ".tfblast.yaml"];
    for path in &default_paths {
        if std::path::Path::new(path).exists() {
            tracing::debug!(path = %path, "Found configuration file");
            let content = std::fs::read_to_string(path)?;
            return Ok(Config::from_yaml(&content)?);
        }
    }

    tracing::debug!("No configuration file found, using default configuration");
    Ok(Config::default())
}
