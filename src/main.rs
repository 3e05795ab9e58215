//! Coverform CLI
//!
//! Thin driver over the form engine: loads definitions and value snapshots
//! from JSON files and prints the engine's output as JSON on stdout.

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{CheckArgs, Cli, Command, InspectArgs, NormalizeArgs, SubmitArgs};
use coverform::backend::{submit_wizard, BackendClient, BackendClientTrait};
use coverform::config::AppConfig;
use coverform::normalize::normalize_with_report;
use coverform::state::{FormDefinition, FormValues, WizardState};
use serde_json::json;
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "coverform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load()?,
    };

    match cli.command {
        Command::Check(args) => check(args),
        Command::Inspect(args) => inspect(args, &config),
        Command::Normalize(args) => normalize(args),
        Command::Submit(args) => submit(args, &config).await,
    }
}

fn check(args: CheckArgs) -> Result<()> {
    let definition = read_definition(&args.definition)?;
    println!(
        "{}: {} field(s) in {} section(s), ok",
        definition.category,
        definition.field_count(),
        definition.sections.len()
    );
    Ok(())
}

fn inspect(args: InspectArgs, config: &AppConfig) -> Result<()> {
    let definition = read_definition(&args.definition)?;
    let values = match &args.values {
        Some(path) => read_values(path)?,
        None => FormValues::new(),
    };
    let policy = args.policy.map(Into::into).unwrap_or(config.progress_policy());

    let state = WizardState::with_values(&definition, values).with_policy(policy);
    let output = json!({
        "category": state.category(),
        "steps": state.visible_steps,
        "errors": state.errors,
        "progress": state.progress,
        "policy": state.policy(),
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn normalize(args: NormalizeArgs) -> Result<()> {
    let values = read_values(&args.values)?;
    let report = normalize_with_report(&args.category, &values);
    if args.report && !report.dropped.is_empty() {
        eprintln!("dropped: {}", report.dropped.join(", "));
    }
    println!("{}", serde_json::to_string_pretty(&report.payload)?);
    Ok(())
}

async fn submit(args: SubmitArgs, config: &AppConfig) -> Result<()> {
    let client = BackendClient::new(&config.api_settings())?;
    let definition = client
        .fetch_definition(&args.category)
        .await
        .with_context(|| format!("failed to fetch the `{}` form", args.category))?;
    let values = read_values(&args.values)?;

    let state = WizardState::with_values(&definition, values).with_policy(config.progress_policy());
    let response = submit_wizard(&client, &state).await?;
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

fn read_definition(path: &Path) -> Result<FormDefinition> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let definition = FormDefinition::from_json(&content)
        .with_context(|| format!("invalid form definition in {}", path.display()))?;
    Ok(definition)
}

fn read_values(path: &Path) -> Result<FormValues> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let values: FormValues = serde_json::from_str(&content)
        .with_context(|| format!("{} must contain a JSON object", path.display()))?;
    Ok(values)
}
