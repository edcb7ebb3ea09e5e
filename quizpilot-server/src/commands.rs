use anyhow::{Context, Result};
use colored::Colorize;
use std::path::Path;

use quizpilot_core::modules::credential::mask_credential;
use quizpilot_core::modules::{config as core_config, get_data_dir};
use quizpilot_core::{CancellationToken, ProcessError};
use quizpilot_types::{Answer, QuestionRecord, StatusLevel, StatusUpdate};

use crate::cli::{ConfigCommands, CredentialCommands};
use crate::state::AppState;

fn load_state() -> Result<AppState> {
    let data_dir = get_data_dir().map_err(|e| anyhow::anyhow!(e))?;
    let config = core_config::load_config_from(&data_dir).map_err(|e| anyhow::anyhow!(e))?;
    AppState::new(&data_dir, config)
}

fn print_status(update: StatusUpdate) -> bool {
    let line = match update.level {
        StatusLevel::Info => update.message.normal(),
        StatusLevel::Action => update.message.cyan(),
        StatusLevel::Warning => update.message.yellow(),
        StatusLevel::Error => update.message.red(),
        StatusLevel::Success => update.message.green(),
    };
    eprintln!("  {}", line);
    true
}

pub async fn handle_ask(file: &Path, json: bool) -> Result<()> {
    let content = std::fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let record: QuestionRecord =
        serde_json::from_str(&content).context("Question file is not a valid question record")?;

    let state = load_state()?;
    let cancel = CancellationToken::new();
    let on_ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_ctrl_c.cancel();
        }
    });

    let reporter = print_status;
    match state.processor().process(&record, &reporter, &cancel).await {
        Ok(result) if json => {
            println!("{}", serde_json::to_string_pretty(&result)?);
            Ok(())
        },
        Ok(result) => {
            let answer = match &result.answer {
                Answer::Single(value) => value.clone(),
                Answer::Multiple(values) => values.join(" | "),
            };
            println!("{} {}", "Answer:".green().bold(), answer);
            if !result.explanation.is_empty() {
                println!("{} {}", "Why:".cyan(), result.explanation);
            }
            Ok(())
        },
        Err(ProcessError::Failed { alert, .. }) => anyhow::bail!("{}", alert),
        Err(e) => Err(e.into()),
    }
}

pub async fn handle_credential_command(cmd: CredentialCommands) -> Result<()> {
    let state = load_state()?;

    match cmd {
        CredentialCommands::Set { api_key, verify } => {
            if verify {
                let check = state.processor().executor().validate_credential(&api_key).await;
                if !check.valid {
                    anyhow::bail!(
                        "API key rejected: {}",
                        check.error.unwrap_or_else(|| "unknown error".to_string())
                    );
                }
            }
            state.store().set(&api_key).await.map_err(|e| anyhow::anyhow!(e))?;
            println!("{} API key saved ({})", "✓".green(), mask_credential(api_key.trim()));
        },
        CredentialCommands::Show => match state.store().get().await.map_err(|e| anyhow::anyhow!(e))? {
            Some(key) => println!("{} {}", "API key:".cyan().bold(), mask_credential(&key)),
            None => println!("{}", "No API key configured".yellow()),
        },
        CredentialCommands::Test { api_key } => {
            let key = match api_key {
                Some(key) => key,
                None => state
                    .store()
                    .get()
                    .await
                    .map_err(|e| anyhow::anyhow!(e))?
                    .ok_or_else(|| anyhow::anyhow!("No API key configured"))?,
            };
            let check = state.processor().executor().validate_credential(&key).await;
            if check.valid {
                println!("{} API key is valid", "✓".green());
            } else {
                anyhow::bail!(
                    "API key is invalid: {}",
                    check.error.unwrap_or_else(|| "unknown error".to_string())
                );
            }
        },
    }
    Ok(())
}

pub fn handle_config_command(cmd: ConfigCommands) -> Result<()> {
    match cmd {
        ConfigCommands::Show { json } => show_config(json),
    }
}

fn show_config(json: bool) -> Result<()> {
    let config = core_config::load_config().map_err(|e| anyhow::anyhow!(e))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&config)?);
    } else {
        println!("{}", "Gemini:".cyan().bold());
        println!("  Base URL: {}", config.gemini.base_url);
        println!("  Models: {}", config.gemini.models.join(", "));
        println!("  Temperature: {}", config.gemini.temperature);
        println!("{}", "Retry:".cyan().bold());
        println!("  Max retries: {}", config.retry.max_retries);
        println!("  Exhaustion factor: {}", config.retry.exhaustion_factor);
        println!("  Max rotations per question: {}", config.retry.max_rotations);
        println!("{}", "Server:".cyan().bold());
        println!("  Listen: {}:{}", config.server.host, config.server.port);
        println!("  Rotation: {:?}", config.rotation.mode);
    }
    Ok(())
}
