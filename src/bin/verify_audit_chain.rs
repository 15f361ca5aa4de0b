// src/bin/verify_audit_chain.rs
use anyhow::{Context, Result};
use lms_core::application::queries::audit::AuditQueryService;
use lms_core::config::AppConfig;
use lms_core::infrastructure::storage;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    lms_core::telemetry::init_tracing();

    let config = AppConfig::from_env()?;
    // the in-memory store starts empty, so only a real database is worth checking
    config.database_url()?;

    let repos = storage::connect(config.storage()).await?;
    let report = AuditQueryService::new(repos.audit_logs)
        .verify_chain()
        .await
        .context("audit chain verification failed to run")?;

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(if report.valid {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
