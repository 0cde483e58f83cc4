//! Command handlers

use std::future::Future;
use std::path::Path;

use futures::future::join_all;
use registrar_domain::{
    AvailabilityResult, BatchReport, RegistrarError, RegistrationDetail, Result,
};
use registrar_infra::RegistrationScheduler;
use serde_json::Value;
use tracing::{info, warn};

use crate::context::AppContext;

/// Check every domain concurrently without registering anything.
///
/// Results are returned in input order; a failed check does not affect the
/// others.
pub async fn check(
    ctx: &AppContext,
    domains: &[String],
) -> Vec<(String, Result<AvailabilityResult>)> {
    let prober = ctx.orchestrator.prober();
    let results = join_all(domains.iter().map(|domain| prober.check_availability(domain))).await;

    domains
        .iter()
        .cloned()
        .zip(results)
        .inspect(|(domain, result)| match result {
            Ok(availability) => info!(%domain, status = %availability.status, "availability"),
            Err(err) => warn!(%domain, error = %err, "availability check failed"),
        })
        .collect()
}

/// Run the check-then-register workflow once.
pub async fn register(
    ctx: &AppContext,
    domains: &[String],
    detail: &RegistrationDetail,
) -> BatchReport {
    ctx.orchestrator.register_many(domains, detail).await
}

/// Parse a `--detail` argument: an inline JSON object, or a path to a file
/// holding one. No argument means no extra fields.
///
/// # Errors
/// Returns `RegistrarError::InvalidInput` if the file cannot be read or the
/// JSON is not an object.
pub fn parse_detail(raw: Option<&str>) -> Result<RegistrationDetail> {
    let Some(raw) = raw.map(str::trim) else {
        return Ok(RegistrationDetail::new());
    };

    let json = if raw.starts_with('{') {
        raw.to_string()
    } else {
        std::fs::read_to_string(Path::new(raw)).map_err(|e| {
            RegistrarError::InvalidInput(format!("cannot read detail file {raw}: {e}"))
        })?
    };

    let value: Value = serde_json::from_str(&json)
        .map_err(|e| RegistrarError::InvalidInput(format!("invalid detail JSON: {e}")))?;
    RegistrationDetail::try_from(value)
}

/// Schedule every configured binding and run until `shutdown` resolves.
///
/// # Errors
/// Fails if no schedule is configured, if a schedule is invalid, or if the
/// scheduler cannot be started or stopped.
pub async fn run<F>(ctx: &AppContext, shutdown: F) -> Result<()>
where
    F: Future<Output = ()>,
{
    let bindings = ctx.bindings()?;
    if bindings.is_empty() {
        return Err(RegistrarError::InvalidInput(
            "no schedules configured; add [[schedules]] to the config file".into(),
        ));
    }

    let mut scheduler = RegistrationScheduler::new(ctx.orchestrator.clone()).await?;
    for binding in bindings {
        let cron = binding.cron_expression().to_string();
        let job_id = scheduler.schedule(binding).await?;
        info!(%job_id, %cron, "schedule bound");
    }

    scheduler.start().await?;
    shutdown.await;
    info!("shutdown requested");
    scheduler.stop().await?;
    Ok(())
}
