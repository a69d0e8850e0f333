//! Scenario start/end: reset before, tracked-object teardown after.

use tracing::{info, warn};

use crate::context::ScenarioContext;

/// What happened to each tracked id during teardown.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupReport {
    /// Deleted with a 200.
    pub deleted: Vec<String>,
    /// Delete answered with another status; treated as already gone.
    pub already_gone: Vec<(String, u16)>,
    /// Delete could not be sent at all.
    pub failed: Vec<(String, String)>,
}

impl CleanupReport {
    pub fn attempted(&self) -> usize {
        self.deleted.len() + self.already_gone.len() + self.failed.len()
    }

    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Prepares the context for a new scenario.
pub fn begin_scenario(ctx: &mut ScenarioContext, scenario: &str, tags: &[String]) {
    info!(%scenario, ?tags, "Starting scenario");
    ctx.reset();
}

/// Deletes every tracked object in creation order.
///
/// A failed delete is logged and the loop moves on to the next id.
pub async fn cleanup_created_objects(ctx: &ScenarioContext) -> CleanupReport {
    let mut report = CleanupReport::default();
    let ids = ctx.created_ids().to_vec();
    if ids.is_empty() {
        return report;
    }

    info!(count = ids.len(), "Cleaning up created objects");
    let client = match ctx.api_client() {
        Ok(client) => client,
        Err(err) => {
            for id in ids {
                warn!(%id, error = %err, "Cannot delete object");
                report.failed.push((id, err.to_string()));
            }
            return report;
        }
    };

    for id in ids {
        match client.delete(&id).await {
            Ok(response) if response.status() == 200 => {
                info!(%id, "Deleted object");
                report.deleted.push(id);
            }
            Ok(response) => {
                info!(%id, status = response.status(), "Object not deleted, probably already gone");
                report.already_gone.push((id, response.status()));
            }
            Err(err) => {
                warn!(%id, error = %err, "Error deleting object");
                report.failed.push((id, err.to_string()));
            }
        }
    }
    report
}

/// Tears the scenario down whatever its outcome.
///
/// Deletes tracked objects, logs the last response of a failed scenario, then
/// clears the context.
pub async fn end_scenario(ctx: &mut ScenarioContext, scenario: &str, failed: bool) -> CleanupReport {
    let report = cleanup_created_objects(ctx).await;

    if failed {
        warn!(%scenario, "Scenario failed");
        if let Some(response) = ctx.current_response() {
            warn!(status = response.status(), body = %response.body(), "Last response");
        }
    }
    info!(
        %scenario,
        status = if failed { "failed" } else { "passed" },
        deleted = report.deleted.len(),
        already_gone = report.already_gone.len(),
        cleanup_errors = report.failed.len(),
        "Completed scenario"
    );

    ctx.cleanup();
    report
}
