//! Replication engine - copy a shift's resources to target shifts.

use std::sync::Arc;

use eventops_assignment::would_duplicate;
use eventops_core::{
    AssignableResource, ReplicationRequest, ReplicationResult, ResourceFilter, ShiftKey,
};
use eventops_storage::{ResourceStore, StorageError};
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Errors that stop a replication before any write happens.
///
/// Per-pair persistence failures do NOT surface here; they land in the
/// `failed` counter of the tally and the batch continues.
#[derive(Debug, thiserror::Error)]
pub enum ReplicationError {
    /// Zero target shifts selected
    #[error("no target shifts selected")]
    NoTargets,

    /// Source shift has no resources
    #[error("nothing to replicate: no resources at shift {0}")]
    NothingToReplicate(ShiftKey),

    /// Could not read the source resource set
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Copies every resource at a source shift to each target shift,
/// skipping name collisions and counting the outcome per pair.
///
/// The whole batch runs inside the store lock, so each pair's
/// check-then-create is one logical step: two concurrent replications
/// into the same target cannot both create the same name. Running the
/// same request twice yields `created = 0` on the second run, which
/// makes retrying safe.
pub struct ReplicationEngine<S: ResourceStore> {
    storage: Arc<Mutex<S>>,
}

impl<S: ResourceStore> ReplicationEngine<S> {
    /// Create an engine owning its storage.
    pub fn new(storage: S) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
        }
    }

    /// Create an engine over a shared storage handle.
    pub fn from_shared(storage: Arc<Mutex<S>>) -> Self {
        Self { storage }
    }

    /// Run a replication request and return the created/skipped/failed
    /// tally. Partial successes are not rolled back.
    pub async fn replicate(
        &self,
        request: &ReplicationRequest,
    ) -> Result<ReplicationResult, ReplicationError> {
        if request.targets.is_empty() {
            return Err(ReplicationError::NoTargets);
        }

        let mut storage = self.storage.lock().await;
        let filter = ResourceFilter::kind(request.kind);

        let source_set: Vec<AssignableResource> = storage
            .list_resources(&filter)
            .await?
            .into_iter()
            .filter(|r| r.effective_shift_keys().contains(&request.source))
            .collect();
        if source_set.is_empty() {
            return Err(ReplicationError::NothingToReplicate(request.source.clone()));
        }

        let mut tally = ReplicationResult::default();
        for target in &request.targets {
            // One read per target; copies made for other targets carry a
            // single canonical key and can never collide here
            let mut at_target: Vec<AssignableResource> = match storage
                .list_resources(&filter)
                .await
            {
                Ok(existing) => existing
                    .into_iter()
                    .filter(|r| r.effective_shift_keys().contains(target))
                    .collect(),
                Err(e) => {
                    warn!(shift = %target, error = %e,
                        "could not read target shift, counting its pairs as failed");
                    tally.failed += source_set.len();
                    continue;
                }
            };

            for resource in &source_set {
                if would_duplicate(&resource.name, std::slice::from_ref(target), &at_target, None)
                {
                    debug!(shift = %target, name = %resource.name, "skipping duplicate");
                    tally.skipped += 1;
                    continue;
                }

                let copy = copy_to(resource, target.clone());
                match storage.save_resource(&copy).await {
                    Ok(()) => {
                        tally.created += 1;
                        // Track the copy so later same-name source
                        // records skip within this batch
                        at_target.push(copy);
                    }
                    Err(e) => {
                        warn!(shift = %target, name = %resource.name, error = %e,
                            "failed to persist replicated resource");
                        tally.failed += 1;
                    }
                }
            }
        }

        debug!(source = %request.source, %tally, "replication finished");
        Ok(tally)
    }
}

/// A replicated copy: fresh id, same name/color/kind/active flag, but
/// never "already handed out", and a single canonical assignment at the
/// target.
fn copy_to(source: &AssignableResource, target: ShiftKey) -> AssignableResource {
    let mut copy = AssignableResource::new(source.kind, source.name.clone(), target);
    copy.color = source.color.clone();
    copy.active = source.active;
    copy.distributed = false;
    copy
}
