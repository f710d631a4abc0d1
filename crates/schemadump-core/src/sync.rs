//! Reconcile the output tree with the artifacts discovered in this run.
//!
//! The tree is the only state kept between runs. After a run it must hold
//! exactly the discovered `(project, artifact)` pairs: project directories
//! unknown to this run are removed recursively, and inside known projects
//! every file whose stem was not emitted is removed. Renamed types show up
//! as one removal plus one new artifact.
//!
//! Reconciliation is split in two phases. [`plan_sync`] only reads the tree
//! and computes what is stale; [`apply_sync`] performs the deletions.

use tracing::{info, warn};

use crate::dump::DiscoveredArtifacts;
use crate::error::{DumpError, Result};
use crate::store::{ArtifactStore, artifact_stem};

/// Stale entries found in the output tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncPlan {
    /// Project directories with no artifact in this run.
    pub stale_projects: Vec<String>,
    /// `(project, file name)` pairs inside live projects that were not emitted.
    pub stale_artifacts: Vec<(String, String)>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.stale_projects.is_empty() && self.stale_artifacts.is_empty()
    }
}

/// Outcome of applying a [`SyncPlan`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub removed_projects: usize,
    pub removed_artifacts: usize,
    pub failed_removals: usize,
}

/// Compute the stale part of the output tree without touching it.
pub fn plan_sync<S: ArtifactStore + ?Sized>(
    store: &S,
    discovered: &DiscoveredArtifacts,
) -> Result<SyncPlan> {
    let projects = store.list_projects().map_err(|source| DumpError::ListOutput {
        location: store.location(),
        source,
    })?;

    let mut plan = SyncPlan::default();
    for project in projects {
        if !discovered.contains_project(&project) {
            plan.stale_projects.push(project);
            continue;
        }
        let files = match store.list_artifacts(&project) {
            Ok(files) => files,
            Err(error) => {
                warn!(project = %project, %error, "failed to list project artifacts");
                continue;
            }
        };
        for file in files {
            if !discovered.contains_artifact(&project, artifact_stem(&file)) {
                plan.stale_artifacts.push((project.clone(), file));
            }
        }
    }
    Ok(plan)
}

/// Delete everything in `plan`. Failed deletions are logged and counted;
/// the next run retries them.
pub fn apply_sync<S: ArtifactStore + ?Sized>(store: &mut S, plan: &SyncPlan) -> SyncReport {
    let mut report = SyncReport::default();

    for project in &plan.stale_projects {
        info!(project = %project, "removing project");
        match store.remove_project(project) {
            Ok(()) => report.removed_projects += 1,
            Err(error) => {
                warn!(project = %project, %error, "failed to remove project");
                report.failed_removals += 1;
            }
        }
    }

    for (project, file) in &plan.stale_artifacts {
        info!(project = %project, artifact = %file, "removing artifact");
        match store.remove_artifact(project, file) {
            Ok(()) => report.removed_artifacts += 1,
            Err(error) => {
                warn!(project = %project, artifact = %file, %error, "failed to remove artifact");
                report.failed_removals += 1;
            }
        }
    }

    report
}
