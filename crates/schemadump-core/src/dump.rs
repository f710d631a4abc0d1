//! Registry walk: scopes → classes and enums → artifacts.

use std::collections::{BTreeMap, BTreeSet};
use std::time::Instant;

use schemadump_model::{SchemaRegistry, TypeScope};
use tracing::{debug, info, info_span, warn};

use crate::error::{DumpError, Result};
use crate::sink::IdentifierSink;
use crate::store::ArtifactStore;
use crate::sync::{SyncPlan, SyncReport, apply_sync, plan_sync};
use crate::writer::{render_class, render_enum, sanitize_type_name};

/// Every `(project, sanitized type name)` emitted during one run.
///
/// Two types that sanitize to the same name in one project share one entry
/// and one artifact; the later one overwrites the earlier.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveredArtifacts {
    projects: BTreeMap<String, BTreeSet<String>>,
}

impl DiscoveredArtifacts {
    pub fn record(&mut self, project: &str, stem: &str) {
        self.projects
            .entry(project.to_string())
            .or_default()
            .insert(stem.to_string());
    }

    pub fn contains_project(&self, project: &str) -> bool {
        self.projects.contains_key(project)
    }

    pub fn contains_artifact(&self, project: &str, stem: &str) -> bool {
        self.projects
            .get(project)
            .is_some_and(|stems| stems.contains(stem))
    }

    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    pub fn artifact_count(&self) -> usize {
        self.projects.values().map(BTreeSet::len).sum()
    }
}

/// Counters collected while walking the registry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub scopes: usize,
    pub classes: usize,
    pub enums: usize,
    pub artifacts_written: usize,
    pub artifact_write_failures: usize,
}

/// Dumps type scopes into an [`ArtifactStore`].
///
/// One `Dumper` lives for one run and accumulates the discovered artifacts
/// of every scope it is given.
pub struct Dumper<'a, S: ArtifactStore + ?Sized> {
    store: &'a mut S,
    identifiers: &'a mut dyn IdentifierSink,
    discovered: DiscoveredArtifacts,
    stats: WalkStats,
}

impl<'a, S: ArtifactStore + ?Sized> Dumper<'a, S> {
    pub fn new(store: &'a mut S, identifiers: &'a mut dyn IdentifierSink) -> Self {
        Self {
            store,
            identifiers,
            discovered: DiscoveredArtifacts::default(),
            stats: WalkStats::default(),
        }
    }

    /// Dump the classes, then the enums, of one scope.
    pub fn dump_scope<T: TypeScope + ?Sized>(&mut self, scope: &T) -> Result<()> {
        let span = info_span!("scope", name = %scope.name());
        let _guard = span.enter();
        self.stats.scopes += 1;
        self.dump_classes(scope)?;
        self.dump_enums(scope)?;
        Ok(())
    }

    pub fn dump_classes<T: TypeScope + ?Sized>(&mut self, scope: &T) -> Result<()> {
        for handle in scope.class_handles() {
            let Some(class) = scope.class(handle) else {
                debug!(%handle, "class binding disappeared during dump");
                continue;
            };
            let stem = self.prepare_artifact(&class.project, &class.name)?;
            let text = render_class(class, &mut *self.identifiers);
            self.stats.classes += 1;
            self.store_artifact(&class.project, &stem, &text);
        }
        Ok(())
    }

    pub fn dump_enums<T: TypeScope + ?Sized>(&mut self, scope: &T) -> Result<()> {
        for handle in scope.enum_handles() {
            let Some(binding) = scope.enum_binding(handle) else {
                debug!(%handle, "enum binding disappeared during dump");
                continue;
            };
            let stem = self.prepare_artifact(&binding.project, &binding.name)?;
            let text = render_enum(binding, &mut *self.identifiers);
            self.stats.enums += 1;
            self.store_artifact(&binding.project, &stem, &text);
        }
        Ok(())
    }

    pub fn discovered(&self) -> &DiscoveredArtifacts {
        &self.discovered
    }

    pub fn stats(&self) -> WalkStats {
        self.stats
    }

    pub fn finish(self) -> (DiscoveredArtifacts, WalkStats) {
        (self.discovered, self.stats)
    }

    /// Ensure the project directory exists and record the artifact.
    /// A project directory that cannot be created aborts the run.
    fn prepare_artifact(&mut self, project: &str, name: &str) -> Result<String> {
        self.store
            .ensure_project(project)
            .map_err(|source| DumpError::CreateProject {
                project: project.to_string(),
                source,
            })?;
        let stem = sanitize_type_name(name);
        self.discovered.record(project, &stem);
        Ok(stem)
    }

    fn store_artifact(&mut self, project: &str, stem: &str, text: &str) {
        match self.store.write_artifact(project, stem, text) {
            Ok(()) => {
                debug!(project = %project, artifact = %stem, "wrote artifact");
                self.stats.artifacts_written += 1;
            }
            Err(error) => {
                warn!(project = %project, artifact = %stem, %error, "failed to write artifact");
                self.stats.artifact_write_failures += 1;
            }
        }
    }
}

/// Options for [`run_dump`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DumpOptions {
    /// Delete stale projects and artifacts after the walk. When false the
    /// stale entries are only reported.
    pub prune: bool,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self { prune: true }
    }
}

/// Result of a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DumpSummary {
    pub scopes: usize,
    pub classes: usize,
    pub enums: usize,
    pub projects: usize,
    pub artifacts_written: usize,
    pub artifact_write_failures: usize,
    /// Stale entries found after the walk.
    pub plan: SyncPlan,
    /// Deletions performed; all zero when pruning is disabled.
    pub sync: SyncReport,
}

/// Dump every scope of `registry`, then the global scope, and reconcile the
/// output tree.
pub fn run_dump<R, S>(
    registry: &R,
    store: &mut S,
    identifiers: &mut dyn IdentifierSink,
    options: &DumpOptions,
) -> Result<DumpSummary>
where
    R: SchemaRegistry,
    S: ArtifactStore + ?Sized,
{
    let start = Instant::now();
    store.ensure_root().map_err(|source| DumpError::CreateRoot {
        location: store.location(),
        source,
    })?;

    let (discovered, stats) = {
        let mut dumper = Dumper::new(&mut *store, &mut *identifiers);
        for scope in registry.scopes() {
            dumper.dump_scope(scope)?;
        }
        dumper.dump_scope(registry.global_scope())?;
        dumper.finish()
    };

    let plan = plan_sync(&*store, &discovered)?;
    let sync = if options.prune {
        apply_sync(&mut *store, &plan)
    } else {
        if !plan.is_empty() {
            info!(
                stale_projects = plan.stale_projects.len(),
                stale_artifacts = plan.stale_artifacts.len(),
                "pruning disabled, keeping stale entries"
            );
        }
        SyncReport::default()
    };

    info!(
        scopes = stats.scopes,
        classes = stats.classes,
        enums = stats.enums,
        projects = discovered.project_count(),
        artifacts = discovered.artifact_count(),
        removed_projects = sync.removed_projects,
        removed_artifacts = sync.removed_artifacts,
        duration_ms = start.elapsed().as_millis(),
        "schema dump complete"
    );

    Ok(DumpSummary {
        scopes: stats.scopes,
        classes: stats.classes,
        enums: stats.enums,
        projects: discovered.project_count(),
        artifacts_written: stats.artifacts_written,
        artifact_write_failures: stats.artifact_write_failures,
        plan,
        sync,
    })
}
