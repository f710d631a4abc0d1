use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use schemadump_core::{DumpOptions, FsStore, LineWriterSink, run_dump};
use schemadump_model::{InMemoryScope, SchemaRegistry, TypeScope, load_snapshot};

use crate::types::{DumpOutcome, DumpRequest, ScopeCounts};

/// Default file name of the identifier list, relative to the output directory.
pub const IDENTIFIERS_FILE_NAME: &str = "schema_identifiers.txt";

pub fn run_dump_command(request: &DumpRequest) -> Result<DumpOutcome> {
    let span = info_span!("dump", snapshot = %request.snapshot.display());
    let _guard = span.enter();

    let registry = load_snapshot(&request.snapshot)
        .context("load registry snapshot")?
        .into_registry();
    info!(scope_count = registry.scope_count(), "registry snapshot loaded");

    fs::create_dir_all(&request.output_dir).with_context(|| {
        format!("create output directory {}", request.output_dir.display())
    })?;
    let identifiers_file = request
        .identifiers_file
        .clone()
        .unwrap_or_else(|| request.output_dir.join(IDENTIFIERS_FILE_NAME));
    let file = File::create(&identifiers_file).with_context(|| {
        format!("create identifier list {}", identifiers_file.display())
    })?;
    let mut sink = LineWriterSink::new(BufWriter::new(file));

    let mut store = FsStore::new(&request.output_dir);
    let options = DumpOptions {
        prune: request.prune,
    };
    let summary =
        run_dump(&registry, &mut store, &mut sink, &options).context("dump schema registry")?;

    let identifiers_written = match sink.into_result() {
        Ok(lines) => Some(lines),
        Err(error) => {
            warn!(
                path = %identifiers_file.display(),
                %error,
                "identifier list is incomplete"
            );
            None
        }
    };

    Ok(DumpOutcome {
        schemas_dir: store.root().to_path_buf(),
        identifiers_file,
        identifiers_written,
        summary,
    })
}

pub fn run_inspect(snapshot: &Path) -> Result<Vec<ScopeCounts>> {
    let registry = load_snapshot(snapshot)
        .context("load registry snapshot")?
        .into_registry();
    let mut counts: Vec<ScopeCounts> = registry
        .scopes()
        .map(|scope| scope_counts(scope, false))
        .collect();
    counts.push(scope_counts(registry.global_scope(), true));
    Ok(counts)
}

fn scope_counts(scope: &InMemoryScope, global: bool) -> ScopeCounts {
    ScopeCounts {
        name: scope.name().to_string(),
        classes: scope.class_count(),
        enums: scope.enum_count(),
        global,
    }
}
