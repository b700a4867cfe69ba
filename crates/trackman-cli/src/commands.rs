//! `show` and `edit` against a JSON catalog snapshot

use crate::grid::{render_panel, render_report, render_writes};
use crate::ops::EditOp;
use anyhow::{bail, Context, Result};
use std::io::Write;
use std::path::Path;
use trackman_editor::{EditorConfig, EditorSession, MemoryCatalog};
use trackman_schema::{ArtifactKind, SchemaRegistry};

/// Load configuration from `path`, or defaults when no path is given
///
/// # Errors
/// Returns error if the file exists but cannot be read or parsed
pub fn load_config(path: Option<&Path>) -> Result<EditorConfig> {
    match path {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

fn open_catalog(path: &Path) -> Result<MemoryCatalog> {
    MemoryCatalog::open(path).with_context(|| format!("opening catalog {}", path.display()))
}

/// Print every open panel, or only the panel of `kind`
///
/// # Errors
/// Returns error if the catalog cannot be opened or `kind` is unknown
pub fn show(
    config: EditorConfig,
    catalog: &Path,
    kind: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let config = match kind {
        Some(kind) => config.with_kinds([kind.parse::<ArtifactKind>()?]),
        None => config,
    };
    let store = open_catalog(catalog)?;
    let session = EditorSession::open(config, SchemaRegistry::with_defaults(), &store)?;

    for panel in session.panels() {
        writeln!(out, "{}", render_panel(panel))?;
    }
    Ok(())
}

/// Apply `ops` in order, print the result and save unless `dry_run`
///
/// Accepted writes are written back to the snapshot file even when some writes fail.
///
/// # Errors
/// Returns error if an operation is invalid, the catalog cannot be saved, or any write was
/// refused
pub fn edit(
    config: EditorConfig,
    catalog: &Path,
    ops: &[EditOp],
    dry_run: bool,
    out: &mut impl Write,
) -> Result<()> {
    let mut store = open_catalog(catalog)?;
    let mut session = EditorSession::open(config, SchemaRegistry::with_defaults(), &store)?;

    for op in ops {
        op.apply(&mut session).with_context(|| op.to_string())?;
    }

    for panel in session.panels().filter(|panel| panel.is_dirty()) {
        writeln!(out, "{}", render_panel(panel))?;
    }
    write!(out, "{}", render_writes(&session.pending_writes()))?;

    if dry_run || !session.has_pending_changes() {
        return Ok(());
    }

    let report = session.save(&mut store)?;
    if report.persisted {
        store
            .save_to(catalog)
            .with_context(|| format!("writing catalog {}", catalog.display()))?;
    }
    write!(out, "{}", render_report(&report))?;

    if !report.is_complete() {
        bail!("{} of the pending writes were refused", report.failed.len());
    }
    Ok(())
}
