//! Command-line runs against snapshot files.

use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;
use trackman_cli::{cli, run};
use trackman_editor::MemoryCatalog;
use trackman_schema::ArtifactKind;
use trackman_test_utils::sample_catalog;

fn snapshot() -> (TempDir, String) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    sample_catalog().save_to(&path).unwrap();
    let path = path.to_string_lossy().into_owned();
    (dir, path)
}

fn invoke(args: &[&str]) -> (anyhow::Result<()>, String) {
    let matches = cli()
        .try_get_matches_from(std::iter::once("trackman").chain(args.iter().copied()))
        .unwrap();
    let mut out = Vec::new();
    let result = run(&matches, &mut out);
    (result, String::from_utf8(out).unwrap())
}

fn bits(path: &str, kind: ArtifactKind, id: &str) -> u32 {
    MemoryCatalog::open(Path::new(path))
        .unwrap()
        .get(kind, id)
        .unwrap()
        .flag_bits
}

#[test]
fn show_prints_one_panel_per_kind() {
    let (_dir, path) = snapshot();

    let (result, out) = invoke(&["show", "--catalog", &path]);

    result.unwrap();
    for title in ["Orchestrations", "Send Ports", "Receive Ports", "Pipelines"] {
        assert!(out.contains(title), "missing {title} in:\n{out}");
    }
    assert!(out.contains("    SP.Orders.Out       x x - - . . - -"));
}

#[test]
fn show_single_kind() {
    let (_dir, path) = snapshot();

    let (result, out) = invoke(&["show", "--catalog", &path, "--kind", "pipeline"]);

    result.unwrap();
    assert!(out.starts_with("Pipelines (pipeline, 2 rows)"));
    assert!(!out.contains("Send Ports"));
}

#[test]
fn show_unknown_kind_fails() {
    let (_dir, path) = snapshot();
    let (result, _) = invoke(&["show", "--catalog", &path, "--kind", "adapter"]);
    assert!(result.unwrap_err().to_string().contains("adapter"));
}

#[test]
fn edit_saves_to_snapshot() {
    let (_dir, path) = snapshot();

    let (result, out) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--set",
        "pipeline:PassThruTransmit:PipelineEvents=true",
        "--toggle-row",
        "receive-port:RP.Quotes.Request",
    ]);

    result.unwrap();
    assert!(out.contains("pipeline PassThruTransmit -> 0b1"));
    assert!(out.contains("committed 2, failed 0"));
    assert_eq!(bits(&path, ArtifactKind::Pipeline, "PassThruTransmit"), 0b1);
    assert_eq!(bits(&path, ArtifactKind::ReceivePort, "RP.Quotes.Request"), 0xFF);
}

#[test]
fn dry_run_leaves_snapshot_alone() {
    let (_dir, path) = snapshot();

    let (result, out) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--toggle-column",
        "orchestration:ServiceStartEnd",
        "--dry-run",
    ]);

    result.unwrap();
    // Billing.Invoice sorts first and is unchecked, so every row becomes checked
    assert!(out.contains("orchestration Billing.Invoice -> 0b1"));
    assert!(!out.contains("committed"));
    assert_eq!(bits(&path, ArtifactKind::Orchestration, "Billing.Invoice"), 0);
}

#[test]
fn edits_apply_in_command_line_order() {
    let (_dir, path) = snapshot();

    // row toggle first sets every column of XmlReceive to false, then one cell back on
    let (result, _) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--toggle-row",
        "pipeline:XmlReceive",
        "--set",
        "pipeline:XmlReceive:OutboundMessageBody=true",
    ]);

    result.unwrap();
    assert_eq!(bits(&path, ArtifactKind::Pipeline, "XmlReceive"), 0b1_0000);
}

#[test]
fn locked_cell_edit_is_silent() {
    let (_dir, path) = snapshot();

    let (result, out) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--set",
        "send-port:SP.Orders.Out:BeforeReceivePipeline=true",
    ]);

    result.unwrap();
    assert_eq!(out, "no pending changes\n");
    assert_eq!(bits(&path, ArtifactKind::SendPort, "SP.Orders.Out"), 0b11);
}

#[test]
fn unknown_row_fails_without_saving() {
    let (_dir, path) = snapshot();

    let (result, _) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--set",
        "pipeline:PassThruTransmit:PipelineEvents=true",
        "--toggle-row",
        "pipeline:Missing",
    ]);

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("Missing"));
    assert_eq!(bits(&path, ArtifactKind::Pipeline, "PassThruTransmit"), 0);
}

#[test]
fn config_can_limit_open_kinds() {
    let (dir, path) = snapshot();
    let config = dir.path().join("trackman.toml");
    std::fs::write(&config, "kinds = [\"send-port\"]\n").unwrap();
    let config = config.to_string_lossy().into_owned();

    let (result, out) = invoke(&["show", "--catalog", &path, "--config", &config]);
    result.unwrap();
    assert!(out.contains("Send Ports"));
    assert!(!out.contains("Pipelines"));

    let (result, _) = invoke(&[
        "edit",
        "--catalog",
        &path,
        "--config",
        &config,
        "--toggle-row",
        "pipeline:XmlReceive",
    ]);
    assert!(format!("{:#}", result.unwrap_err()).contains("not open"));
}
