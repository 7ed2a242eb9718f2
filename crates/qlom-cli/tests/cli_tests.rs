//! CLI parsing and command tests.
//!
//! Argument parsing is checked with clap's `try_parse_from`; the commands'
//! library halves are run against small exports written to temp files.

use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use tempfile::NamedTempFile;

use qlom_cli::commands::common::{OutputFormat, load_export};
use qlom_cli::commands::layout::{ComponentKind, build};
use qlom_cli::commands::levels::write_levels_csv;
use qlom_cli::commands::{analyze, fit, matrix};
use qlom_cli::{AnalysisConfig, Cli, Commands};
use qlom_transmon::{FitOptions, TransmonError, levels_vs_ng};

const EXPORT: &str = "DesignVariation:$BBoxL='650um' Lj_1='13nH'
Setup1:LastAdaptive
Problem Type:C
C Units:farad, G Units:mSie
Reduce Matrix:Original
Frequency: 5.5E+09 Hz

Capacitance Matrix
\tground_plane\tQ1_bus_Q0_connector_pad\tQ1_bus_Q2_connector_pad\tQ1_pad_bot\tQ1_pad_top1\tQ1_readout_connector_pad
ground_plane\t2.8829E-13\t-3.254E-14\t-3.1978E-14\t-4.0063E-14\t-4.3842E-14\t-3.0053E-14
Q1_bus_Q0_connector_pad\t-3.254E-14\t4.7257E-14\t-2.2765E-16\t-1.269E-14\t-1.3351E-15\t-1.451E-16
Q1_bus_Q2_connector_pad\t-3.1978E-14\t-2.2765E-16\t4.5327E-14\t-1.218E-15\t-1.1552E-14\t-5.0414E-17
Q1_pad_bot\t-4.0063E-14\t-1.269E-14\t-1.218E-15\t9.5831E-14\t-3.2415E-14\t-8.3665E-15
Q1_pad_top1\t-4.3842E-14\t-1.3351E-15\t-1.1552E-14\t-3.2415E-14\t9.132E-14\t-1.0199E-15
Q1_readout_connector_pad\t-3.0053E-14\t-1.451E-16\t-5.0414E-17\t-8.3665E-15\t-1.0199E-15\t3.9884E-14
";

const CONFIG: &str = "\
critical_current_na: 20
junction_capacitance_ff: 2
readout_frequency_ghz: 7.0
bus_frequencies_ghz: [6.6, 6.8]
grid_points: 11
nodes:
  ground: ground_plane
  pads: [Q1_pad_bot, Q1_pad_top1]
  readout: Q1_readout_connector_pad
  buses: [Q1_bus_Q0_connector_pad, Q1_bus_Q2_connector_pad]
";

fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file
}

// ============================================================================
// Argument parsing
// ============================================================================

#[test]
fn parse_analyze_defaults() {
    let cli = Cli::try_parse_from(["qlom", "analyze", "-i", "cap.txt"]).unwrap();
    assert_eq!(cli.verbose, 0);
    match cli.command {
        Commands::Analyze {
            input,
            config,
            ports,
            format,
        } => {
            assert_eq!(input, PathBuf::from("cap.txt"));
            assert!(config.is_none());
            assert!(ports.is_none());
            assert_eq!(format, OutputFormat::Table);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_global_verbosity() {
    let cli = Cli::try_parse_from(["qlom", "levels", "--cq-ff", "74.5", "--ic-na", "20", "-vv"])
        .unwrap();
    assert_eq!(cli.verbose, 2);
    match cli.command {
        Commands::Levels { grid, export, .. } => {
            assert_eq!(grid, 51);
            assert!(export.is_none());
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_fit_flags() {
    let cli = Cli::try_parse_from([
        "qlom",
        "fit",
        "--c-guess-ff",
        "70",
        "--ic-guess-na",
        "20",
        "--f01-ghz",
        "4.3",
        "--f02-half-ghz",
        "4.17",
        "--allow-unconverged",
    ])
    .unwrap();
    match cli.command {
        Commands::Fit {
            max_iterations,
            allow_unconverged,
            ..
        } => {
            assert_eq!(max_iterations, 100);
            assert!(allow_unconverged);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_requires_fit_targets() {
    assert!(Cli::try_parse_from(["qlom", "fit", "--c-guess-ff", "70"]).is_err());
}

#[test]
fn parse_move_flags_go_together() {
    assert!(
        Cli::try_parse_from(["qlom", "matrix", "-i", "cap.txt", "--move-from", "0"]).is_err()
    );
    assert!(
        Cli::try_parse_from([
            "qlom",
            "matrix",
            "-i",
            "cap.txt",
            "--move-from",
            "0",
            "--move-to",
            "2",
            "--units",
            "fF",
        ])
        .is_ok()
    );
}

#[test]
fn parse_move_from_index_list() {
    let cli = Cli::try_parse_from([
        "qlom",
        "matrix",
        "-i",
        "cap.txt",
        "--move-from",
        "0,1",
        "--move-to",
        "3",
    ])
    .unwrap();
    match cli.command {
        Commands::Matrix {
            move_from, move_to, ..
        } => {
            assert_eq!(move_from, Some(vec![0, 1]));
            assert_eq!(move_to, Some(3));
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_rejects_bad_move_index() {
    for bad in ["1,x", "-1", "0,,2"] {
        let args = ["qlom", "matrix", "-i", "cap.txt", "--move-from", bad, "--move-to", "2"];
        assert!(Cli::try_parse_from(args).is_err(), "accepted --move-from {bad}");
    }
}

#[test]
fn parse_layout_component() {
    let cli = Cli::try_parse_from(["qlom", "layout", "--component", "transmon-pocket", "-n", "Q1"])
        .unwrap();
    match cli.command {
        Commands::Layout {
            component,
            name,
            format,
            ..
        } => {
            assert_eq!(component, ComponentKind::TransmonPocket);
            assert_eq!(name, "Q1");
            assert_eq!(format, OutputFormat::Json);
        }
        other => panic!("unexpected command {other:?}"),
    }
}

#[test]
fn parse_version_format() {
    let cli = Cli::try_parse_from(["qlom", "version", "-f", "json"]).unwrap();
    assert!(matches!(
        cli.command,
        Commands::Version {
            format: OutputFormat::Json
        }
    ));
}

#[test]
fn parse_rejects_unknown_format() {
    assert!(Cli::try_parse_from(["qlom", "mathieu", "--format", "xml"]).is_err());
}

// ============================================================================
// analyze / matrix
// ============================================================================

#[test]
fn analyze_reorders_by_configured_nodes() {
    let file = temp_file(".txt", EXPORT);
    let export = load_export(file.path()).unwrap();
    let config = AnalysisConfig::from_yaml(CONFIG).unwrap();

    let analysis = analyze::run(&export, &config, None).unwrap();
    let r = &analysis.report;
    assert_eq!(r.ports.len(), 3);
    assert!((r.ports[1].resonator_ghz - 6.6).abs() < 1e-12);
    assert!((r.ports[2].resonator_ghz - 6.8).abs() < 1e-12);
    assert!(r.cq_ff > 50.0 && r.cq_ff < 150.0, "Cq = {}", r.cq_ff);
    assert!(r.f_q_ghz > 3.0 && r.f_q_ghz < 8.0, "f_q = {}", r.f_q_ghz);
}

#[test]
fn matrix_move_matches_node_roles() {
    let file = temp_file(".txt", EXPORT);
    let export = load_export(file.path()).unwrap();

    // Moving ground behind the two buses gives the canonical order.
    let moved = matrix::transform(export.clone(), Some("fF"), Some((&[0][..], 2))).unwrap();
    assert_eq!(moved.units, "fF");
    assert_eq!(moved.capacitance.labels()[2], "ground_plane");
    assert!((moved.capacitance.get("Q1_pad_bot", "Q1_pad_top1").unwrap() + 32.415).abs() < 1e-9);

    let mut config = AnalysisConfig::from_yaml(CONFIG).unwrap();
    let by_roles = analyze::run(&export, &config, None).unwrap();
    config.nodes = None;
    let by_move = analyze::run(&moved, &config, None).unwrap();
    assert!((by_roles.report.cq_ff - by_move.report.cq_ff).abs() < 1e-9);
    assert!((by_roles.report.ports[0].g_mhz - by_move.report.ports[0].g_mhz).abs() < 1e-6);
}

#[test]
fn matrix_rejects_out_of_range_move() {
    let export = load_export(temp_file(".txt", EXPORT).path()).unwrap();
    assert!(matrix::transform(export, None, Some((&[7][..], 0))).is_err());
}

#[test]
fn analyze_matlab_export() {
    let text = "capMatrix = [150e-15, -50e-15, -50e-15, -50e-15;\n\
                -50e-15, 100e-15, -45e-15, -8e-15;\n\
                -50e-15, -45e-15, 100e-15, -2e-15;\n\
                -50e-15, -8e-15, -2e-15, 60e-15];\n";
    let file = temp_file(".m", text);
    let export = load_export(file.path()).unwrap();
    assert_eq!(export.units, "farad");

    let config = AnalysisConfig::from_yaml("grid_points: 11\n").unwrap();
    let analysis = analyze::run(&export, &config, None).unwrap();
    let port = &analysis.report.ports[0];
    assert!((analysis.report.cq_ff - 74.418).abs() < 1e-3);
    assert!((port.g_mhz - 34.19).abs() < 0.05, "g = {}", port.g_mhz);
}

#[test]
fn analyze_rejects_tiny_matrix() {
    let text = "C Units:fF, G Units:mSie\n\
                Capacitance Matrix\n\
                \tground\tpad\n\
                ground\t10\t-1\n\
                pad\t-1\t10\n";
    let export = load_export(temp_file(".txt", text).path()).unwrap();
    assert!(analyze::run(&export, &AnalysisConfig::default(), None).is_err());
}

// ============================================================================
// levels / fit / layout
// ============================================================================

#[test]
fn levels_csv_has_one_row_per_offset_charge() {
    let levels = levels_vs_ng(74.5, 20.0, 3).unwrap();
    let mut wtr = csv::Writer::from_writer(Vec::new());
    write_levels_csv(&levels, &mut wtr).unwrap();
    let csv = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "ng,E0_ghz,E1_ghz,E2_ghz,E3_ghz");
    assert!(lines[1].starts_with("-1,0,"));
    assert_eq!(lines[2].split(',').count(), 5);
}

#[test]
fn fit_is_strict_unless_allowed() {
    let options = FitOptions {
        max_iterations: 1,
        grid_points: 11,
        ..FitOptions::default()
    };

    let strict = fit::run(70.0, 20.0, 4.3, 4.17, &options, false).unwrap_err();
    assert!(matches!(
        strict.downcast_ref::<TransmonError>(),
        Some(TransmonError::FitNotConverged { .. })
    ));

    let loose = fit::run(70.0, 20.0, 4.3, 4.17, &options, true).unwrap();
    assert!(!loose.converged);
    assert_eq!(loose.iterations, 1);
}

#[test]
fn layout_defaults_and_yaml() {
    let rect = build(ComponentKind::RectangleHollow, "rect1", "").unwrap();
    assert_eq!(rect.len(), 1);
    assert_eq!(rect[0].component, "rect1");

    let yaml = "connection_pads:\n  readout: {}\n";
    let pocket = build(ComponentKind::TransmonPocket, "Q1", yaml).unwrap();
    let names: Vec<&str> = pocket.iter().map(|g| g.name.as_str()).collect();
    assert_eq!(names, ["pad_top", "pad_bot", "readout_connector_pad"]);
}

#[test]
fn layout_rejects_bad_yaml() {
    assert!(build(ComponentKind::RectangleHollow, "r", "width: [1, 2]\n").is_err());
}
