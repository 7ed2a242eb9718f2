//! Integration tests for the lumped-oscillator extraction.

use nalgebra::DMatrix;
use qlom_lom::{
    BusFrequencies, ExtractionParams, HamiltonianReport, LomAnalysis, LomError, analyze_export,
    extract_transmon_coupled,
};
use qlom_lom::coupling::UNCOUPLED_T1;
use qlom_q3d::{NodeRoles, parse_q3d_export};

const FF: f64 = 1e-15;

/// Pocket transmon with the pads coupled equally to the readout pad.
/// Order: ground, pad 1, pad 2, readout (fF).
fn pocket_symmetric() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        4,
        4,
        &[
            150.0, -50.0, -50.0, -50.0, //
            -50.0, 100.0, -45.0, -5.0, //
            -50.0, -45.0, 100.0, -5.0, //
            -50.0, -5.0, -5.0, 60.0,
        ],
    ) * FF
}

/// Same pocket with the readout pad closer to pad 1.
fn pocket_asymmetric() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        4,
        4,
        &[
            150.0, -50.0, -50.0, -50.0, //
            -50.0, 100.0, -45.0, -8.0, //
            -50.0, -45.0, 100.0, -2.0, //
            -50.0, -8.0, -2.0, 60.0,
        ],
    ) * FF
}

/// bus 1, bus 2, ground, pad 1, pad 2, readout (fF).
fn three_port() -> DMatrix<f64> {
    DMatrix::from_row_slice(
        6,
        6,
        &[
            60.0, -1.0, -30.0, -6.0, -1.0, -0.5, //
            -1.0, 60.0, -30.0, -1.0, -6.0, -0.5, //
            -30.0, -30.0, 200.0, -50.0, -50.0, -40.0, //
            -6.0, -1.0, -50.0, 110.0, -45.0, -8.0, //
            -1.0, -6.0, -50.0, -45.0, 110.0, -2.0, //
            -0.5, -0.5, -40.0, -8.0, -2.0, 60.0,
        ],
    ) * FF
}

fn params(ports: i64) -> ExtractionParams {
    ExtractionParams::new(20e-9, 2e-15, ports, 7.0).with_grid_points(11)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn negative_port_count_is_rejected() {
    let cap = DMatrix::<f64>::zeros(2, 2);
    assert!(matches!(
        extract_transmon_coupled(&cap, &params(-1)),
        Err(LomError::NegativePortCount(-1))
    ));
}

#[test]
fn size_mismatch_is_rejected() {
    let cap = DMatrix::<f64>::identity(3, 3) * 100.0 * FF;
    assert!(matches!(
        extract_transmon_coupled(&cap, &params(1)),
        Err(LomError::MatrixSize {
            expected: 4,
            found: 3
        })
    ));
}

#[test]
fn invalid_critical_current_is_rejected() {
    let p = ExtractionParams::new(0.0, 2e-15, 1, 7.0);
    assert!(matches!(
        extract_transmon_coupled(&pocket_symmetric(), &p),
        Err(LomError::InvalidParameter { .. })
    ));
}

// ---------------------------------------------------------------------------
// Physics
// ---------------------------------------------------------------------------

#[test]
fn uncoupled_qubit_reports_default_t1() {
    let cap = DMatrix::from_row_slice(
        3,
        3,
        &[
            100.0, -50.0, -50.0, //
            -50.0, 95.0, -45.0, //
            -50.0, -45.0, 95.0,
        ],
    ) * FF;
    let analysis = extract_transmon_coupled(&cap, &params(0)).unwrap();
    assert_eq!(analysis.couplings.t1, 100.0);
    assert!(analysis.report.ports.is_empty());
    assert!(analysis.report.bus_bus.is_empty());
    assert!((analysis.report.cq_ff - 72.0).abs() < 1e-9);
}

#[test]
fn pocket_transmon_end_to_end() {
    let analysis = extract_transmon_coupled(&pocket_symmetric(), &params(1)).unwrap();
    let r = &analysis.report;

    assert!((r.cq_ff - 74.5).abs() < 1e-9);
    assert!(r.f_q_ghz > 4.0 && r.f_q_ghz < 6.0, "f_q = {}", r.f_q_ghz);
    assert!(
        r.alpha_mhz > -350.0 && r.alpha_mhz < -150.0,
        "alpha = {}",
        r.alpha_mhz
    );
    assert!((r.f_q_ghz - 4.268).abs() < 0.01);
    assert!((r.ec_mhz - 260.0).abs() < 0.5);
    assert!((r.ej_ghz - 9.930).abs() < 0.01);
    assert!((r.lq_nh - 16.45).abs() < 0.01);

    // Equal pad couplings cancel: no net drive of the readout.
    assert_eq!(r.ports.len(), 1);
    assert_eq!(r.ports[0].g_mhz, 0.0);
    assert_eq!(r.ports[0].chi_mhz, 0.0);
    assert_eq!(r.ports[0].t1_us, None);
    assert_eq!(r.ports[0].purcell_rate_hz, 0.0);
    assert_eq!(analysis.couplings.t1, 100.0);
}

#[test]
fn asymmetric_pocket_couples_to_readout() {
    let analysis = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let r = &analysis.report;
    let port = &r.ports[0];

    assert!((r.cq_ff - 74.418).abs() < 1e-3);
    assert!((port.resonator_ghz - 7.0).abs() < 1e-12);
    assert!((port.tcqbus_ff - 2.727).abs() < 1e-3);
    assert!((port.g_mhz - 34.19).abs() < 0.05, "g = {}", port.g_mhz);
    assert!((port.chi_mhz + 0.0924).abs() < 1e-3, "chi = {}", port.chi_mhz);
    let t1 = port.t1_us.unwrap();
    assert!((t1 - 2524.6).abs() < 5.0, "T1 = {t1}");
    assert!((r.t1_us - t1).abs() < 1e-9);
}

#[test]
fn g_scale_multiplies_coupling() {
    let base = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let scaled =
        extract_transmon_coupled(&pocket_asymmetric(), &params(1).with_g_scale(2.0)).unwrap();
    let ratio = scaled.report.ports[0].g_mhz / base.report.ports[0].g_mhz;
    assert!((ratio - 2.0).abs() < 1e-12);
}

#[test]
fn three_ports_with_buses() {
    let p = params(3).with_bus_frequencies(BusFrequencies::PerBus(vec![6.6, 6.8]));
    let analysis = extract_transmon_coupled(&three_port(), &p).unwrap();
    let r = &analysis.report;

    assert_eq!(analysis.reduced.port_index, vec![5, 0, 1]);
    assert!((r.cq_ff - 77.927).abs() < 1e-3);
    assert_eq!(r.ports.len(), 3);
    assert!((r.ports[0].g_mhz - 33.35).abs() < 0.05);
    assert!((r.ports[1].g_mhz - 26.59).abs() < 0.05);
    assert!((r.ports[2].g_mhz + 31.38).abs() < 0.05);
    assert!((r.ports[1].resonator_ghz - 6.6).abs() < 1e-12);
    assert!((r.t1_us - 2443.3).abs() < 5.0);

    assert_eq!(r.bus_bus.len(), 3);
    assert_eq!((r.bus_bus[0].from, r.bus_bus[0].to), (1, 2));
    assert!((r.bus_bus[0].g_mhz - 3.054).abs() < 1e-2);
    assert!((r.bus_bus[2].g_mhz - 3.901).abs() < 1e-2);
}

#[test]
fn quarter_wave_flag_changes_coupling() {
    let half = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let quarter =
        extract_transmon_coupled(&pocket_asymmetric(), &params(1).with_quarter_wave(vec![true]))
            .unwrap();
    assert_ne!(half.report.ports[0].g_mhz, quarter.report.ports[0].g_mhz);
    assert_eq!(half.report.f_q_ghz, quarter.report.f_q_ghz);
}

#[test]
fn resonator_on_qubit_frequency_is_degenerate() {
    let baseline = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let p = ExtractionParams::new(20e-9, 2e-15, 1, baseline.levels.f01_ghz).with_grid_points(11);
    match extract_transmon_coupled(&pocket_asymmetric(), &p) {
        Err(LomError::DegenerateResonance { port, .. }) => assert_eq!(port, 0),
        other => panic!("expected DegenerateResonance, got {other:?}"),
    }
}

#[test]
fn resonator_on_second_transition_is_degenerate() {
    let baseline = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let f12 = baseline.levels.f01_ghz + baseline.levels.anharmonicity_mhz / 1e3;
    let p = ExtractionParams::new(20e-9, 2e-15, 1, f12).with_grid_points(11);
    match extract_transmon_coupled(&pocket_asymmetric(), &p) {
        Err(LomError::DegenerateResonance {
            port,
            transition_ghz,
            ..
        }) => {
            assert_eq!(port, 0);
            assert!((transition_ghz - f12).abs() < 1e-9);
        }
        other => panic!("expected DegenerateResonance, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// From an export
// ---------------------------------------------------------------------------

#[test]
fn analyze_export_reorders_by_label() {
    // Alphabetical export order: ground, pad_a, pad_b, readout is already
    // canonical for one port, so list it shuffled.
    let text = "C Units:fF, G Units:mSie\n\
                Capacitance Matrix\n\
                \treadout\tpad_b\tground\tpad_a\n\
                readout\t60\t-2\t-50\t-8\n\
                pad_b\t-2\t100\t-50\t-45\n\
                ground\t-50\t-50\t150\t-50\n\
                pad_a\t-8\t-45\t-50\t100\n";
    let export = parse_q3d_export(text).unwrap();
    let roles = NodeRoles {
        ground: "ground".into(),
        pads: ["pad_a".into(), "pad_b".into()],
        readout: Some("readout".into()),
        buses: vec![],
    };

    let from_export = analyze_export(&export, Some(&roles), &params(1)).unwrap();
    let direct = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    assert!((from_export.report.cq_ff - direct.report.cq_ff).abs() < 1e-9);
    assert!((from_export.report.ports[0].g_mhz - direct.report.ports[0].g_mhz).abs() < 1e-6);
}

#[test]
fn report_serializes_to_json() {
    let analysis = extract_transmon_coupled(&pocket_asymmetric(), &params(1)).unwrap();
    let json = serde_json::to_value(&analysis.report).unwrap();
    assert!(json["f_q_ghz"].as_f64().unwrap() > 4.0);
    assert_eq!(json["ports"][0]["port"], 1);

    let text = analysis.report.to_string();
    assert!(text.contains("f_Q"));
    assert!(text.contains("gbus1_in_MHz"));
}

#[test]
fn uncoupled_port_report_reads_back_from_json() {
    let analysis = extract_transmon_coupled(&pocket_symmetric(), &params(1)).unwrap();
    let json = serde_json::to_string(&analysis.report).unwrap();
    let back: HamiltonianReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.ports.len(), 1);
    assert_eq!(back.ports[0].t1_us, None);
    assert_eq!(back.ports[0].g_mhz, 0.0);
    assert!((back.t1_us - UNCOUPLED_T1 / 1e-6).abs() < 1e-3);
    assert!((back.cq_ff - analysis.report.cq_ff).abs() < 1e-9);

    let full = serde_json::to_string(&analysis).unwrap();
    let back: LomAnalysis = serde_json::from_str(&full).unwrap();
    assert_eq!(back.couplings.ports[0].t1, None);
    assert!(analysis.report.to_string().contains("T1bus1 uncoupled"));
}
