//! Built-in procedures through the facade

use super::*;
use revcheck::procedures::InvolutoryMatrix;
use revcheck::procedures::catalog::MatrixApply;

#[test]
fn catalog_passes_with_default_options() {
    let reports = revcheck::run_catalog(&RunOptions::default()).unwrap();
    assert_eq!(reports.len(), catalog().len());
    for report in &reports {
        assert_eq!(report.rounds, 2);
    }
}

#[test]
fn catalog_passes_single_forward_run() {
    let reports = revcheck::run_catalog(&RunOptions::single()).unwrap();
    let exchange = reports.iter().find(|r| r.procedure == "exchange").unwrap();
    assert_eq!(exchange.steps, 2);
}

#[test]
fn reports_render_as_json_array() {
    let reports = revcheck::run_catalog(&RunOptions::default()).unwrap();
    let json = revcheck::reports_to_json(&reports).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed.as_array().unwrap().len(), reports.len());
    assert_eq!(parsed[0]["procedure"], "exchange");
}

#[test]
fn unknown_procedure_is_not_found() {
    let err = revcheck::Error::from(find("bubble-sort").err().unwrap());
    assert!(err.is_not_found());
}

#[test]
fn rejected_matrices_map_to_invalid_matrix() {
    let err: revcheck::Error = InvolutoryMatrix::new(vec![2, 0, 0, 2]).unwrap_err().into();
    assert!(matches!(err, revcheck::Error::InvalidMatrix(_)));
}

#[test]
fn four_by_four_matrix_round_trips() {
    // Block-diagonal: a swap and a reflection
    let m = InvolutoryMatrix::new(vec![
        0, 1, 0, 0, //
        1, 0, 0, 0, //
        0, 0, 1, 0, //
        0, 0, 3, -1,
    ])
    .unwrap();
    let p = MatrixApply::new(m, vec![1, 2, 3, 4]).unwrap();
    let report = p.run(&RunOptions::soak(4)).unwrap();
    assert_eq!(
        report.after[0].to_string(),
        "x: array[4] = [2, 1, 3, 5]"
    );
}

proptest::proptest! {
    #[test]
    fn any_even_round_count_restores_every_procedure(half in 1u32..6) {
        let reports = revcheck::run_catalog(&RunOptions::soak(half * 2)).unwrap();
        for report in reports {
            proptest::prop_assert_eq!(report.rounds, half * 2);
        }
    }
}
