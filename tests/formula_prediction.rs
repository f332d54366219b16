use leaching_prediction_toolbox::leaching::formula::{
    predict_mass_balance, FormulaError, FormulaInput,
};

#[test]
fn mass_balance_reference_case() {
    let res = predict_mass_balance(FormulaInput {
        solid_mass_g: 100.0,
        dry_residue_pct: 20.0,
    })
    .expect("formula calc");
    assert!((res.efficiency_pct - 80.0).abs() < 1e-12);
    assert!((res.residue_g - 20.0).abs() < 1e-12);
}

#[test]
fn efficiency_rounds_to_two_decimals() {
    let res = predict_mass_balance(FormulaInput {
        solid_mass_g: 3.0,
        dry_residue_pct: 33.333,
    })
    .expect("formula calc");
    // 66.667 → 66.67
    assert!((res.efficiency_pct - 66.67).abs() < 1e-12);
}

#[test]
fn repeated_invocation_is_deterministic() {
    let input = FormulaInput {
        solid_mass_g: 137.5,
        dry_residue_pct: 18.3,
    };
    let first = predict_mass_balance(input.clone()).expect("formula calc");
    let second = predict_mass_balance(input).expect("formula calc");
    assert_eq!(first.efficiency_pct, second.efficiency_pct);
    assert_eq!(first.residue_g, second.residue_g);
}

#[test]
fn efficiency_invariant_under_mass_scaling() {
    // RSS가 같으면 MP가 달라도 효율은 동일하다.
    let a = predict_mass_balance(FormulaInput {
        solid_mass_g: 50.0,
        dry_residue_pct: 12.5,
    })
    .expect("formula calc");
    let b = predict_mass_balance(FormulaInput {
        solid_mass_g: 500.0,
        dry_residue_pct: 12.5,
    })
    .expect("formula calc");
    assert_eq!(a.efficiency_pct, b.efficiency_pct);
    assert!((b.residue_g - 10.0 * a.residue_g).abs() < 1e-9);
}

#[test]
fn full_residue_means_zero_efficiency() {
    let res = predict_mass_balance(FormulaInput {
        solid_mass_g: 80.0,
        dry_residue_pct: 100.0,
    })
    .expect("formula calc");
    assert_eq!(res.efficiency_pct, 0.0);
    assert_eq!(res.residue_g, 80.0);
}

#[test]
fn nonpositive_mass_is_rejected() {
    for mass in [0.0, -5.0] {
        let err = predict_mass_balance(FormulaInput {
            solid_mass_g: mass,
            dry_residue_pct: 20.0,
        })
        .expect_err("mass must be positive");
        match err {
            FormulaError::NonPositiveMass { solid_mass_g } => assert_eq!(solid_mass_g, mass),
        }
    }
}
