use leaching_prediction_toolbox::leaching::derived::{
    acid_volume_from_mass, ph_from_concentration, PULP_DENSITY_G_PER_L,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6})"
    );
}

#[test]
fn ph_above_one_molar_clamps_to_zero() {
    assert_eq!(ph_from_concentration(1.5), 0.0);
    assert_eq!(ph_from_concentration(10.0), 0.0);
}

#[test]
fn ph_in_dilute_range_is_negative_log10() {
    assert_close("0.01 mol/L", ph_from_concentration(0.01), 2.0, 1e-12);
    assert_close("0.1 mol/L", ph_from_concentration(0.1), 1.0, 1e-12);
    assert_close("1 mol/L", ph_from_concentration(1.0), 0.0, 1e-12);
}

#[test]
fn ph_nonpositive_concentration_clamps_to_zero() {
    assert_eq!(ph_from_concentration(0.0), 0.0);
    assert_eq!(ph_from_concentration(-0.5), 0.0);
}

#[test]
fn acid_volume_uses_fixed_pulp_density() {
    assert_eq!(PULP_DENSITY_G_PER_L, 200.0);
    assert_close("100 g", acid_volume_from_mass(100.0), 0.5, 1e-12);
    assert_close("250 g", acid_volume_from_mass(250.0), 1.25, 1e-12);
}

#[test]
fn acid_volume_nonpositive_mass_is_zero() {
    assert_eq!(acid_volume_from_mass(0.0), 0.0);
    assert_eq!(acid_volume_from_mass(-10.0), 0.0);
}
