use leaching_prediction_toolbox::leaching::features::{
    assemble, FeatureSchema, LeachInput, SchemaError, SchemaPreset,
};
use leaching_prediction_toolbox::leaching::metal::{one_hot, EncodeError, Metal, METALS_FULL};

#[test]
fn preset_widths_match_training_columns() {
    assert_eq!(FeatureSchema::preset(SchemaPreset::Complete).width(), 14);
    assert_eq!(FeatureSchema::preset(SchemaPreset::Reduced).width(), 11);
    assert_eq!(FeatureSchema::preset(SchemaPreset::Restricted).width(), 9);
}

#[test]
fn complete_schema_feature_names_order() {
    let names = FeatureSchema::preset(SchemaPreset::Complete).feature_names();
    assert_eq!(names.len(), 14);
    assert_eq!(names[0], "MP(gr)");
    assert_eq!(names[1], "Cantidad Total(gr)");
    assert_eq!(names[7], "Volúmen de ácido (L)");
    assert_eq!(names[9], "cte2 (g/L)");
    assert_eq!(names[10], "Metal_Fe");
    assert_eq!(names[13], "Metal_Zn");
}

#[test]
fn restricted_schema_ends_with_mn_fe() {
    let names = FeatureSchema::preset(SchemaPreset::Restricted).feature_names();
    assert_eq!(names.len(), 9);
    assert_eq!(names[7], "Metal_Mn");
    assert_eq!(names[8], "Metal_Fe");
}

#[test]
fn one_hot_sets_exactly_one_flag() {
    for metal in METALS_FULL {
        let encoded = one_hot(metal, &METALS_FULL).expect("one-hot");
        assert_eq!(encoded.len(), 4);
        let ones = encoded.iter().filter(|v| **v == 1.0).count();
        let zeros = encoded.iter().filter(|v| **v == 0.0).count();
        assert_eq!(ones, 1);
        assert_eq!(zeros, 3);
    }
}

#[test]
fn one_hot_rejects_metal_outside_set() {
    let err = one_hot(Metal::Zn, &[Metal::Mn, Metal::Fe]).expect_err("Zn is not in the set");
    match err {
        EncodeError::UnsupportedMetal(m) => assert_eq!(m, Metal::Zn),
    }
}

#[test]
fn assemble_injects_derived_acid_volume() {
    let schema = FeatureSchema::preset(SchemaPreset::Complete);
    let input = LeachInput {
        solid_mass_g: 100.0,
        metal: Metal::Mn,
        ..LeachInput::default()
    };
    let vector = assemble(schema, &input).expect("assemble");
    assert_eq!(vector.width(), 14);
    // 파생 산 부피 열은 MP/200
    let idx = vector
        .names()
        .iter()
        .position(|n| n == "Volúmen de ácido (L)")
        .expect("acid volume column");
    assert!((vector.values()[idx] - 0.5).abs() < 1e-12);
    // 금속 원-핫은 Mn 위치만 1
    let mn = vector
        .names()
        .iter()
        .position(|n| n == "Metal_Mn")
        .expect("Mn column");
    assert_eq!(vector.values()[mn], 1.0);
    let fe = vector
        .names()
        .iter()
        .position(|n| n == "Metal_Fe")
        .expect("Fe column");
    assert_eq!(vector.values()[fe], 0.0);
}

#[test]
fn assemble_restricted_rejects_unsupported_metal() {
    let schema = FeatureSchema::preset(SchemaPreset::Restricted);
    let input = LeachInput {
        solid_mass_g: 10.0,
        metal: Metal::Mg,
        ..LeachInput::default()
    };
    let err = assemble(schema, &input).expect_err("Mg not in restricted set");
    assert!(matches!(
        err,
        SchemaError::Encode(EncodeError::UnsupportedMetal(Metal::Mg))
    ));
}

#[test]
fn validate_width_flags_mismatch() {
    let schema = FeatureSchema::preset(SchemaPreset::Reduced);
    let vector = assemble(schema, &LeachInput::default()).expect("assemble");
    vector.validate_width(11).expect("matching width");
    let err = vector.validate_width(14).expect_err("width should mismatch");
    match err {
        SchemaError::WidthMismatch { expected, got } => {
            assert_eq!(expected, 14);
            assert_eq!(got, 11);
        }
        other => panic!("unexpected error: {other}"),
    }
}
