use leaching_prediction_toolbox::artifact::{ArtifactError, Model, ModelSet, Scaler};
use leaching_prediction_toolbox::leaching::features::{FeatureSchema, LeachInput, SchemaPreset};
use leaching_prediction_toolbox::leaching::metal::Metal;
use leaching_prediction_toolbox::leaching::predictor::Predictor;

const MODEL_TOML: &str = r#"
name = "regresion_eficiencia"
intercept = 10.0
coefficients = [2.0, 0.5, -1.0]
feature_importances = [0.6, 0.3, 0.1]
"#;

const SCALER_TOML: &str = r#"
mean = [1.0, 0.0, 2.0]
scale = [2.0, 1.0, 0.0]
"#;

fn identity_scaler(width: usize) -> Scaler {
    Scaler::from_toml_str(&format!(
        "mean = [{}]\nscale = [{}]\n",
        vec!["0.0"; width].join(", "),
        vec!["1.0"; width].join(", ")
    ))
    .expect("identity scaler")
}

fn constant_model(name: &str, intercept: f64, width: usize) -> Model {
    let zeros = vec!["0.0"; width].join(", ");
    Model::from_toml_str(&format!(
        "name = \"{name}\"\nintercept = {intercept}\ncoefficients = [{zeros}]\nfeature_importances = [{zeros}]\n"
    ))
    .expect("constant model")
}

#[test]
fn model_parses_and_evaluates_linearly() {
    let model = Model::from_toml_str(MODEL_TOML).expect("model parse");
    assert_eq!(model.input_width(), 3);
    // 10 + 2·1 + 0.5·2 - 1·3 = 10
    let y = model.predict(&[1.0, 2.0, 3.0]).expect("predict");
    assert!((y - 10.0).abs() < 1e-12);
}

#[test]
fn model_rejects_wrong_input_width() {
    let model = Model::from_toml_str(MODEL_TOML).expect("model parse");
    let err = model.predict(&[1.0, 2.0]).expect_err("width mismatch");
    assert!(matches!(
        err,
        ArtifactError::WidthMismatch { expected: 3, got: 2 }
    ));
}

#[test]
fn model_rejects_inconsistent_internal_lengths() {
    let src = r#"
name = "broken"
intercept = 0.0
coefficients = [1.0, 2.0]
feature_importances = [1.0]
"#;
    let err = Model::from_toml_str(src).expect_err("inconsistent artifact");
    assert!(matches!(err, ArtifactError::Inconsistent(_)));
}

#[test]
fn scaler_standardizes_and_passes_through_zero_scale() {
    let scaler = Scaler::from_toml_str(SCALER_TOML).expect("scaler parse");
    let out = scaler.transform(&[3.0, 5.0, 7.0]).expect("transform");
    // (3-1)/2 = 1, (5-0)/1 = 5, scale 0 → 원값 유지
    assert!((out[0] - 1.0).abs() < 1e-12);
    assert!((out[1] - 5.0).abs() < 1e-12);
    assert!((out[2] - 7.0).abs() < 1e-12);
}

#[test]
fn scaler_rejects_inconsistent_lengths() {
    let err =
        Scaler::from_toml_str("mean = [1.0, 2.0]\nscale = [1.0]\n").expect_err("inconsistent");
    assert!(matches!(err, ArtifactError::Inconsistent(_)));
}

#[test]
fn model_strategy_end_to_end_on_restricted_schema() {
    let schema = FeatureSchema::preset(SchemaPreset::Restricted);
    let width = schema.width();
    let models = ModelSet {
        efficiency: constant_model("eficiencia", 80.0, width),
        scaler_efficiency: identity_scaler(width),
        residue: constant_model("residuo", 20.0, width),
        scaler_residue: identity_scaler(width),
    };
    let input = LeachInput {
        solid_mass_g: 100.0,
        metal: Metal::Mn,
        ..LeachInput::default()
    };
    let p = Predictor::Model(&models)
        .predict(schema, &input)
        .expect("model predict");
    assert!((p.efficiency_pct - 80.0).abs() < 1e-12);
    assert!((p.residue_g - 20.0).abs() < 1e-12);
    // 보고용 후처리: cte2 = 효율·MP/100, cte3 = 잔사
    assert!((p.neutralized_output_g.expect("cte2") - 80.0).abs() < 1e-12);
    assert!((p.solid_residue_g.expect("cte3") - 20.0).abs() < 1e-12);
}

#[test]
fn model_strategy_rejects_schema_width_mismatch() {
    // 폭 9 모델에 폭 14 스키마를 물리면 조립 직후 거부된다.
    let width = FeatureSchema::preset(SchemaPreset::Restricted).width();
    let models = ModelSet {
        efficiency: constant_model("eficiencia", 80.0, width),
        scaler_efficiency: identity_scaler(width),
        residue: constant_model("residuo", 20.0, width),
        scaler_residue: identity_scaler(width),
    };
    let schema = FeatureSchema::preset(SchemaPreset::Complete);
    let input = LeachInput {
        solid_mass_g: 100.0,
        ..LeachInput::default()
    };
    let err = Predictor::Model(&models)
        .predict(schema, &input)
        .expect_err("width mismatch");
    let msg = err.to_string();
    assert!(msg.contains("14") && msg.contains("9"), "msg={msg}");
}
