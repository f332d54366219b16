use std::io::{self, Write};

use crate::app::AppError;
use crate::artifact::ModelSet;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::leaching::derived;
use crate::leaching::features::{self, FeatureSchema, LeachInput, SchemaPreset};
use crate::leaching::formula::{self, FormulaInput};
use crate::leaching::importance;
use crate::leaching::metal::Metal;
use crate::leaching::predictor::{Predictor, Strategy};
use crate::units::TimeUnit;

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    FormulaPrediction,
    ModelPrediction,
    Importances,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    println!("{}", tr.t(keys::MAIN_MENU_TITLE));
    println!("{}", tr.t(keys::MAIN_MENU_FORMULA));
    println!("{}", tr.t(keys::MAIN_MENU_MODEL));
    println!("{}", tr.t(keys::MAIN_MENU_IMPORTANCES));
    println!("{}", tr.t(keys::MAIN_MENU_SETTINGS));
    println!("{}", tr.t(keys::MAIN_MENU_EXIT));
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        match sel.trim() {
            "1" => return Ok(MenuChoice::FormulaPrediction),
            "2" => return Ok(MenuChoice::ModelPrediction),
            "3" => return Ok(MenuChoice::Importances),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => println!("{}", tr.t(keys::INVALID_SELECTION_RETRY)),
        }
    }
}

/// 질량수지 공식 예측 메뉴를 처리한다.
pub fn handle_formula(tr: &Translator) -> Result<(), AppError> {
    println!("{}", tr.t(keys::FORMULA_HEADING));
    println!("{}", tr.t(keys::HELP_FORMULA));
    let solid_mass_g = read_f64(tr, tr.t(keys::PROMPT_SOLID_MASS))?;
    let dry_residue_pct = read_f64(tr, tr.t(keys::PROMPT_DRY_RESIDUE))?;
    let result = formula::predict_mass_balance(FormulaInput {
        solid_mass_g,
        dry_residue_pct,
    })?;
    println!("{} {:.2} %", tr.t(keys::RESULT_EFFICIENCY), result.efficiency_pct);
    println!("{} {:.2} g", tr.t(keys::RESULT_RESIDUE), result.residue_g);
    Ok(())
}

/// 회귀 모델 예측 메뉴를 처리한다.
pub fn handle_model(
    tr: &Translator,
    cfg: &Config,
    models: Option<&ModelSet>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::MODEL_HEADING));
    let Some(models) = models else {
        println!("{}", tr.t(keys::MODELS_NOT_LOADED));
        return Ok(());
    };
    println!("{}", tr.t(keys::HELP_MODEL));

    let schema = FeatureSchema::preset(cfg.schema);
    let input = read_leach_input(tr, cfg, schema)?;

    // 예측 전 표시 전용 파생값 피드백
    let ph = derived::ph_from_concentration(input.acid_concentration_mol_per_l);
    let volume = derived::acid_volume_from_mass(input.solid_mass_g);
    println!("{} {:.2}", tr.t(keys::DERIVED_PH), ph);
    println!("{} {:.5}", tr.t(keys::DERIVED_ACID_VOLUME), volume);

    let prediction = Predictor::Model(models).predict(schema, &input)?;
    println!(
        "{} {:.2} %",
        tr.t(keys::RESULT_EFFICIENCY),
        prediction.efficiency_pct
    );
    println!("{} {:.2} g", tr.t(keys::RESULT_RESIDUE), prediction.residue_g);
    if let Some(cte2) = prediction.neutralized_output_g {
        println!("{} {:.2} g", tr.t(keys::RESULT_NEUTRALIZED), cte2);
    }
    if let Some(cte3) = prediction.solid_residue_g {
        println!("{} {:.2} g", tr.t(keys::RESULT_SOLID_RESIDUE), cte3);
    }
    Ok(())
}

fn read_leach_input(
    tr: &Translator,
    cfg: &Config,
    schema: &FeatureSchema,
) -> Result<LeachInput, AppError> {
    let solid_mass_g = read_f64(tr, tr.t(keys::PROMPT_SOLID_MASS))?;
    let total_quantity_g = read_f64(tr, tr.t(keys::PROMPT_TOTAL_QUANTITY))?;
    let time_prompt = match cfg.time_unit {
        TimeUnit::Hours => tr.t(keys::PROMPT_TIME_HOURS),
        TimeUnit::Minutes => tr.t(keys::PROMPT_TIME_MINUTES),
    };
    let time_raw = read_f64(tr, time_prompt)?;
    let temperature_c = read_f64(tr, tr.t(keys::PROMPT_TEMPERATURE))?;
    let solvent = read_f64(tr, tr.t(keys::PROMPT_SOLVENT))?;
    let wash_liquor = read_f64(tr, tr.t(keys::PROMPT_WASH_LIQUOR))?;
    let acid_concentration = read_f64(tr, tr.t(keys::PROMPT_ACID_CONCENTRATION))?;
    let dry_residue_pct = read_f64(tr, tr.t(keys::PROMPT_DRY_RESIDUE))?;
    let cte2_g_per_l = read_f64(tr, tr.t(keys::PROMPT_CTE2))?;
    let metal = read_metal(tr, schema)?;
    Ok(LeachInput {
        solid_mass_g,
        total_quantity_g,
        time_h: cfg.time_unit.to_hours(time_raw),
        temperature_c,
        solvent,
        wash_liquor,
        acid_concentration_mol_per_l: acid_concentration,
        dry_residue_pct,
        cte2_g_per_l,
        metal,
    })
}

fn read_metal(tr: &Translator, schema: &FeatureSchema) -> Result<Metal, AppError> {
    let options: Vec<&str> = schema.metals.iter().map(|m| m.code()).collect();
    loop {
        let sel = read_line(&format!(
            "{}({}) ",
            tr.t(keys::PROMPT_METAL),
            options.join("/")
        ))?;
        if let Some(metal) = Metal::from_code(sel.trim()) {
            if schema.metals.contains(&metal) {
                return Ok(metal);
            }
        }
        println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
    }
}

/// 특징 중요도 메뉴를 처리한다.
pub fn handle_importances(
    tr: &Translator,
    cfg: &Config,
    models: Option<&ModelSet>,
) -> Result<(), AppError> {
    println!("{}", tr.t(keys::IMPORTANCE_HEADING));
    let Some(models) = models else {
        println!("{}", tr.t(keys::MODELS_NOT_LOADED));
        return Ok(());
    };
    println!("{}", tr.t(keys::HELP_IMPORTANCES));

    let schema = FeatureSchema::preset(cfg.schema);
    let names = schema.feature_names();

    println!("\n{}", tr.t(keys::IMPORTANCE_EFFICIENCY_TITLE));
    print_ranked(&names, &models.efficiency.feature_importances, cfg.top_importances)?;
    println!("\n{}", tr.t(keys::IMPORTANCE_RESIDUE_TITLE));
    print_ranked(&names, &models.residue.feature_importances, cfg.top_importances)?;
    Ok(())
}

fn print_ranked(names: &[String], scores: &[f64], top_n: usize) -> Result<(), AppError> {
    let ranked = importance::rank(names, scores, top_n)?;
    for (i, item) in ranked.iter().enumerate() {
        println!("{:>2}. {:<26} {:.4}", i + 1, item.name, item.score);
    }
    Ok(())
}

/// 설정 메뉴를 처리한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_STRATEGY), cfg.strategy);
    println!("{}", tr.t(keys::SETTINGS_STRATEGY_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if !sel.trim().is_empty() {
        cfg.strategy = match sel.trim() {
            "1" => Strategy::Formula,
            "2" => Strategy::Model,
            _ => {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                cfg.strategy
            }
        };
    }

    println!("{} {:?}", tr.t(keys::SETTINGS_CURRENT_SCHEMA), cfg.schema);
    println!("{}", tr.t(keys::SETTINGS_SCHEMA_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if !sel.trim().is_empty() {
        cfg.schema = match sel.trim() {
            "1" => SchemaPreset::Complete,
            "2" => SchemaPreset::Reduced,
            "3" => SchemaPreset::Restricted,
            _ => {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                cfg.schema
            }
        };
    }

    println!(
        "{} {:?}",
        tr.t(keys::SETTINGS_CURRENT_TIME_UNIT),
        cfg.time_unit
    );
    println!("{}", tr.t(keys::SETTINGS_TIME_UNIT_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if !sel.trim().is_empty() {
        cfg.time_unit = match sel.trim() {
            "1" => TimeUnit::Hours,
            "2" => TimeUnit::Minutes,
            _ => {
                println!("{}", tr.t(keys::SETTINGS_INVALID));
                cfg.time_unit
            }
        };
    }

    println!(
        "{} strategy={:?}, schema={:?}, time_unit={:?}",
        tr.t(keys::SETTINGS_SAVED),
        cfg.strategy,
        cfg.schema,
        cfg.time_unit
    );
    Ok(())
}

fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush().map_err(AppError::Io)?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).map_err(AppError::Io)?;
    Ok(buf)
}

fn read_f64(tr: &Translator, prompt: &str) -> Result<f64, AppError> {
    loop {
        let s = read_line(prompt)?;
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}

/// 모델 예측에서 사용할 스키마가 아티팩트와 맞는지 시작 시점에 확인한다.
pub fn check_schema_against_models(
    cfg: &Config,
    models: &ModelSet,
) -> Result<(), AppError> {
    let schema = FeatureSchema::preset(cfg.schema);
    if schema.width() != models.input_width() {
        return Err(AppError::Schema(
            features::SchemaError::WidthMismatch {
                expected: models.input_width(),
                got: schema.width(),
            },
        ));
    }
    Ok(())
}
