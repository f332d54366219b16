use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_FORMULA: &str = "main_menu.formula";
    pub const MAIN_MENU_MODEL: &str = "main_menu.model";
    pub const MAIN_MENU_IMPORTANCES: &str = "main_menu.importances";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";

    pub const FORMULA_HEADING: &str = "formula.heading";
    pub const MODEL_HEADING: &str = "model.heading";

    pub const PROMPT_SOLID_MASS: &str = "prompt.solid_mass";
    pub const PROMPT_TOTAL_QUANTITY: &str = "prompt.total_quantity";
    pub const PROMPT_TIME_HOURS: &str = "prompt.time_hours";
    pub const PROMPT_TIME_MINUTES: &str = "prompt.time_minutes";
    pub const PROMPT_TEMPERATURE: &str = "prompt.temperature";
    pub const PROMPT_SOLVENT: &str = "prompt.solvent";
    pub const PROMPT_WASH_LIQUOR: &str = "prompt.wash_liquor";
    pub const PROMPT_ACID_CONCENTRATION: &str = "prompt.acid_concentration";
    pub const PROMPT_DRY_RESIDUE: &str = "prompt.dry_residue";
    pub const PROMPT_CTE2: &str = "prompt.cte2";
    pub const PROMPT_METAL: &str = "prompt.metal";

    pub const DERIVED_PH: &str = "derived.ph";
    pub const DERIVED_ACID_VOLUME: &str = "derived.acid_volume";

    pub const RESULT_EFFICIENCY: &str = "result.efficiency";
    pub const RESULT_RESIDUE: &str = "result.residue";
    pub const RESULT_NEUTRALIZED: &str = "result.neutralized";
    pub const RESULT_SOLID_RESIDUE: &str = "result.solid_residue";

    pub const IMPORTANCE_HEADING: &str = "importance.heading";
    pub const IMPORTANCE_EFFICIENCY_TITLE: &str = "importance.efficiency_title";
    pub const IMPORTANCE_RESIDUE_TITLE: &str = "importance.residue_title";
    pub const MODELS_NOT_LOADED: &str = "importance.models_not_loaded";
    pub const MODELS_LOADED: &str = "importance.models_loaded";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_STRATEGY: &str = "settings.current_strategy";
    pub const SETTINGS_STRATEGY_OPTIONS: &str = "settings.strategy_options";
    pub const SETTINGS_CURRENT_SCHEMA: &str = "settings.current_schema";
    pub const SETTINGS_SCHEMA_OPTIONS: &str = "settings.schema_options";
    pub const SETTINGS_CURRENT_TIME_UNIT: &str = "settings.current_time_unit";
    pub const SETTINGS_TIME_UNIT_OPTIONS: &str = "settings.time_unit_options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";

    pub const HELP_FORMULA: &str = "help.formula";
    pub const HELP_MODEL: &str = "help.model";
    pub const HELP_IMPORTANCES: &str = "help.importances";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
    Es,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else if c.starts_with("es") {
            Language::Es
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
            Language::Es => "es",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en/es)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code))
            .or_else(|| built_in_pack(lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 해당 언어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Es => es(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "ko" => Some("ko".into()),
        "ko-kr" => Some("ko-kr".into()),
        "en" => Some("en".into()),
        "en-us" => Some("en-us".into()),
        "es" => Some("es-es".into()),
        "es-es" => Some("es-es".into()),
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        other if other.starts_with("es") => Some("es-es".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        "es" => Some("es".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    if let Ok(lang) = std::env::var("LANG") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    if let Ok(lang) = std::env::var("LC_ALL") {
        if let Some(code) = normalize_locale_string(&lang) {
            return Some(code);
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫/중첩 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) full code (e.g., es-es)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., es)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

/// 내장 언어팩(파일이 없어도 동작하도록 빌드 시 포함).
fn built_in_pack(lang: &str) -> Option<HashMap<String, String>> {
    match lang.to_lowercase().as_str() {
        "en-us" | "en" => parse_toml_to_map(include_str!("../locales/en-us.toml")),
        "ko-kr" | "ko" => parse_toml_to_map(include_str!("../locales/ko-kr.toml")),
        "es-es" | "es" => parse_toml_to_map(include_str!("../locales/es-es.toml")),
        _ => None,
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== Leaching Prediction Toolbox ===",
        MAIN_MENU_FORMULA => "1) 질량수지 예측 (공식)",
        MAIN_MENU_MODEL => "2) 회귀 모델 예측",
        MAIN_MENU_IMPORTANCES => "3) 특징 중요도",
        MAIN_MENU_SETTINGS => "4) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        FORMULA_HEADING => "\n-- 질량수지 예측 --",
        MODEL_HEADING => "\n-- 회귀 모델 예측 --",
        PROMPT_SOLID_MASS => "원료 질량 MP [g]: ",
        PROMPT_TOTAL_QUANTITY => "전체 투입량 [g]: ",
        PROMPT_TIME_HOURS => "침출 시간 [h]: ",
        PROMPT_TIME_MINUTES => "침출 시간 [min]: ",
        PROMPT_TEMPERATURE => "온도 [°C]: ",
        PROMPT_SOLVENT => "용매량: ",
        PROMPT_WASH_LIQUOR => "세척액량: ",
        PROMPT_ACID_CONCENTRATION => "산 농도 [mol/L]: ",
        PROMPT_DRY_RESIDUE => "건조 잔사 RSS [%]: ",
        PROMPT_CTE2 => "cte2 [g/L]: ",
        PROMPT_METAL => "금속 선택: ",
        DERIVED_PH => "계산된 pH:",
        DERIVED_ACID_VOLUME => "계산된 산 부피 [L]:",
        RESULT_EFFICIENCY => "예측 효율 (BS):",
        RESULT_RESIDUE => "예측 잔사 [g]:",
        RESULT_NEUTRALIZED => "중화 산출량 cte2 [g]:",
        RESULT_SOLID_RESIDUE => "고체 잔사 cte3 [g]:",
        IMPORTANCE_HEADING => "\n-- 특징 중요도 --",
        IMPORTANCE_EFFICIENCY_TITLE => "효율 모델 상위 특징",
        IMPORTANCE_RESIDUE_TITLE => "잔사 모델 상위 특징",
        MODELS_NOT_LOADED => "모델 아티팩트가 로드되지 않았습니다. 설정에서 디렉터리를 확인하세요.",
        MODELS_LOADED => "모델 아티팩트 로드 완료:",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_STRATEGY => "현재 예측 전략:",
        SETTINGS_STRATEGY_OPTIONS => "1) 질량수지 공식  2) 회귀 모델",
        SETTINGS_CURRENT_SCHEMA => "현재 특징 스키마:",
        SETTINGS_SCHEMA_OPTIONS => "1) completa(14)  2) reducida(11)  3) restringida(9)",
        SETTINGS_CURRENT_TIME_UNIT => "현재 시간 입력 단위:",
        SETTINGS_TIME_UNIT_OPTIONS => "1) 시간[h]  2) 분[min]",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "설정이 변경되었습니다:",
        HELP_FORMULA => "도움말: MP[g]와 RSS[%]만으로 효율/잔사를 질량수지로 계산합니다. MP는 0보다 커야 합니다.",
        HELP_MODEL => "도움말: 공정 파라미터와 금속을 입력하면 스키마 순서로 특징을 만들어 회귀 모델을 호출합니다.",
        HELP_IMPORTANCES => "도움말: 모델의 특징 중요도를 내림차순으로 정렬해 상위 항목을 표시합니다.",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Leaching Prediction Toolbox ===",
        MAIN_MENU_FORMULA => "1) Mass-balance prediction (formula)",
        MAIN_MENU_MODEL => "2) Regression-model prediction",
        MAIN_MENU_IMPORTANCES => "3) Feature importances",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        FORMULA_HEADING => "\n-- Mass-balance prediction --",
        MODEL_HEADING => "\n-- Regression-model prediction --",
        PROMPT_SOLID_MASS => "Solid mass MP [g]: ",
        PROMPT_TOTAL_QUANTITY => "Total quantity [g]: ",
        PROMPT_TIME_HOURS => "Leaching time [h]: ",
        PROMPT_TIME_MINUTES => "Leaching time [min]: ",
        PROMPT_TEMPERATURE => "Temperature [°C]: ",
        PROMPT_SOLVENT => "Solvent amount: ",
        PROMPT_WASH_LIQUOR => "Wash liquor amount: ",
        PROMPT_ACID_CONCENTRATION => "Acid concentration [mol/L]: ",
        PROMPT_DRY_RESIDUE => "Dry residue RSS [%]: ",
        PROMPT_CTE2 => "cte2 [g/L]: ",
        PROMPT_METAL => "Select metal: ",
        DERIVED_PH => "Computed pH:",
        DERIVED_ACID_VOLUME => "Computed acid volume [L]:",
        RESULT_EFFICIENCY => "Predicted efficiency (BS):",
        RESULT_RESIDUE => "Predicted residue [g]:",
        RESULT_NEUTRALIZED => "Neutralized output cte2 [g]:",
        RESULT_SOLID_RESIDUE => "Solid residue cte3 [g]:",
        IMPORTANCE_HEADING => "\n-- Feature importances --",
        IMPORTANCE_EFFICIENCY_TITLE => "Top features - efficiency model",
        IMPORTANCE_RESIDUE_TITLE => "Top features - residue model",
        MODELS_NOT_LOADED => "Model artifacts are not loaded. Check the directory in settings.",
        MODELS_LOADED => "Model artifacts loaded:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_STRATEGY => "Current prediction strategy:",
        SETTINGS_STRATEGY_OPTIONS => "1) Mass-balance formula  2) Regression model",
        SETTINGS_CURRENT_SCHEMA => "Current feature schema:",
        SETTINGS_SCHEMA_OPTIONS => "1) completa(14)  2) reducida(11)  3) restringida(9)",
        SETTINGS_CURRENT_TIME_UNIT => "Current time-entry unit:",
        SETTINGS_TIME_UNIT_OPTIONS => "1) hours  2) minutes",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; settings unchanged.",
        SETTINGS_SAVED => "Settings changed:",
        HELP_FORMULA => "Help: efficiency/residue from MP [g] and RSS [%] alone via mass balance. MP must be > 0.",
        HELP_MODEL => "Help: enter process parameters and metal; features are assembled in schema order and fed to the regression models.",
        HELP_IMPORTANCES => "Help: model feature importances sorted descending, top entries shown.",
        _ => return None,
    })
}

fn es(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Saliendo de la aplicación.",
        MAIN_MENU_TITLE => "\n=== Predicción de la Eficiencia Sólida en Lixiviación ===",
        MAIN_MENU_FORMULA => "1) Predicción por balance de masa (fórmula)",
        MAIN_MENU_MODEL => "2) Predicción por modelo de regresión",
        MAIN_MENU_IMPORTANCES => "3) Importancia de las características",
        MAIN_MENU_SETTINGS => "4) Ajustes",
        MAIN_MENU_EXIT => "0) Salir",
        PROMPT_MENU_SELECT => "Seleccione una opción: ",
        INVALID_SELECTION_RETRY => "Entrada no válida. Intente de nuevo.",
        ERROR_INVALID_NUMBER => "Introduzca un número.",
        FORMULA_HEADING => "\n-- Predicción por balance de masa --",
        MODEL_HEADING => "\n-- Predicción por modelo de regresión --",
        PROMPT_SOLID_MASS => "MP (gr): ",
        PROMPT_TOTAL_QUANTITY => "Cantidad Total (gr): ",
        PROMPT_TIME_HOURS => "Tiempo (horas): ",
        PROMPT_TIME_MINUTES => "Tiempo (minutos): ",
        PROMPT_TEMPERATURE => "Temperatura (°C): ",
        PROMPT_SOLVENT => "Disolvente: ",
        PROMPT_WASH_LIQUOR => "Licor de Lavado: ",
        PROMPT_ACID_CONCENTRATION => "Concentración de ácido (mol/L): ",
        PROMPT_DRY_RESIDUE => "Residuo Seco (%): ",
        PROMPT_CTE2 => "cte2 (g/L): ",
        PROMPT_METAL => "Metal: ",
        DERIVED_PH => "pH Calculado:",
        DERIVED_ACID_VOLUME => "Volumen de Ácido Calculado (L):",
        RESULT_EFFICIENCY => "Eficiencia Predicha (BS):",
        RESULT_RESIDUE => "Residuo Predicho (gr):",
        RESULT_NEUTRALIZED => "Salida neutralizada cte2 (gr):",
        RESULT_SOLID_RESIDUE => "Residuo sólido cte3 (gr):",
        IMPORTANCE_HEADING => "\n-- Importancia de las Características --",
        IMPORTANCE_EFFICIENCY_TITLE => "Top Características - Modelo de Eficiencia",
        IMPORTANCE_RESIDUE_TITLE => "Top Características - Modelo de Residuo",
        MODELS_NOT_LOADED => "Los modelos no están cargados. Revise el directorio en ajustes.",
        MODELS_LOADED => "Modelos cargados:",
        SETTINGS_HEADING => "\n-- Ajustes --",
        SETTINGS_CURRENT_STRATEGY => "Estrategia de predicción actual:",
        SETTINGS_STRATEGY_OPTIONS => "1) Fórmula de balance de masa  2) Modelo de regresión",
        SETTINGS_CURRENT_SCHEMA => "Esquema de características actual:",
        SETTINGS_SCHEMA_OPTIONS => "1) completa(14)  2) reducida(11)  3) restringida(9)",
        SETTINGS_CURRENT_TIME_UNIT => "Unidad de tiempo actual:",
        SETTINGS_TIME_UNIT_OPTIONS => "1) horas  2) minutos",
        SETTINGS_PROMPT_CHANGE => "Número a cambiar (enter para cancelar): ",
        SETTINGS_INVALID => "Entrada no válida; no se cambió nada.",
        SETTINGS_SAVED => "Ajustes cambiados:",
        HELP_FORMULA => "Ayuda: eficiencia/residuo solo con MP (gr) y RSS (%) por balance de masa. MP debe ser > 0.",
        HELP_MODEL => "Ayuda: ingrese los parámetros y el metal; las características se arman en el orden del esquema.",
        HELP_IMPORTANCES => "Ayuda: importancias del modelo ordenadas de mayor a menor.",
        _ => return None,
    })
}
