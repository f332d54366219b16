//! 특징 스키마 정의와 특징 벡터 조립.
//! 열 이름과 순서는 모델 학습 시점의 구성과 1:1로 대응해야 하며,
//! 폭이 어긋나면 조립 단계에서 바로 오류로 처리한다.

use serde::{Deserialize, Serialize};

use super::derived;
use super::metal::{self, EncodeError, Metal};

/// 학습 데이터 열 이름 모음. 원본 데이터셋의 스페인어 열명을 그대로 쓴다.
pub mod keys {
    pub const MP_G: &str = "MP(gr)";
    pub const CANTIDAD_TOTAL: &str = "Cantidad Total(gr)";
    pub const TIEMPO: &str = "Tiempo";
    pub const TEMPERATURA: &str = "Temperatura";
    pub const DISOLVENTE: &str = "Disolvente";
    pub const LICOR_LAVADO: &str = "LicorLavado";
    pub const CONCENTRACION_ACIDO: &str = "Concentración de ácido";
    pub const VOLUMEN_ACIDO: &str = "Volúmen de ácido (L)";
    pub const RESIDUO_SECO: &str = "Residuo Seco (%)";
    pub const CTE2: &str = "cte2 (g/L)";
}

/// 사용자 입력 공정 파라미터.
#[derive(Debug, Clone)]
pub struct LeachInput {
    /// 원료 고체 질량 MP [g]
    pub solid_mass_g: f64,
    /// 전체 투입량 [g]
    pub total_quantity_g: f64,
    /// 침출 시간 [h]
    pub time_h: f64,
    /// 반응 온도 [°C]
    pub temperature_c: f64,
    /// 용매 투입량
    pub solvent: f64,
    /// 세척액(licor de lavado) 투입량
    pub wash_liquor: f64,
    /// 산 농도 [mol/L]
    pub acid_concentration_mol_per_l: f64,
    /// 건조 잔사 RSS [%]
    pub dry_residue_pct: f64,
    /// cte2 상수 [g/L]
    pub cte2_g_per_l: f64,
    /// 침출 대상 금속
    pub metal: Metal,
}

impl Default for LeachInput {
    fn default() -> Self {
        Self {
            solid_mass_g: 0.0,
            total_quantity_g: 50.0,
            time_h: 1.0,
            temperature_c: 40.0,
            solvent: 0.0,
            wash_liquor: 0.0,
            acid_concentration_mol_per_l: 0.0,
            dry_residue_pct: 0.0,
            cte2_g_per_l: 0.0,
            metal: Metal::Fe,
        }
    }
}

/// 스키마 프리셋 선택지. 배포별 모델 아티팩트의 학습 열 구성에 대응한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchemaPreset {
    /// 원시/파생 10열 + 금속 4종
    Complete,
    /// 원시/파생 7열 + 금속 4종
    Reduced,
    /// 원시/파생 7열 + 금속 Mn/Fe 2종
    Restricted,
}

/// 이름과 순서가 고정된 특징 스키마.
#[derive(Debug, Clone)]
pub struct FeatureSchema {
    pub name: &'static str,
    pub version: u32,
    pub raw_keys: &'static [&'static str],
    pub metals: &'static [Metal],
}

const COMPLETE_KEYS: [&str; 10] = [
    keys::MP_G,
    keys::CANTIDAD_TOTAL,
    keys::TIEMPO,
    keys::TEMPERATURA,
    keys::DISOLVENTE,
    keys::LICOR_LAVADO,
    keys::CONCENTRACION_ACIDO,
    keys::VOLUMEN_ACIDO,
    keys::RESIDUO_SECO,
    keys::CTE2,
];

const REDUCED_KEYS: [&str; 7] = [
    keys::MP_G,
    keys::CANTIDAD_TOTAL,
    keys::TIEMPO,
    keys::TEMPERATURA,
    keys::DISOLVENTE,
    keys::CONCENTRACION_ACIDO,
    keys::VOLUMEN_ACIDO,
];

static COMPLETE: FeatureSchema = FeatureSchema {
    name: "completa",
    version: 1,
    raw_keys: &COMPLETE_KEYS,
    metals: &metal::METALS_FULL,
};

static REDUCED: FeatureSchema = FeatureSchema {
    name: "reducida",
    version: 1,
    raw_keys: &REDUCED_KEYS,
    metals: &metal::METALS_FULL,
};

static RESTRICTED: FeatureSchema = FeatureSchema {
    name: "restringida",
    version: 1,
    raw_keys: &REDUCED_KEYS,
    metals: &metal::METALS_RESTRICTED,
};

impl FeatureSchema {
    pub fn preset(preset: SchemaPreset) -> &'static FeatureSchema {
        match preset {
            SchemaPreset::Complete => &COMPLETE,
            SchemaPreset::Reduced => &REDUCED,
            SchemaPreset::Restricted => &RESTRICTED,
        }
    }

    /// 원시/파생 열 수 + 원-핫 폭.
    pub fn width(&self) -> usize {
        self.raw_keys.len() + self.metals.len()
    }

    /// 조립 순서 그대로의 전체 열 이름 목록.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.raw_keys.iter().map(|k| (*k).to_string()).collect();
        names.extend(self.metals.iter().map(|m| format!("Metal_{}", m.code())));
        names
    }
}

/// 스키마 순서대로 정렬된 (이름, 값) 특징 벡터.
#[derive(Debug, Clone)]
pub struct FeatureVector {
    names: Vec<String>,
    values: Vec<f64>,
}

impl FeatureVector {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn width(&self) -> usize {
        self.values.len()
    }

    /// 모델이 기대하는 입력 폭과 일치하는지 검사한다.
    /// 예측 호출 전에 반드시 거쳐야 하는 선행 조건이다.
    pub fn validate_width(&self, expected: usize) -> Result<(), SchemaError> {
        if self.width() != expected {
            return Err(SchemaError::WidthMismatch {
                expected,
                got: self.width(),
            });
        }
        Ok(())
    }
}

/// 특징 조립 시 발생 가능한 오류.
#[derive(Debug)]
pub enum SchemaError {
    /// 조립된 벡터 폭과 모델 기대 폭이 다름
    WidthMismatch { expected: usize, got: usize },
    /// 스키마가 모르는 열 이름
    UnknownKey(&'static str),
    /// 금속 원-핫 인코딩 실패
    Encode(EncodeError),
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaError::WidthMismatch { expected, got } => {
                write!(f, "특징 벡터 폭 불일치: 모델 기대 {expected}, 조립 결과 {got}")
            }
            SchemaError::UnknownKey(key) => write!(f, "알 수 없는 특징 열: {key}"),
            SchemaError::Encode(e) => write!(f, "금속 인코딩 오류: {e}"),
        }
    }
}

impl std::error::Error for SchemaError {}

impl From<EncodeError> for SchemaError {
    fn from(value: EncodeError) -> Self {
        SchemaError::Encode(value)
    }
}

/// 원시 입력, 파생값(산 부피), 금속 원-핫을 스키마 순서대로 병합한다.
/// pH는 표시 전용 피드백이라 특징 벡터에는 들어가지 않는다.
pub fn assemble(schema: &FeatureSchema, input: &LeachInput) -> Result<FeatureVector, SchemaError> {
    let acid_volume_l = derived::acid_volume_from_mass(input.solid_mass_g);

    let mut names = Vec::with_capacity(schema.width());
    let mut values = Vec::with_capacity(schema.width());
    for key in schema.raw_keys {
        let value = match *key {
            keys::MP_G => input.solid_mass_g,
            keys::CANTIDAD_TOTAL => input.total_quantity_g,
            keys::TIEMPO => input.time_h,
            keys::TEMPERATURA => input.temperature_c,
            keys::DISOLVENTE => input.solvent,
            keys::LICOR_LAVADO => input.wash_liquor,
            keys::CONCENTRACION_ACIDO => input.acid_concentration_mol_per_l,
            keys::VOLUMEN_ACIDO => acid_volume_l,
            keys::RESIDUO_SECO => input.dry_residue_pct,
            keys::CTE2 => input.cte2_g_per_l,
            other => return Err(SchemaError::UnknownKey(other)),
        };
        names.push((*key).to_string());
        values.push(value);
    }

    let encoded = metal::one_hot(input.metal, schema.metals)?;
    for (m, flag) in schema.metals.iter().zip(encoded) {
        names.push(format!("Metal_{}", m.code()));
        values.push(flag);
    }

    Ok(FeatureVector { names, values })
}
