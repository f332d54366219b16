//! 예측 전략 선택과 실행.
//! 공식 전략과 모델 전략은 배포 설정으로 선택하며 요청마다 바뀌지 않는다.

use serde::{Deserialize, Serialize};

use crate::artifact::{ArtifactError, ModelSet};

use super::features::{self, FeatureSchema, LeachInput, SchemaError};
use super::formula::{self, FormulaError, FormulaInput};

/// 설정 파일에 들어가는 예측 전략 선택지.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    /// 질량수지 공식으로 직접 계산
    Formula,
    /// 학습된 회귀 모델 호출
    Model,
}

/// 한 번의 예측 결과.
#[derive(Debug, Clone)]
pub struct Prediction {
    /// BS 효율 [%]
    pub efficiency_pct: f64,
    /// 잔사 질량 [g]
    pub residue_g: f64,
    /// 보고용 중화 산출량 cte2 [g]. 모델 전략에서만 산출.
    pub neutralized_output_g: Option<f64>,
    /// 보고용 고체 잔사 cte3 [g]. 모델 전략에서만 산출.
    pub solid_residue_g: Option<f64>,
}

/// 예측 실행 중 발생 가능한 오류. 재시도나 대체 경로 없이 그대로 전파한다.
#[derive(Debug)]
pub enum PredictError {
    Formula(FormulaError),
    Schema(SchemaError),
    Artifact(ArtifactError),
}

impl std::fmt::Display for PredictError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PredictError::Formula(e) => write!(f, "공식 예측 오류: {e}"),
            PredictError::Schema(e) => write!(f, "특징 스키마 오류: {e}"),
            PredictError::Artifact(e) => write!(f, "모델 아티팩트 오류: {e}"),
        }
    }
}

impl std::error::Error for PredictError {}

impl From<FormulaError> for PredictError {
    fn from(value: FormulaError) -> Self {
        PredictError::Formula(value)
    }
}

impl From<SchemaError> for PredictError {
    fn from(value: SchemaError) -> Self {
        PredictError::Schema(value)
    }
}

impl From<ArtifactError> for PredictError {
    fn from(value: ArtifactError) -> Self {
        PredictError::Artifact(value)
    }
}

/// 실행 가능한 예측기. 모델 전략은 로드된 아티팩트 묶음을 참조로 받는다.
#[derive(Debug)]
pub enum Predictor<'a> {
    Formula,
    Model(&'a ModelSet),
}

impl Predictor<'_> {
    /// 설정된 전략으로 한 번의 동기 예측을 수행한다.
    pub fn predict(
        &self,
        schema: &FeatureSchema,
        input: &LeachInput,
    ) -> Result<Prediction, PredictError> {
        match self {
            Predictor::Formula => {
                let result = formula::predict_mass_balance(FormulaInput {
                    solid_mass_g: input.solid_mass_g,
                    dry_residue_pct: input.dry_residue_pct,
                })?;
                Ok(Prediction {
                    efficiency_pct: result.efficiency_pct,
                    residue_g: result.residue_g,
                    neutralized_output_g: None,
                    solid_residue_g: None,
                })
            }
            Predictor::Model(models) => {
                let vector = features::assemble(schema, input)?;
                vector.validate_width(models.input_width())?;

                let scaled_eff = models.scaler_efficiency.transform(vector.values())?;
                let scaled_res = models.scaler_residue.transform(vector.values())?;
                let efficiency_pct = models.efficiency.predict(&scaled_eff)?;
                let residue_g = models.residue.predict(&scaled_res)?;

                // 보고용 파생값. 모델로 되먹임되지 않는 순수 후처리다.
                let neutralized_output_g = efficiency_pct * input.solid_mass_g / 100.0;
                Ok(Prediction {
                    efficiency_pct,
                    residue_g,
                    neutralized_output_g: Some(neutralized_output_g),
                    solid_residue_g: Some(residue_g),
                })
            }
        }
    }
}
