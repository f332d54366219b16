//! 학습된 회귀 모델/스케일러 아티팩트 로딩.
//! 아티팩트는 TOML 문서로 보관하며 프로세스 시작 시 한 번 읽어
//! 수명 내내 불변으로 쓴다. 이 모듈은 재학습이나 버전 관리를 하지 않는다.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// 효율 모델 파일명.
pub const MODEL_EFFICIENCY_FILE: &str = "model_efficiency.toml";
/// 효율 스케일러 파일명.
pub const SCALER_EFFICIENCY_FILE: &str = "scaler_efficiency.toml";
/// 잔사 모델 파일명.
pub const MODEL_RESIDUE_FILE: &str = "model_residuo.toml";
/// 잔사 스케일러 파일명.
pub const SCALER_RESIDUE_FILE: &str = "scaler_residuo.toml";

/// 아티팩트 처리 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ArtifactError {
    /// 파일 입출력 오류 (누락 포함)
    Io { path: PathBuf, source: std::io::Error },
    /// TOML 역직렬화 오류
    Parse(toml::de::Error),
    /// 아티팩트 내부 배열 길이가 서로 맞지 않음
    Inconsistent(&'static str),
    /// 입력 폭과 아티팩트 폭이 다름
    WidthMismatch { expected: usize, got: usize },
}

impl std::fmt::Display for ArtifactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArtifactError::Io { path, source } => {
                write!(f, "아티팩트 파일 입출력 오류({}): {source}", path.display())
            }
            ArtifactError::Parse(e) => write!(f, "아티팩트 파싱 오류: {e}"),
            ArtifactError::Inconsistent(msg) => write!(f, "아티팩트 내부 불일치: {msg}"),
            ArtifactError::WidthMismatch { expected, got } => {
                write!(f, "아티팩트 폭 불일치: 기대 {expected}, 입력 {got}")
            }
        }
    }
}

impl std::error::Error for ArtifactError {}

impl From<toml::de::Error> for ArtifactError {
    fn from(value: toml::de::Error) -> Self {
        ArtifactError::Parse(value)
    }
}

/// 학습된 선형 회귀 모델.
/// `feature_importances` 길이가 모델이 기대하는 입력 폭을 선언한다.
#[derive(Debug, Clone, Deserialize)]
pub struct Model {
    pub name: String,
    pub intercept: f64,
    pub coefficients: Vec<f64>,
    pub feature_importances: Vec<f64>,
}

impl Model {
    /// TOML 문자열에서 모델을 읽고 내부 길이 일관성을 검사한다.
    pub fn from_toml_str(src: &str) -> Result<Model, ArtifactError> {
        let model: Model = toml::from_str(src)?;
        if model.coefficients.len() != model.feature_importances.len() {
            return Err(ArtifactError::Inconsistent(
                "coefficients와 feature_importances 길이가 다름",
            ));
        }
        Ok(model)
    }

    pub fn load(path: &Path) -> Result<Model, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    /// 모델이 기대하는 입력 폭.
    pub fn input_width(&self) -> usize {
        self.feature_importances.len()
    }

    /// 선형 평가 `intercept + Σ coef·x`. 폭이 어긋나면 오류.
    pub fn predict(&self, values: &[f64]) -> Result<f64, ArtifactError> {
        if values.len() != self.coefficients.len() {
            return Err(ArtifactError::WidthMismatch {
                expected: self.coefficients.len(),
                got: values.len(),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(values.iter())
            .map(|(c, v)| c * v)
            .sum();
        Ok(self.intercept + dot)
    }
}

/// 학습 시 적합된 표준화 변환. `mean`/`scale`은 특징 순서와 정렬된다.
#[derive(Debug, Clone, Deserialize)]
pub struct Scaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl Scaler {
    /// TOML 문자열에서 스케일러를 읽고 내부 길이 일관성을 검사한다.
    pub fn from_toml_str(src: &str) -> Result<Scaler, ArtifactError> {
        let scaler: Scaler = toml::from_str(src)?;
        if scaler.mean.len() != scaler.scale.len() {
            return Err(ArtifactError::Inconsistent("mean과 scale 길이가 다름"));
        }
        Ok(scaler)
    }

    pub fn load(path: &Path) -> Result<Scaler, ArtifactError> {
        let content = fs::read_to_string(path).map_err(|e| ArtifactError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn width(&self) -> usize {
        self.mean.len()
    }

    /// `(x - mean) / scale`. scale이 0인 열은 원값을 유지한다.
    pub fn transform(&self, values: &[f64]) -> Result<Vec<f64>, ArtifactError> {
        if values.len() != self.width() {
            return Err(ArtifactError::WidthMismatch {
                expected: self.width(),
                got: values.len(),
            });
        }
        Ok(values
            .iter()
            .zip(self.mean.iter().zip(self.scale.iter()))
            .map(|(v, (m, s))| if *s != 0.0 { (v - m) / s } else { *v })
            .collect())
    }
}

/// 배포에 필요한 아티팩트 네 개 묶음.
#[derive(Debug, Clone)]
pub struct ModelSet {
    pub efficiency: Model,
    pub scaler_efficiency: Scaler,
    pub residue: Model,
    pub scaler_residue: Scaler,
}

impl ModelSet {
    /// 디렉터리에서 고정 파일명 네 개를 읽고 교차 폭 검사를 수행한다.
    pub fn load_dir(dir: &Path) -> Result<ModelSet, ArtifactError> {
        let set = ModelSet {
            efficiency: Model::load(&dir.join(MODEL_EFFICIENCY_FILE))?,
            scaler_efficiency: Scaler::load(&dir.join(SCALER_EFFICIENCY_FILE))?,
            residue: Model::load(&dir.join(MODEL_RESIDUE_FILE))?,
            scaler_residue: Scaler::load(&dir.join(SCALER_RESIDUE_FILE))?,
        };
        set.check_widths()?;
        Ok(set)
    }

    /// 아티팩트 묶음이 기대하는 입력 폭.
    pub fn input_width(&self) -> usize {
        self.efficiency.input_width()
    }

    fn check_widths(&self) -> Result<(), ArtifactError> {
        let w = self.efficiency.input_width();
        if self.residue.input_width() != w {
            return Err(ArtifactError::Inconsistent("효율/잔사 모델 폭이 다름"));
        }
        if self.scaler_efficiency.width() != w || self.scaler_residue.width() != w {
            return Err(ArtifactError::Inconsistent("스케일러 폭이 모델 폭과 다름"));
        }
        Ok(())
    }
}
