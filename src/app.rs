use crate::artifact::{ArtifactError, ModelSet};
use crate::config::Config;
use crate::i18n::{self, Translator};
use crate::leaching::features::SchemaError;
use crate::leaching::formula::FormulaError;
use crate::leaching::importance::ImportanceError;
use crate::leaching::predictor::PredictError;
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(crate::config::ConfigError),
    /// 모델 아티팩트 오류
    Artifact(ArtifactError),
    /// 질량수지 공식 오류
    Formula(FormulaError),
    /// 특징 스키마 오류
    Schema(SchemaError),
    /// 예측 실행 오류
    Predict(PredictError),
    /// 중요도 정리 오류
    Importance(ImportanceError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Artifact(e) => write!(f, "아티팩트 오류: {e}"),
            AppError::Formula(e) => write!(f, "공식 예측 오류: {e}"),
            AppError::Schema(e) => write!(f, "스키마 오류: {e}"),
            AppError::Predict(e) => write!(f, "예측 오류: {e}"),
            AppError::Importance(e) => write!(f, "중요도 오류: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(value: crate::config::ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ArtifactError> for AppError {
    fn from(value: ArtifactError) -> Self {
        AppError::Artifact(value)
    }
}

impl From<FormulaError> for AppError {
    fn from(value: FormulaError) -> Self {
        AppError::Formula(value)
    }
}

impl From<SchemaError> for AppError {
    fn from(value: SchemaError) -> Self {
        AppError::Schema(value)
    }
}

impl From<PredictError> for AppError {
    fn from(value: PredictError) -> Self {
        AppError::Predict(value)
    }
}

impl From<ImportanceError> for AppError {
    fn from(value: ImportanceError) -> Self {
        AppError::Importance(value)
    }
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 모델 아티팩트는 시작 시 한 번 로드한 것을 참조로 받는다.
pub fn run(config: &mut Config, tr: &Translator, models: Option<&ModelSet>) -> Result<(), AppError> {
    loop {
        match ui_cli::main_menu(tr)? {
            MenuChoice::FormulaPrediction => ui_cli::handle_formula(tr)?,
            MenuChoice::ModelPrediction => ui_cli::handle_model(tr, config, models)?,
            MenuChoice::Importances => ui_cli::handle_importances(tr, config, models)?,
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save()?;
            }
            MenuChoice::Exit => {
                config.save()?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
        }
    }
    Ok(())
}
