//! 침출(lixiviación) 예측 관련 계산 모듈 모음.
//! 파생 물성, 특징 벡터 조립, 질량수지 공식, 회귀 모델 예측, 중요도 정리로 구성한다.

pub mod derived;
pub mod features;
pub mod formula;
pub mod importance;
pub mod metal;
pub mod predictor;

pub use features::*;
pub use formula::*;
pub use predictor::*;
