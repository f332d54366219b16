//! 입력 단위 처리. 침출 시간은 배포에 따라 시간 또는 분으로 들어온다.

use serde::{Deserialize, Serialize};

/// 시간 입력 단위. 모델 학습 기준 단위는 시간[h]이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeUnit {
    Hours,
    Minutes,
}

impl TimeUnit {
    /// 입력값을 시간[h]으로 환산한다.
    pub fn to_hours(&self, value: f64) -> f64 {
        match self {
            TimeUnit::Hours => value,
            TimeUnit::Minutes => value / 60.0,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            TimeUnit::Hours => "h",
            TimeUnit::Minutes => "min",
        }
    }
}
