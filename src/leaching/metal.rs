//! 침출 대상 금속 분류와 원-핫 인코딩.

use serde::{Deserialize, Serialize};

/// 침출 대상 금속.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metal {
    Fe,
    Mg,
    Mn,
    Zn,
}

impl Metal {
    /// 학습 데이터 열 이름(`Metal_Fe` 등)에 쓰이는 코드.
    pub fn code(&self) -> &'static str {
        match self {
            Metal::Fe => "Fe",
            Metal::Mg => "Mg",
            Metal::Mn => "Mn",
            Metal::Zn => "Zn",
        }
    }

    pub fn from_code(code: &str) -> Option<Metal> {
        [Metal::Fe, Metal::Mg, Metal::Mn, Metal::Zn]
            .into_iter()
            .find(|m| m.code().eq_ignore_ascii_case(code.trim()))
    }
}

/// 전체 금속 집합. Fe/Mg/Mn/Zn 4종 모델과 짝을 이룬다.
pub const METALS_FULL: [Metal; 4] = [Metal::Fe, Metal::Mg, Metal::Mn, Metal::Zn];

/// Mn/Fe 2종으로 한정한 축소 모델용 집합.
pub const METALS_RESTRICTED: [Metal; 2] = [Metal::Mn, Metal::Fe];

/// 인코딩 시 발생 가능한 오류.
#[derive(Debug)]
pub enum EncodeError {
    /// 스키마의 금속 집합에 포함되지 않은 금속이 선택됨
    UnsupportedMetal(Metal),
}

impl std::fmt::Display for EncodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodeError::UnsupportedMetal(m) => {
                write!(f, "스키마가 지원하지 않는 금속: {}", m.code())
            }
        }
    }
}

impl std::error::Error for EncodeError {}

/// 주어진 금속 집합에 대해 원-핫 인코딩을 만든다.
/// 선택된 금속 위치만 1.0이고 나머지는 0.0이다.
pub fn one_hot(metal: Metal, set: &[Metal]) -> Result<Vec<f64>, EncodeError> {
    if !set.contains(&metal) {
        return Err(EncodeError::UnsupportedMetal(metal));
    }
    Ok(set
        .iter()
        .map(|m| if *m == metal { 1.0 } else { 0.0 })
        .collect())
}
