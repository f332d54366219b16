//! 모델 특징 중요도 정리.

/// 기본 표시 개수. 짧은 스키마는 전체가 표시된다.
pub const DEFAULT_TOP_N: usize = 10;

/// (특징 이름, 중요도) 순위 항목.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedImportance {
    pub name: String,
    pub score: f64,
}

/// 중요도 정리 시 발생 가능한 오류.
#[derive(Debug)]
pub enum ImportanceError {
    /// 이름 목록과 점수 배열 길이가 다름
    LengthMismatch { names: usize, scores: usize },
}

impl std::fmt::Display for ImportanceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImportanceError::LengthMismatch { names, scores } => {
                write!(f, "중요도 배열 길이 불일치: 이름 {names}, 점수 {scores}")
            }
        }
    }
}

impl std::error::Error for ImportanceError {}

/// 이름과 점수를 위치 기준으로 짝지어 내림차순 정렬한 뒤 상위 `top_n`개를 반환한다.
/// 길이가 어긋나면 어긋난 차트를 그리는 대신 오류를 낸다.
pub fn rank(
    names: &[String],
    scores: &[f64],
    top_n: usize,
) -> Result<Vec<RankedImportance>, ImportanceError> {
    if names.len() != scores.len() {
        return Err(ImportanceError::LengthMismatch {
            names: names.len(),
            scores: scores.len(),
        });
    }
    let mut ranked: Vec<RankedImportance> = names
        .iter()
        .zip(scores.iter())
        .map(|(name, score)| RankedImportance {
            name: name.clone(),
            score: *score,
        })
        .collect();
    ranked.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(top_n);
    Ok(ranked)
}
