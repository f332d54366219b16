//! 질량수지 기반 폐쇄식 예측.

/// 질량수지 공식 입력.
#[derive(Debug, Clone)]
pub struct FormulaInput {
    /// 원료 고체 질량 MP [g]
    pub solid_mass_g: f64,
    /// 건조 잔사 RSS [%]
    pub dry_residue_pct: f64,
}

/// 질량수지 공식 결과.
#[derive(Debug, Clone)]
pub struct FormulaResult {
    /// BS 효율 [%], 소수 둘째 자리 반올림
    pub efficiency_pct: f64,
    /// 잔사 질량 [g]
    pub residue_g: f64,
}

/// 공식 전략에서 발생 가능한 오류.
#[derive(Debug)]
pub enum FormulaError {
    /// 질량이 0 이하라 효율이 정의되지 않음
    NonPositiveMass { solid_mass_g: f64 },
}

impl std::fmt::Display for FormulaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormulaError::NonPositiveMass { solid_mass_g } => {
                write!(f, "질량이 0 이하라 효율을 정의할 수 없음: {solid_mass_g} g")
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// BS 효율과 잔사를 질량수지로 계산한다.
/// `효율 = ((MP - RSS·MP/100) / MP) · 100`, `잔사 = RSS·MP/100`.
pub fn predict_mass_balance(input: FormulaInput) -> Result<FormulaResult, FormulaError> {
    if input.solid_mass_g <= 0.0 {
        return Err(FormulaError::NonPositiveMass {
            solid_mass_g: input.solid_mass_g,
        });
    }
    let residue_g = input.dry_residue_pct * input.solid_mass_g / 100.0;
    let efficiency = ((input.solid_mass_g - residue_g) / input.solid_mass_g) * 100.0;
    Ok(FormulaResult {
        efficiency_pct: (efficiency * 100.0).round() / 100.0,
        residue_g,
    })
}
