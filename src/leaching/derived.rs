//! 원시 공정 입력에서 유도되는 물성 계산.

/// 펄프 밀도 DP [g/L]. 고체 질량에서 산 용액 부피를 산출할 때 쓰는 고정 상수.
pub const PULP_DENSITY_G_PER_L: f64 = 200.0;

/// 산 농도 [mol/L]에서 pH를 계산한다.
///
/// 농도가 1 mol/L를 넘으면 강산 영역으로 간주해 0으로 클램프한다.
/// 0 이하 입력(음수 포함)도 0을 반환한다. 두 경계 모두 공정 데이터의
/// 정의를 그대로 따르는 의도된 불연속이다.
pub fn ph_from_concentration(concentration_mol_per_l: f64) -> f64 {
    if concentration_mol_per_l > 1.0 {
        0.0
    } else if concentration_mol_per_l > 0.0 {
        -concentration_mol_per_l.log10()
    } else {
        0.0
    }
}

/// 고체 질량 MP [g]에서 필요한 산 용액 부피 [L]를 계산한다.
/// 질량이 0 이하이면 0을 반환한다.
pub fn acid_volume_from_mass(solid_mass_g: f64) -> f64 {
    if solid_mass_g > 0.0 {
        solid_mass_g / PULP_DENSITY_G_PER_L
    } else {
        0.0
    }
}
