//! 핵심 예측 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 계산 경로를 공유한다.

pub mod app;
pub mod artifact;
pub mod config;
pub mod i18n;
pub mod leaching;
pub mod ui_cli;
pub mod units;
