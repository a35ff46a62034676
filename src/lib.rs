//! 온도 변환 핵심 로직을 라이브러리로 분리하여 CLI와 GUI가 같은 화면 모델을 공유한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod registry;
pub mod ui_cli;
pub mod units;
pub mod validation;
pub mod view_model;
