use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::registry::ConverterFactory;
use crate::ui_cli;
use crate::view_model::InputModel;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

/// 저장된 단위 선택을 모델에 반영한다.
pub fn restore_units<F: ConverterFactory>(model: &mut InputModel<F>, config: &Config) {
    model.set_from_unit(config.last_from_unit);
    model.set_to_unit(config.last_to_unit);
}

/// CLI 대화형 루프를 실행하고, 종료 시 마지막 단위를 설정에 저장한다.
pub fn run(config: &mut Config, tr: &Translator) -> Result<(), AppError> {
    let mut model = InputModel::new();
    restore_units(&mut model, config);
    ui_cli::interactive(&mut model, tr)?;
    config.remember_units(model.from_unit(), model.to_unit());
    config.save()?;
    println!("{}", tr.t(i18n::keys::APP_EXIT));
    Ok(())
}
