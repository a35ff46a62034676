use std::fmt;

use thiserror::Error;

use crate::units::TemperatureUnit;

/// 단위 변환 시 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum ConversionError {
    /// 알 수 없는 단위 문자열
    #[error("unknown unit: {0}")]
    UnknownUnit(String),
}

/// 값을 자신의 목표 단위로 환산하는 변환기.
///
/// 구현체가 목표 단위를 결정하고, `from`은 입력값의 단위를 뜻한다.
pub trait Convert: fmt::Debug {
    /// 변환 결과가 표현되는 단위.
    fn target(&self) -> TemperatureUnit;

    /// `from` 단위의 `value`를 목표 단위로 환산한다.
    fn convert(&self, value: f64, from: TemperatureUnit) -> f64;
}

/// 목표 단위별 온도 변환기. 상태를 갖지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemperatureConverter {
    /// 섭씨로 환산한다.
    Celsius,
    /// 화씨로 환산한다.
    Fahrenheit,
}

impl TemperatureConverter {
    /// 목표 단위에 대응하는 변환기를 만든다.
    pub fn for_unit(unit: TemperatureUnit) -> Self {
        match unit {
            TemperatureUnit::Celsius => TemperatureConverter::Celsius,
            TemperatureUnit::Fahrenheit => TemperatureConverter::Fahrenheit,
        }
    }
}

impl Convert for TemperatureConverter {
    fn target(&self) -> TemperatureUnit {
        match self {
            TemperatureConverter::Celsius => TemperatureUnit::Celsius,
            TemperatureConverter::Fahrenheit => TemperatureUnit::Fahrenheit,
        }
    }

    fn convert(&self, value: f64, from: TemperatureUnit) -> f64 {
        // 입력 단위와 목표 단위가 같으면 그대로 돌려준다
        match (self, from) {
            (TemperatureConverter::Celsius, TemperatureUnit::Fahrenheit) => {
                (value - 32.0) * 5.0 / 9.0
            }
            (TemperatureConverter::Fahrenheit, TemperatureUnit::Celsius) => {
                (value * 9.0 / 5.0) + 32.0
            }
            (TemperatureConverter::Celsius, TemperatureUnit::Celsius)
            | (TemperatureConverter::Fahrenheit, TemperatureUnit::Fahrenheit) => value,
        }
    }
}

/// 온도를 서로 다른 단위로 변환한다.
pub fn convert_temperature(value: f64, from: TemperatureUnit, to: TemperatureUnit) -> f64 {
    TemperatureConverter::for_unit(to).convert(value, from)
}
