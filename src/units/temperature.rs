use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::conversion::ConversionError;

/// 온도 단위를 정의한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    /// 선택 목록에 표시할 순서대로 나열한 전체 단위.
    pub const ALL: [TemperatureUnit; 2] = [TemperatureUnit::Celsius, TemperatureUnit::Fahrenheit];

    /// 단위 이름 (enum 이름과 동일).
    pub fn name(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "Celsius",
            TemperatureUnit::Fahrenheit => "Fahrenheit",
        }
    }

    /// 결과 표시에 사용하는 기호.
    pub fn symbol(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }
}

impl fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for TemperatureUnit {
    type Err = ConversionError;

    /// `C`, `celsius`, `°C`, `F`, `fahrenheit`, `°F` 를 대소문자 구분 없이 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "c" | "celsius" | "°c" => Ok(TemperatureUnit::Celsius),
            "f" | "fahrenheit" | "°f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(ConversionError::UnknownUnit(s.to_string())),
        }
    }
}

/// 선택 위젯용 (이름, 단위) 목록을 돌려준다.
pub fn available_units() -> Vec<(&'static str, TemperatureUnit)> {
    TemperatureUnit::ALL.iter().map(|u| (u.name(), *u)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_names() {
        assert_eq!("C".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Celsius);
        assert_eq!(" fahrenheit ".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
        assert_eq!("°F".parse::<TemperatureUnit>().unwrap(), TemperatureUnit::Fahrenheit);
    }

    #[test]
    fn rejects_unknown_unit() {
        let err = "kelvin".parse::<TemperatureUnit>().unwrap_err();
        assert!(matches!(err, ConversionError::UnknownUnit(ref u) if u == "kelvin"));
    }

    #[test]
    fn available_units_keep_declaration_order() {
        let units = available_units();
        assert_eq!(
            units,
            vec![
                ("Celsius", TemperatureUnit::Celsius),
                ("Fahrenheit", TemperatureUnit::Fahrenheit)
            ]
        );
    }
}
