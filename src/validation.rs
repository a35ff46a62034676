//! 입력값 검증과 필드별 오류 저장소.

use std::collections::BTreeMap;
use std::fmt;

use thiserror::Error;

use crate::i18n::keys;

/// 변환 가능한 최대 입력값.
pub const MAX_CONVERSION_VALUE: f64 = 20_000.0;
/// 변환 가능한 최소 입력값.
pub const MIN_CONVERSION_VALUE: f64 = -20_000.0;

/// 검증 대상 입력 필드.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    ConversionValue,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match self {
            Field::ConversionValue => "ConversionValue",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 사용자 입력 검증 오류.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// 숫자로 해석할 수 없는 입력
    #[error("Please enter a valid number.")]
    InvalidFormat,
    /// 허용 범위를 벗어난 입력
    #[error("Please enter a value between -20000 and 20000.")]
    OutOfRange,
}

impl ValidationError {
    /// 번역 문자열 키.
    pub fn message_key(&self) -> &'static str {
        match self {
            ValidationError::InvalidFormat => keys::ERROR_INVALID_FORMAT,
            ValidationError::OutOfRange => keys::ERROR_OUT_OF_RANGE,
        }
    }
}

/// 입력 문자열을 숫자로 해석하고 허용 범위를 확인한다.
///
/// 앞뒤 공백은 무시한다. `inf`, `NaN`처럼 유한하지 않은 값은 형식 오류로 본다.
pub fn parse_conversion_value(raw: &str) -> Result<f64, ValidationError> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|_| ValidationError::InvalidFormat)?;
    if !value.is_finite() {
        return Err(ValidationError::InvalidFormat);
    }
    if !(MIN_CONVERSION_VALUE..=MAX_CONVERSION_VALUE).contains(&value) {
        return Err(ValidationError::OutOfRange);
    }
    Ok(value)
}

/// 필드별로 서로 다른 오류를 누적 보관한다.
///
/// 같은 오류는 한 번만 저장되며, 해당 필드 검증이 통과하면 비워진다.
#[derive(Debug, Clone, Default)]
pub struct ErrorStore {
    errors: BTreeMap<Field, Vec<ValidationError>>,
}

impl ErrorStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 오류를 기록한다. 새로 추가되었으면 true.
    pub fn store(&mut self, field: Field, error: ValidationError) -> bool {
        let list = self.errors.entry(field).or_default();
        if list.contains(&error) {
            false
        } else {
            list.push(error);
            true
        }
    }

    /// 필드의 오류를 지운다. 지운 것이 있으면 true.
    pub fn clear(&mut self, field: Field) -> bool {
        self.errors.remove(&field).is_some()
    }

    pub fn get(&self, field: Field) -> &[ValidationError] {
        self.errors.get(&field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_errors(&self, field: Field) -> bool {
        !self.get(field).is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// 필드 순서대로 (필드, 오류) 쌍을 돌려준다.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &ValidationError)> {
        self.errors
            .iter()
            .flat_map(|(field, list)| list.iter().map(move |e| (*field, e)))
    }

    /// 모든 오류 메시지를 줄바꿈으로 이어 붙인다. 오류가 없으면 None.
    pub fn summary(&self) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let lines: Vec<String> = self.iter().map(|(_, e)| e.to_string()).collect();
        Some(lines.join("\n"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_bounds_and_whitespace() {
        assert_eq!(parse_conversion_value(" 20000 "), Ok(20_000.0));
        assert_eq!(parse_conversion_value("-20000"), Ok(-20_000.0));
        assert_eq!(parse_conversion_value("12.5"), Ok(12.5));
    }

    #[test]
    fn rejects_non_numbers_and_non_finite() {
        for raw in ["", "123a", "abc", "1,5", "inf", "NaN"] {
            assert_eq!(
                parse_conversion_value(raw),
                Err(ValidationError::InvalidFormat),
                "input {raw:?}"
            );
        }
    }

    #[test]
    fn rejects_out_of_range() {
        assert_eq!(parse_conversion_value("20000.0001"), Err(ValidationError::OutOfRange));
        assert_eq!(parse_conversion_value("-20001"), Err(ValidationError::OutOfRange));
    }

    #[test]
    fn store_deduplicates_per_field() {
        let mut store = ErrorStore::new();
        assert!(store.store(Field::ConversionValue, ValidationError::InvalidFormat));
        assert!(!store.store(Field::ConversionValue, ValidationError::InvalidFormat));
        assert!(store.store(Field::ConversionValue, ValidationError::OutOfRange));
        assert_eq!(store.get(Field::ConversionValue).len(), 2);
        assert_eq!(
            store.summary().unwrap(),
            "Please enter a valid number.\nPlease enter a value between -20000 and 20000."
        );

        assert!(store.clear(Field::ConversionValue));
        assert!(!store.clear(Field::ConversionValue));
        assert!(store.summary().is_none());
    }
}
