//! 입력 필드와 단위 선택을 검증/변환 결과에 묶는 화면 모델.
//!
//! 값이 바뀌면 같은 호출 안에서 검증과 재계산이 끝나고, 구독자에게 변경된
//! 속성이 순서대로 통지된다.

use std::rc::Rc;

use log::debug;

use crate::conversion::Convert;
use crate::registry::{ConverterFactory, ConverterRegistry};
use crate::units::TemperatureUnit;
use crate::validation::{parse_conversion_value, ErrorStore, Field, ValidationError};

/// 변환 결과에 적용하는 소수 자릿수.
pub const CONVERTED_VALUE_PRECISION: i32 = 10;

/// 입력 문자열의 초기값.
pub const DEFAULT_CONVERSION_VALUE: &str = "0";

/// 변경 통지 대상 속성.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    ConversionValue,
    ConvertedValue,
    SelectedFromUnit,
    SelectedToUnit,
    Errors,
    IsValid,
}

/// `subscribe`가 돌려주는 구독 식별자.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener<F> = Box<dyn FnMut(&InputModel<F>, Property)>;

/// 온도 변환 화면의 상태.
pub struct InputModel<F: ConverterFactory = ConverterRegistry> {
    factory: F,
    conversion_value: String,
    converted_value: f64,
    from_unit: TemperatureUnit,
    to_unit: TemperatureUnit,
    active: Rc<dyn Convert>,
    errors: ErrorStore,
    listeners: Vec<(SubscriptionId, Listener<F>)>,
    next_subscription: u64,
}

impl InputModel<ConverterRegistry> {
    /// 기본 레지스트리를 사용하는 모델을 만든다.
    pub fn new() -> Self {
        Self::with_factory(ConverterRegistry::new())
    }
}

impl Default for InputModel<ConverterRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ConverterFactory> InputModel<F> {
    /// 섭씨 → 화씨, 입력 "0" 상태로 모델을 만들고 첫 변환을 수행한다.
    pub fn with_factory(mut factory: F) -> Self {
        let to_unit = TemperatureUnit::Fahrenheit;
        let active = factory.get(to_unit);
        let mut model = Self {
            factory,
            conversion_value: DEFAULT_CONVERSION_VALUE.to_string(),
            converted_value: 0.0,
            from_unit: TemperatureUnit::Celsius,
            to_unit,
            active,
            errors: ErrorStore::new(),
            listeners: Vec::new(),
            next_subscription: 0,
        };
        model.convert();
        model
    }

    pub fn conversion_value(&self) -> &str {
        &self.conversion_value
    }

    pub fn converted_value(&self) -> f64 {
        self.converted_value
    }

    pub fn from_unit(&self) -> TemperatureUnit {
        self.from_unit
    }

    pub fn to_unit(&self) -> TemperatureUnit {
        self.to_unit
    }

    /// 현재 목표 단위의 변환기.
    pub fn active_converter(&self) -> &Rc<dyn Convert> {
        &self.active
    }

    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }

    /// 입력값에 저장된 오류가 없으면 true.
    pub fn is_valid(&self) -> bool {
        !self.errors.has_errors(Field::ConversionValue)
    }

    /// 저장된 모든 오류를 줄바꿈으로 이어 붙인다.
    pub fn error_summary(&self) -> Option<String> {
        self.errors.summary()
    }

    /// 필드를 다시 검증하고 현재 오류를 돌려준다. 통과하면 None.
    pub fn error_for(&mut self, field: Field) -> Option<ValidationError> {
        self.validate(field).err()
    }

    /// 입력 문자열을 바꾼다. 같은 값이면 아무 일도 하지 않는다.
    pub fn set_conversion_value(&mut self, value: impl Into<String>) {
        let value = value.into();
        if value == self.conversion_value {
            return;
        }
        self.conversion_value = value;
        self.notify(Property::ConversionValue);
        self.convert();
    }

    /// 입력 단위를 바꾼다.
    pub fn set_from_unit(&mut self, unit: TemperatureUnit) {
        if unit == self.from_unit {
            return;
        }
        self.from_unit = unit;
        self.notify(Property::SelectedFromUnit);
        self.convert();
    }

    /// 목표 단위를 바꾸고 해당 단위의 변환기를 새로 조회한다.
    pub fn set_to_unit(&mut self, unit: TemperatureUnit) {
        if unit == self.to_unit {
            return;
        }
        self.to_unit = unit;
        self.notify(Property::SelectedToUnit);
        self.active = self.factory.get(unit);
        self.convert();
    }

    /// 입력/목표 단위를 맞바꾼다.
    pub fn swap_units(&mut self) {
        let (from, to) = (self.from_unit, self.to_unit);
        self.set_to_unit(from);
        self.set_from_unit(to);
    }

    /// 변환 결과를 불필요한 0 없이 문자열로 만든다.
    pub fn display_value(&self) -> String {
        format_value(self.converted_value)
    }

    /// 속성 변경 구독을 등록한다.
    pub fn subscribe<L>(&mut self, listener: L) -> SubscriptionId
    where
        L: FnMut(&InputModel<F>, Property) + 'static,
    {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// 구독을 해제한다. 등록되어 있었으면 true.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    fn notify(&mut self, property: Property) {
        // 콜백이 모델을 읽을 수 있도록 목록을 잠시 분리한다
        let mut listeners = std::mem::take(&mut self.listeners);
        for (_, listener) in listeners.iter_mut() {
            listener(self, property);
        }
        self.listeners = listeners;
    }

    fn validate(&mut self, field: Field) -> Result<f64, ValidationError> {
        let result = match field {
            Field::ConversionValue => parse_conversion_value(&self.conversion_value),
        };
        let was_valid = self.is_valid();
        let changed = match &result {
            Ok(_) => self.errors.clear(field),
            Err(e) => self.errors.store(field, e.clone()),
        };
        if changed {
            self.notify(Property::Errors);
            if was_valid != self.is_valid() {
                self.notify(Property::IsValid);
            }
        }
        result
    }

    fn convert(&mut self) {
        let value = match self.validate(Field::ConversionValue) {
            Ok(v) => v,
            Err(e) => {
                debug!("skipping conversion of {:?}: {e}", self.conversion_value);
                return;
            }
        };
        let converted = round_to(
            self.active.convert(value, self.from_unit),
            CONVERTED_VALUE_PRECISION,
        );
        debug!(
            "converted {value} {} -> {converted} {}",
            self.from_unit, self.to_unit
        );
        self.set_converted_value(converted);
    }

    fn set_converted_value(&mut self, value: f64) {
        if value.total_cmp(&self.converted_value).is_eq() {
            return;
        }
        self.converted_value = value;
        self.notify(Property::ConvertedValue);
    }
}

impl<F: ConverterFactory> std::fmt::Debug for InputModel<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InputModel")
            .field("conversion_value", &self.conversion_value)
            .field("converted_value", &self.converted_value)
            .field("from_unit", &self.from_unit)
            .field("to_unit", &self.to_unit)
            .field("errors", &self.errors)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// 소수 `digits` 자리로 반올림한다. 정확히 절반이면 짝수 쪽으로 보낸다.
pub fn round_to(value: f64, digits: i32) -> f64 {
    let scale = 10f64.powi(digits);
    (value * scale).round_ties_even() / scale
}

/// 값을 불필요한 0 없이 표시한다. 음의 0은 0으로 표시한다.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    format!("{value}")
}

/// 값과 단위 기호를 합쳐 결과 문자열을 만든다.
pub fn format_result(value: f64, unit: TemperatureUnit) -> String {
    format!("{} {}", format_value(value), unit.symbol())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_fixed_precision() {
        assert_eq!(round_to(37.777_777_777_777_78, 4), 37.7778);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(-17.777_777_777_777_78, 10), -17.777_777_777_8);
    }

    #[test]
    fn formats_without_trailing_zeros() {
        assert_eq!(format_value(32.0), "32");
        assert_eq!(format_value(-0.0), "0");
        assert_eq!(format_result(33.8, TemperatureUnit::Fahrenheit), "33.8 °F");
    }

    #[test]
    fn swap_exchanges_units_and_recomputes() {
        let mut model = InputModel::new();
        model.set_conversion_value("212");
        model.swap_units();
        assert_eq!(model.from_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(model.to_unit(), TemperatureUnit::Celsius);
        assert_eq!(model.converted_value(), 100.0);
        assert_eq!(model.display_value(), "100");
    }

    #[test]
    fn listener_sees_updated_state() {
        use std::cell::RefCell;

        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut model = InputModel::new();
        let sink = Rc::clone(&seen);
        model.subscribe(move |m, p| {
            if p == Property::ConvertedValue {
                sink.borrow_mut().push(m.converted_value());
            }
        });
        model.set_conversion_value("100");
        assert_eq!(*seen.borrow(), vec![212.0]);
    }
}
