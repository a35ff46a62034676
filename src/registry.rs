//! 단위별 변환기를 한 번만 만들어 재사용하는 레지스트리.

use std::collections::HashMap;
use std::rc::Rc;

use log::debug;

use crate::conversion::{Convert, TemperatureConverter};
use crate::units::TemperatureUnit;

/// 목표 단위에 맞는 변환기를 내어주는 팩토리.
pub trait ConverterFactory {
    /// `unit`으로 환산하는 변환기를 돌려준다.
    fn get(&mut self, unit: TemperatureUnit) -> Rc<dyn Convert>;
}

/// 처음 요청될 때 변환기를 만들고 이후에는 같은 인스턴스를 돌려준다.
#[derive(Debug, Default)]
pub struct ConverterRegistry {
    converters: HashMap<TemperatureUnit, Rc<TemperatureConverter>>,
}

impl ConverterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 구체 타입으로 변환기를 조회한다. 없으면 생성해 등록한다.
    pub fn converter(&mut self, unit: TemperatureUnit) -> Rc<TemperatureConverter> {
        let entry = self.converters.entry(unit).or_insert_with(|| {
            debug!("creating converter for {unit}");
            Rc::new(TemperatureConverter::for_unit(unit))
        });
        Rc::clone(entry)
    }

    /// 지금까지 생성된 변환기 수.
    pub fn len(&self) -> usize {
        self.converters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.converters.is_empty()
    }

    /// 해당 단위의 변환기가 이미 생성되었는지 여부.
    pub fn contains(&self, unit: TemperatureUnit) -> bool {
        self.converters.contains_key(&unit)
    }
}

impl ConverterFactory for ConverterRegistry {
    fn get(&mut self, unit: TemperatureUnit) -> Rc<dyn Convert> {
        self.converter(unit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_lazily() {
        let mut registry = ConverterRegistry::new();
        assert!(registry.is_empty());
        registry.converter(TemperatureUnit::Celsius);
        assert!(registry.contains(TemperatureUnit::Celsius));
        assert!(!registry.contains(TemperatureUnit::Fahrenheit));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn trait_lookup_shares_the_cached_instance() {
        let mut registry = ConverterRegistry::new();
        let concrete = registry.converter(TemperatureUnit::Fahrenheit);
        let dynamic = registry.get(TemperatureUnit::Fahrenheit);
        assert!(std::ptr::addr_eq(Rc::as_ptr(&concrete), Rc::as_ptr(&dynamic)));
        assert_eq!(registry.len(), 1);
    }
}
