use std::rc::Rc;

use temperature_converter::conversion::TemperatureConverter;
use temperature_converter::registry::{ConverterFactory, ConverterRegistry};
use temperature_converter::units::TemperatureUnit;

#[test]
fn returns_same_instance_for_repeated_lookups() {
    let mut registry = ConverterRegistry::new();
    let first = registry.converter(TemperatureUnit::Fahrenheit);
    let second = registry.converter(TemperatureUnit::Fahrenheit);
    assert!(Rc::ptr_eq(&first, &second));
    assert_eq!(registry.len(), 1);
}

#[test]
fn factory_lookup_is_stable_and_typed() {
    let mut registry = ConverterRegistry::new();
    let first = registry.get(TemperatureUnit::Celsius);
    let second = registry.get(TemperatureUnit::Celsius);
    assert!(std::ptr::addr_eq(Rc::as_ptr(&first), Rc::as_ptr(&second)));
    assert_eq!(first.target(), TemperatureUnit::Celsius);
}

#[test]
fn each_unit_gets_its_own_converter() {
    let mut registry = ConverterRegistry::new();
    let c = registry.converter(TemperatureUnit::Celsius);
    let f = registry.converter(TemperatureUnit::Fahrenheit);
    assert_eq!(*c, TemperatureConverter::Celsius);
    assert_eq!(*f, TemperatureConverter::Fahrenheit);
    assert_eq!(registry.len(), 2);
}
