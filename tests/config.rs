use std::fs;

use tempfile::TempDir;
use temperature_converter::app::restore_units;
use temperature_converter::config::{load_from, Config, ConfigError};
use temperature_converter::units::TemperatureUnit;
use temperature_converter::view_model::InputModel;

#[test]
fn missing_file_creates_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let cfg = load_from(&path).expect("load default");
    assert_eq!(cfg, Config::default());
    assert!(path.exists());
    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("last_to_unit = \"Fahrenheit\""), "{written}");
}

#[test]
fn saved_units_are_restored() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    let mut cfg = Config::default();
    cfg.remember_units(TemperatureUnit::Fahrenheit, TemperatureUnit::Celsius);
    cfg.language = "ko".into();
    cfg.save_to(&path).unwrap();

    let loaded = load_from(&path).unwrap();
    assert_eq!(loaded, cfg);

    let mut model = InputModel::new();
    model.set_conversion_value("212");
    restore_units(&mut model, &loaded);
    assert_eq!(model.from_unit(), TemperatureUnit::Fahrenheit);
    assert_eq!(model.to_unit(), TemperatureUnit::Celsius);
    assert_eq!(model.converted_value(), 100.0);
}

#[test]
fn partial_file_fills_defaults() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "always_on_top = true\n").unwrap();
    let cfg = load_from(&path).unwrap();
    assert!(cfg.always_on_top);
    assert_eq!(cfg.last_to_unit, TemperatureUnit::Fahrenheit);
}

#[test]
fn malformed_file_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "last_from_unit = \"Kelvin\"\n").unwrap();
    let err = load_from(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err}");
}
