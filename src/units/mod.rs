//! 단위 정의 모듈.

pub mod temperature;

pub use temperature::{available_units, TemperatureUnit};
