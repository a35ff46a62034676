use std::io::{self, BufRead, Write};

use log::warn;

use crate::app::AppError;
use crate::i18n::{keys, Translator};
use crate::registry::ConverterFactory;
use crate::units::TemperatureUnit;
use crate::validation::{Field, ValidationError};
use crate::view_model::{format_result, InputModel};

/// 대화형 입력에서 해석한 명령.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Convert(String),
    FromUnit,
    ToUnit,
    Swap,
    Quit,
    Empty,
}

impl Command {
    pub fn parse(line: &str) -> Command {
        match line.trim() {
            "" => Command::Empty,
            "q" | "quit" | "exit" => Command::Quit,
            "s" | "swap" => Command::Swap,
            "f" | "from" => Command::FromUnit,
            "t" | "to" => Command::ToUnit,
            other => Command::Convert(other.to_string()),
        }
    }
}

/// 입력값 하나를 변환해 결과 문자열 또는 오류를 돌려준다.
pub fn convert_once<F: ConverterFactory>(
    model: &mut InputModel<F>,
    raw: &str,
) -> Result<String, ValidationError> {
    model.set_conversion_value(raw);
    match model.error_for(Field::ConversionValue) {
        Some(err) => Err(err),
        None => Ok(format_result(model.converted_value(), model.to_unit())),
    }
}

/// 표준 입출력으로 대화형 루프를 실행한다.
pub fn interactive<F: ConverterFactory>(
    model: &mut InputModel<F>,
    tr: &Translator,
) -> Result<(), AppError> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    session(model, tr, stdin.lock(), stdout.lock())
}

/// 주어진 입력 스트림이 끝나거나 종료 명령이 올 때까지 명령을 처리한다.
pub fn session<F, R, W>(
    model: &mut InputModel<F>,
    tr: &Translator,
    mut input: R,
    mut out: W,
) -> Result<(), AppError>
where
    F: ConverterFactory,
    R: BufRead,
    W: Write,
{
    writeln!(out, "{}", tr.t(keys::CLI_HEADING))?;
    writeln!(out, "{}", tr.t(keys::CLI_HELP))?;
    print_units(model, tr, &mut out)?;
    loop {
        let Some(line) = read_line(&mut input, &mut out, &tr.t(keys::CLI_PROMPT))? else {
            break;
        };
        match Command::parse(&line) {
            Command::Quit => break,
            Command::Empty => {}
            Command::Swap => {
                model.swap_units();
                print_units(model, tr, &mut out)?;
                print_result(model, tr, &mut out)?;
            }
            cmd @ (Command::FromUnit | Command::ToUnit) => {
                let Some(unit) = read_unit(&mut input, &mut out, tr)? else {
                    break;
                };
                if cmd == Command::FromUnit {
                    model.set_from_unit(unit);
                } else {
                    model.set_to_unit(unit);
                }
                print_units(model, tr, &mut out)?;
                print_result(model, tr, &mut out)?;
            }
            Command::Convert(raw) => {
                model.set_conversion_value(raw);
                print_result(model, tr, &mut out)?;
            }
        }
    }
    Ok(())
}

fn print_units<F: ConverterFactory, W: Write>(
    model: &InputModel<F>,
    tr: &Translator,
    out: &mut W,
) -> Result<(), AppError> {
    let line = tr.t_with(
        keys::CLI_CURRENT_UNITS,
        &[
            ("from", model.from_unit().symbol().to_string()),
            ("to", model.to_unit().symbol().to_string()),
        ],
    );
    writeln!(out, "{line}")?;
    Ok(())
}

fn print_result<F: ConverterFactory, W: Write>(
    model: &mut InputModel<F>,
    tr: &Translator,
    out: &mut W,
) -> Result<(), AppError> {
    match model.error_for(Field::ConversionValue) {
        Some(err) => writeln!(
            out,
            "{}: {}",
            tr.t(keys::ERROR_PREFIX),
            tr.t(err.message_key())
        )?,
        None => writeln!(
            out,
            "{} {}",
            tr.t(keys::CLI_RESULT),
            format_result(model.converted_value(), model.to_unit())
        )?,
    }
    Ok(())
}

/// 한 줄을 읽는다. 입력이 끝났으면 None.
fn read_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> Result<Option<String>, AppError> {
    write!(out, "{prompt}")?;
    out.flush()?;
    let mut buf = String::new();
    if input.read_line(&mut buf)? == 0 {
        return Ok(None);
    }
    Ok(Some(buf))
}

fn read_unit<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    tr: &Translator,
) -> Result<Option<TemperatureUnit>, AppError> {
    loop {
        let Some(line) = read_line(input, out, &tr.t(keys::CLI_PROMPT_UNIT))? else {
            return Ok(None);
        };
        match line.parse::<TemperatureUnit>() {
            Ok(unit) => return Ok(Some(unit)),
            Err(e) => {
                warn!("{e}");
                writeln!(
                    out,
                    "{}: {}",
                    tr.t(keys::ERROR_PREFIX),
                    tr.t(keys::ERROR_UNKNOWN_UNIT)
                )?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run_session(script: &str) -> (InputModel, String) {
        let mut model = InputModel::new();
        let tr = Translator::new("en");
        let mut out = Vec::new();
        session(&mut model, &tr, Cursor::new(script.to_string()), &mut out).unwrap();
        (model, String::from_utf8(out).unwrap())
    }

    #[test]
    fn parses_commands() {
        assert_eq!(Command::parse(" q\n"), Command::Quit);
        assert_eq!(Command::parse("s"), Command::Swap);
        assert_eq!(Command::parse("\n"), Command::Empty);
        assert_eq!(Command::parse("-40\n"), Command::Convert("-40".into()));
    }

    #[test]
    fn converts_entered_values() {
        let (model, out) = run_session("100\nq\n");
        assert!(out.contains("Result: 212 °F"), "{out}");
        assert_eq!(model.converted_value(), 212.0);
    }

    #[test]
    fn reports_validation_errors() {
        let (_, out) = run_session("123a\n20001\n");
        assert!(out.contains("Error: Please enter a valid number."), "{out}");
        assert!(out.contains("Error: Please enter a value between -20000 and 20000."));
    }

    #[test]
    fn changes_units_and_retries_unknown_unit() {
        let (model, out) = run_session("f\nK\nF\n-40\n");
        assert!(out.contains("Error: Unknown unit."), "{out}");
        assert_eq!(model.from_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(model.to_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(model.converted_value(), -40.0);
    }

    #[test]
    fn convert_once_returns_result_or_error() {
        let mut model = InputModel::new();
        assert_eq!(convert_once(&mut model, "37").unwrap(), "98.6 °F");
        assert_eq!(convert_once(&mut model, "x"), Err(ValidationError::InvalidFormat));
    }
}
