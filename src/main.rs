use std::process::ExitCode;

use clap::Parser;
use temperature_converter::units::TemperatureUnit;
use temperature_converter::{app, config, i18n, ui_cli, view_model::InputModel};

/// 섭씨/화씨 온도 변환기 (CLI).
#[derive(Debug, Parser)]
#[command(name = "temperature_converter_cli", version, about)]
struct Cli {
    /// 언어 코드 (auto/en/ko)
    #[arg(short = 'L', long, default_value = "auto")]
    lang: String,
    /// 입력 단위 (C/F)
    #[arg(short, long)]
    from: Option<TemperatureUnit>,
    /// 변환 단위 (C/F)
    #[arg(short, long)]
    to: Option<TemperatureUnit>,
    /// 변환할 값. 생략하면 대화형 모드로 실행한다.
    #[arg(allow_hyphen_values = true)]
    value: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    match try_run(Cli::parse()) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, app::AppError> {
    let mut cfg = config::load_or_default()?;
    if let Some(from) = cli.from {
        cfg.last_from_unit = from;
    }
    if let Some(to) = cli.to {
        cfg.last_to_unit = to;
    }
    let lang = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang, cfg.lang_pack_dir.as_deref());

    let Some(value) = cli.value else {
        app::run(&mut cfg, &tr)?;
        return Ok(ExitCode::SUCCESS);
    };

    let mut model = InputModel::new();
    app::restore_units(&mut model, &cfg);
    match ui_cli::convert_once(&mut model, &value) {
        Ok(result) => {
            println!("{result}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("{}: {}", tr.t(i18n::keys::ERROR_PREFIX), tr.t(err.message_key()));
            Ok(ExitCode::FAILURE)
        }
    }
}
