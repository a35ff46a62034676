use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::{debug, info};
use sys_locale::get_locale;

use crate::units::{available_units, TemperatureUnit};

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const APP_TITLE: &str = "general.app_title";

    pub const CLI_HEADING: &str = "cli.heading";
    pub const CLI_HELP: &str = "cli.help";
    pub const CLI_PROMPT: &str = "cli.prompt";
    pub const CLI_CURRENT_UNITS: &str = "cli.current_units";
    pub const CLI_RESULT: &str = "cli.result";
    pub const CLI_PROMPT_UNIT: &str = "cli.prompt_unit";

    pub const GUI_VALUE: &str = "gui.value";
    pub const GUI_VALUE_TIP: &str = "gui.value_tip";
    pub const GUI_FROM: &str = "gui.from";
    pub const GUI_TO: &str = "gui.to";
    pub const GUI_RESULT: &str = "gui.result";
    pub const GUI_SWAP: &str = "gui.swap";
    pub const GUI_ALWAYS_ON_TOP: &str = "gui.always_on_top";
    pub const GUI_LANGUAGE: &str = "gui.language";

    pub const ERROR_INVALID_FORMAT: &str = "error.invalid_format";
    pub const ERROR_OUT_OF_RANGE: &str = "error.out_of_range";
    pub const ERROR_UNKNOWN_UNIT: &str = "error.unknown_unit";

    pub const UNIT_CELSIUS: &str = "unit.celsius";
    pub const UNIT_FAHRENHEIT: &str = "unit.fahrenheit";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ko") {
            Language::Ko
        } else {
            Language::En
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리(locales/ 등)를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        if let Some(map) = &overrides {
            info!("loaded {} strings from language pack ({lang_code})", map.len());
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 키를 조회해 문자열을 반환한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<String> {
        self.overrides.as_ref().and_then(|m| m.get(key).cloned())
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 → 영어 순으로 찾고, 모두 없으면 키를 그대로 쓴다.
    pub fn t(&self, key: &str) -> String {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        let builtin = match self.lang {
            Language::Ko => ko(key).or_else(|| en(key)),
            Language::En => en(key),
        };
        match builtin {
            Some(s) => s.to_string(),
            None => {
                debug!("missing translation for {key}");
                key.to_string()
            }
        }
    }

    /// 선택 목록에 보여줄 단위 이름.
    pub fn unit_label(&self, unit: TemperatureUnit) -> String {
        match unit {
            TemperatureUnit::Celsius => self.t(keys::UNIT_CELSIUS),
            TemperatureUnit::Fahrenheit => self.t(keys::UNIT_FAHRENHEIT),
        }
    }

    /// 선택 위젯용 (번역된 이름, 단위) 목록.
    pub fn unit_options(&self) -> Vec<(String, TemperatureUnit)> {
        available_units()
            .into_iter()
            .map(|(_, unit)| (self.unit_label(unit), unit))
            .collect()
    }

    /// `{name}` 자리표시자를 채운 번역을 돌려준다.
    pub fn t_with(&self, key: &str, vars: &[(&str, String)]) -> String {
        fill_template(&self.t(key), vars)
    }
}

/// 템플릿의 `{key}`를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: &str, config_lang: Option<&str>) -> String {
    normalize_lang(cli_arg)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en-us".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        "ko" | "ko-kr" => Some("ko-kr".into()),
        "en" | "en-us" | "en-uk" => Some("en-us".into()),
        other if other.starts_with("ko") => Some("ko-kr".into()),
        other if other.starts_with("en") => Some("en-us".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko-kr".into()),
        "en" => Some("en-us".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(lang) = get_locale().as_deref().and_then(normalize_locale_string) {
        return Some(lang);
    }
    for var in ["LANG", "LC_ALL"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 테이블은 점으로 이어진 키로 평탄화한다.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    // 1) 전체 코드 (en-us)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) 기본 코드 (en)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Table = toml::from_str(src).ok()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    walk(&format!("{prefix}.{k}"), v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in &value {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        APP_TITLE => "온도 변환기",
        CLI_HEADING => "\n=== 온도 변환기 ===",
        CLI_HELP => "숫자 입력: 변환 / f: 입력 단위 / t: 변환 단위 / s: 단위 교환 / q: 종료",
        CLI_PROMPT => "> ",
        CLI_CURRENT_UNITS => "현재 단위: {from} → {to}",
        CLI_RESULT => "변환 결과:",
        CLI_PROMPT_UNIT => "단위 입력 (C/F): ",
        GUI_VALUE => "값",
        GUI_VALUE_TIP => "-20000 ~ 20000 사이의 숫자를 입력하세요",
        GUI_FROM => "입력 단위",
        GUI_TO => "변환 단위",
        GUI_RESULT => "결과",
        GUI_SWAP => "⇄ 단위 교환",
        GUI_ALWAYS_ON_TOP => "항상 위",
        GUI_LANGUAGE => "언어",
        ERROR_INVALID_FORMAT => "올바른 숫자를 입력하세요.",
        ERROR_OUT_OF_RANGE => "-20000 ~ 20000 사이의 값을 입력하세요.",
        ERROR_UNKNOWN_UNIT => "알 수 없는 단위입니다.",
        UNIT_CELSIUS => "섭씨 (°C)",
        UNIT_FAHRENHEIT => "화씨 (°F)",
        _ => return None,
    })
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        APP_TITLE => "Temperature Converter",
        CLI_HEADING => "\n=== Temperature Converter ===",
        CLI_HELP => "number: convert / f: from unit / t: to unit / s: swap units / q: quit",
        CLI_PROMPT => "> ",
        CLI_CURRENT_UNITS => "Units: {from} → {to}",
        CLI_RESULT => "Result:",
        CLI_PROMPT_UNIT => "Unit (C/F): ",
        GUI_VALUE => "Value",
        GUI_VALUE_TIP => "Enter a number between -20000 and 20000",
        GUI_FROM => "From",
        GUI_TO => "To",
        GUI_RESULT => "Result",
        GUI_SWAP => "⇄ Swap",
        GUI_ALWAYS_ON_TOP => "Always on top",
        GUI_LANGUAGE => "Language",
        ERROR_INVALID_FORMAT => "Please enter a valid number.",
        ERROR_OUT_OF_RANGE => "Please enter a value between -20000 and 20000.",
        ERROR_UNKNOWN_UNIT => "Unknown unit.",
        UNIT_CELSIUS => "Celsius (°C)",
        UNIT_FAHRENHEIT => "Fahrenheit (°F)",
        _ => return None,
    })
}
