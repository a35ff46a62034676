#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use eframe::{egui, App, Frame};
use image::GenericImageView;
use log::{debug, info, warn};
use temperature_converter::{
    app, config, i18n,
    i18n::keys,
    units::TemperatureUnit,
    validation::Field,
    view_model::InputModel,
};

/// 섭씨/화씨 온도 변환기.
#[derive(Debug, Parser)]
#[command(name = "temperature_converter", version, about)]
struct Args {
    /// 언어 코드 (auto/en/ko)
    #[arg(short = 'L', long)]
    lang: Option<String>,
}

const LANGUAGE_OPTIONS: [(&str, &str); 3] = [("auto", "Auto"), ("en-us", "English"), ("ko-kr", "한국어")];

fn main() -> Result<(), eframe::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let mut app_cfg = match config::load_or_default() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("{e}; using default settings");
            config::Config::default()
        }
    };
    if let Some(lang) = args.lang {
        app_cfg.language = lang;
    }

    let mut viewport = egui::ViewportBuilder::default()
        .with_inner_size([420.0, 260.0])
        .with_min_inner_size([360.0, 220.0]);
    if app_cfg.always_on_top {
        viewport = viewport.with_always_on_top();
    }
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let title = GuiApp::translator(&app_cfg).t(keys::APP_TITLE);
    eframe::run_native(
        &title,
        options,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                warn!("{e}");
            }
            Box::new(GuiApp::new(app_cfg, Some(PathBuf::from(config::CONFIG_PATH))))
        }),
    )
}

fn resolve(cfg: &config::Config) -> String {
    i18n::resolve_language(&cfg.language, None)
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png", "../icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = match image::load_from_memory(&bytes) {
        Ok(img) => img,
        Err(e) => {
            warn!("failed to decode icon {path}: {e}");
            return None;
        }
    };
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: img.to_rgba8().into_raw(),
        width: w,
        height: h,
    })
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    let font_name = name.to_string();
    fonts
        .font_data
        .insert(font_name.clone(), egui::FontData::from_owned(bytes));
    // 기본 폰트 뒤에 두어 한글 등 누락된 글리프만 채운다
    fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default()
        .push(font_name);
    ctx.set_fonts(fonts);
}

/// 한글 표시용 시스템 폰트를 찾아 등록한다. 찾지 못하면 기본 폰트를 유지한다.
fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    let mut candidates: Vec<PathBuf> = vec![PathBuf::from("assets/fonts/malgun.ttf")];
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        candidates.extend(["malgun.ttf", "gulim.ttc"].iter().map(|f| fonts.join(f)));
    }
    candidates.extend(
        [
            "/System/Library/Fonts/AppleSDGothicNeo.ttc",
            "/usr/share/fonts/truetype/nanum/NanumGothic.ttf",
            "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        ]
        .iter()
        .map(PathBuf::from),
    );
    for p in candidates {
        if p.exists() {
            let bytes = fs::read(&p)
                .map_err(|e| format!("Failed to read font ({}): {e}", p.display()))?;
            apply_font_bytes(ctx, bytes, "cjk_font");
            info!("using font {}", p.display());
            return Ok(());
        }
    }
    Err("No CJK font found; Korean text may not render.".into())
}

struct GuiApp {
    config: config::Config,
    config_path: Option<PathBuf>,
    tr: i18n::Translator,
    model: InputModel,
    input: String,
}

impl GuiApp {
    fn new(config: config::Config, config_path: Option<PathBuf>) -> Self {
        let tr = Self::translator(&config);
        let mut model = InputModel::new();
        model.subscribe(|m, p| debug!("{p:?} changed ({m:?})"));
        app::restore_units(&mut model, &config);
        let input = model.conversion_value().to_string();
        Self {
            config,
            config_path,
            tr,
            model,
            input,
        }
    }

    fn translator(config: &config::Config) -> i18n::Translator {
        let lang = resolve(config);
        info!("language resolved to {lang}");
        i18n::Translator::new_with_pack(&lang, config.lang_pack_dir.as_deref())
    }

    fn title(&self) -> String {
        self.tr.t(keys::APP_TITLE)
    }

    fn persist(&mut self) {
        self.config
            .remember_units(self.model.from_unit(), self.model.to_unit());
        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                warn!("{e}");
            }
        }
    }

    /// 언어가 실제로 바뀌었으면 true.
    fn set_language(&mut self, code: &str) -> bool {
        if self.config.language == code {
            return false;
        }
        self.config.language = code.to_string();
        self.tr = Self::translator(&self.config);
        self.persist();
        true
    }

    fn unit_combo(&self, ui: &mut egui::Ui, id: &str, current: TemperatureUnit) -> TemperatureUnit {
        let mut selected = current;
        egui::ComboBox::from_id_source(id)
            .selected_text(self.tr.unit_label(current))
            .show_ui(ui, |ui| {
                for (label, unit) in self.tr.unit_options() {
                    ui.selectable_value(&mut selected, unit, label);
                }
            });
        selected
    }

    fn ui_converter(&mut self, ui: &mut egui::Ui) {
        egui::Grid::new("conv_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(self.tr.t(keys::GUI_VALUE))
                    .on_hover_text(self.tr.t(keys::GUI_VALUE_TIP));
                let resp = ui.add(egui::TextEdit::singleline(&mut self.input).desired_width(160.0));
                if resp.changed() {
                    self.model.set_conversion_value(self.input.clone());
                }
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_FROM));
                let from = self.unit_combo(ui, "conv_from", self.model.from_unit());
                if from != self.model.from_unit() {
                    self.model.set_from_unit(from);
                    self.persist();
                }
                ui.end_row();

                ui.label(self.tr.t(keys::GUI_TO));
                let to = self.unit_combo(ui, "conv_to", self.model.to_unit());
                if to != self.model.to_unit() {
                    self.model.set_to_unit(to);
                    self.persist();
                }
                ui.end_row();
            });

        ui.add_space(6.0);
        if ui.button(self.tr.t(keys::GUI_SWAP)).clicked() {
            self.model.swap_units();
            self.persist();
        }
        ui.add_space(6.0);

        ui.horizontal(|ui| {
            ui.label(self.tr.t(keys::GUI_RESULT));
            ui.heading(format!(
                "{} {}",
                self.model.display_value(),
                self.model.to_unit().symbol()
            ));
        });
        let error_color = ui.visuals().error_fg_color;
        for err in self.model.errors().get(Field::ConversionValue) {
            ui.colored_label(error_color, self.tr.t(err.message_key()));
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            if ui
                .checkbox(&mut self.config.always_on_top, self.tr.t(keys::GUI_ALWAYS_ON_TOP))
                .changed()
            {
                self.persist();
            }
            ui.separator();
            ui.label(self.tr.t(keys::GUI_LANGUAGE));
            let mut lang = self.config.language.clone();
            egui::ComboBox::from_id_source("language")
                .selected_text(
                    LANGUAGE_OPTIONS
                        .iter()
                        .find(|(code, _)| *code == lang)
                        .map(|(_, label)| *label)
                        .unwrap_or(lang.as_str())
                        .to_string(),
                )
                .show_ui(ui, |ui| {
                    for (code, label) in LANGUAGE_OPTIONS {
                        ui.selectable_value(&mut lang, code.to_string(), label);
                    }
                });
            if self.set_language(&lang) {
                ui.ctx()
                    .send_viewport_cmd(egui::ViewportCommand::Title(self.title()));
            }
        });
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        ctx.send_viewport_cmd(egui::ViewportCommand::WindowLevel(if self.config.always_on_top {
            egui::WindowLevel::AlwaysOnTop
        } else {
            egui::WindowLevel::Normal
        }));

        egui::TopBottomPanel::bottom("settings").show(ctx, |ui| {
            self.ui_settings(ui);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading(self.title());
            ui.separator();
            self.ui_converter(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restores_units_from_config() {
        let mut cfg = config::Config::default();
        cfg.last_from_unit = TemperatureUnit::Fahrenheit;
        cfg.last_to_unit = TemperatureUnit::Celsius;
        let app = GuiApp::new(cfg, None);
        assert_eq!(app.model.from_unit(), TemperatureUnit::Fahrenheit);
        assert_eq!(app.model.to_unit(), TemperatureUnit::Celsius);
        assert_eq!(app.input, "0");
    }

    #[test]
    fn persist_remembers_current_units() {
        let mut app = GuiApp::new(config::Config::default(), None);
        app.model.swap_units();
        app.persist();
        assert_eq!(app.config.last_from_unit, TemperatureUnit::Fahrenheit);
        assert_eq!(app.config.last_to_unit, TemperatureUnit::Celsius);
    }

    #[test]
    fn switching_language_rebuilds_translator() {
        let mut app = GuiApp::new(config::Config::default(), None);
        assert!(app.set_language("ko-kr"));
        assert_eq!(app.tr.language(), i18n::Language::Ko);
        assert_eq!(app.config.language, "ko-kr");
        assert_eq!(app.title(), "온도 변환기");
        assert!(!app.set_language("ko-kr"));
    }
}
