#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use rfd::FileDialog;
use std::{env, fs, path::Path};

use leaching_prediction_toolbox::{
    artifact::ModelSet,
    config,
    i18n,
    leaching::derived,
    leaching::features::{FeatureSchema, LeachInput, SchemaPreset},
    leaching::importance::{self, RankedImportance},
    leaching::predictor::{Prediction, Predictor, Strategy},
    units::TimeUnit,
};

fn main() -> Result<(), eframe::Error> {
    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/ko/en/es)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if a == "--lang" || a == "-L" {
            if i + 1 < args.len() {
                cli_lang = Some(args[i + 1].clone());
                i += 1;
            }
        }
        i += 1;
    }

    let icon_data = load_app_icon();
    let mut viewport = egui::ViewportBuilder::default().with_transparent(true);
    if let Some(icon) = icon_data.clone() {
        viewport = viewport.with_icon(icon);
    }
    let cfg = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let mut app_cfg = config::load_or_default().unwrap_or_default();
    if let Some(lang_cli) = cli_lang {
        let resolved = i18n::resolve_language(&lang_cli, Some(app_cfg.language.as_str()));
        app_cfg.language = resolved;
    }
    eframe::run_native(
        "Leaching Prediction Toolbox",
        cfg,
        Box::new(move |cc| {
            if let Err(e) = setup_fonts(&cc.egui_ctx) {
                eprintln!("Font error: {e}");
            }
            Box::new(GuiApp::new(app_cfg.clone()))
        }),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["LP_Tool.png", "icon.png", "assets/icon.png"];
    let path = search
        .iter()
        .find(|p| Path::new(*p).exists())
        .map(|s| s.to_string())?;
    let bytes = fs::read(&path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

fn setup_fonts(ctx: &egui::Context) -> Result<(), String> {
    // 1) 프로젝트 내 폰트
    let asset_path = Path::new("assets/fonts/malgun.ttf");
    if asset_path.exists() {
        let bytes = fs::read(asset_path).map_err(|e| format!("Failed to read font file: {e}"))?;
        apply_font_bytes(ctx, bytes, "korean_font");
        return Ok(());
    }

    // 2) 시스템 폰트 탐색 (Windows 기준)
    if let Some(windir) = std::env::var_os("WINDIR") {
        let fonts = Path::new(&windir).join("Fonts");
        let candidates = ["malgun.ttf", "malgunsl.ttf", "malgunbd.ttf", "gulim.ttc"];
        for cand in candidates {
            let p = fonts.join(cand);
            if p.exists() {
                let bytes = fs::read(&p)
                    .map_err(|e| format!("Failed to read system font ({}): {e}", p.display()))?;
                apply_font_bytes(ctx, bytes, "korean_font");
                return Ok(());
            }
        }
    }

    // 3) 실패: 기본 폰트 유지
    Err("Font not found. Korean text may not render.".into())
}

fn apply_font_bytes(ctx: &egui::Context, bytes: Vec<u8>, name: &str) {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.to_string(), egui::FontData::from_owned(bytes));
    if let Some(list) = fonts.families.get_mut(&egui::FontFamily::Proportional) {
        list.insert(0, name.to_string());
    }
    if let Some(list) = fonts.families.get_mut(&egui::FontFamily::Monospace) {
        list.push(name.to_string());
    }
    ctx.set_fonts(fonts);
}

fn label_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.label(text).on_hover_text(tip)
}

fn heading_with_tip(ui: &mut egui::Ui, text: &str, tip: &str) -> egui::Response {
    ui.heading(text).on_hover_text(tip)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tab {
    Prediction,
    Importances,
    Settings,
}

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    lang_input: String,
    lang_save_status: Option<String>,
    tab: Tab,
    window_alpha: f32,
    // 모델 아티팩트
    models: Option<ModelSet>,
    models_status: Option<String>,
    // 예측 입력
    input: LeachInput,
    time_value: f64,
    // 예측 결과
    prediction: Option<Prediction>,
    predict_error: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config) -> Self {
        let lang_code = i18n::resolve_language(&config.language, None);
        let tr = i18n::Translator::new_with_pack(&lang_code, config.language_pack_dir.as_deref());
        let lang_input = config.language.clone();
        let (models, models_status) = match ModelSet::load_dir(Path::new(&config.models_dir)) {
            Ok(set) => (Some(set), None),
            Err(err) => (None, Some(err.to_string())),
        };
        Self {
            tr,
            lang_input,
            lang_save_status: None,
            tab: Tab::Prediction,
            window_alpha: config.window_alpha.clamp(0.3, 1.0),
            models,
            models_status,
            input: LeachInput::default(),
            time_value: 1.0,
            prediction: None,
            predict_error: None,
            config,
        }
    }

    fn schema(&self) -> &'static FeatureSchema {
        FeatureSchema::preset(self.config.schema)
    }

    fn reload_models(&mut self) {
        match ModelSet::load_dir(Path::new(&self.config.models_dir)) {
            Ok(set) => {
                self.models = Some(set);
                self.models_status = None;
            }
            Err(err) => {
                self.models = None;
                self.models_status = Some(err.to_string());
            }
        }
    }

    fn run_prediction(&mut self) {
        let schema = self.schema();
        let mut input = self.input.clone();
        input.time_h = self.config.time_unit.to_hours(self.time_value);
        let outcome = match self.config.strategy {
            Strategy::Formula => Predictor::Formula.predict(schema, &input),
            Strategy::Model => match &self.models {
                Some(models) => Predictor::Model(models).predict(schema, &input),
                None => {
                    self.prediction = None;
                    self.predict_error =
                        Some(self.tr.t(i18n::keys::MODELS_NOT_LOADED).to_string());
                    return;
                }
            },
        };
        match outcome {
            Ok(p) => {
                self.prediction = Some(p);
                self.predict_error = None;
            }
            Err(err) => {
                self.prediction = None;
                self.predict_error = Some(err.to_string());
            }
        }
    }

    /// 사이드 메뉴를 제공한다.
    fn ui_nav(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.style_mut().wrap = Some(false);
        ui.vertical_centered(|ui| {
            ui.heading(txt("gui.nav.heading", "Menu"));
            ui.add_space(8.0);
        });
        for (tab, label) in [
            (Tab::Prediction, txt("gui.tab.prediction", "Prediction")),
            (
                Tab::Importances,
                txt("gui.tab.importances", "Feature Importances"),
            ),
            (Tab::Settings, txt("gui.tab.settings", "Settings")),
        ] {
            let selected = self.tab == tab;
            let button = egui::Button::new(label)
                .fill(if selected {
                    ui.visuals().selection.bg_fill
                } else {
                    ui.visuals().extreme_bg_color
                })
                .min_size(egui::vec2(ui.available_width(), 32.0));
            let resp = ui
                .add(button)
                .on_hover_text(txt("gui.nav.switch_tip", "Switch menu"));
            if resp.clicked() {
                self.tab = tab;
            }
            ui.add_space(4.0);
        }
    }

    fn ui_prediction(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.pred.heading", "Leaching Efficiency Prediction"),
            &txt(
                "gui.pred.tip",
                "Enter process parameters and predict BS efficiency and residue.",
            ),
        );
        let strategy_label = match self.config.strategy {
            Strategy::Formula => txt("gui.pred.strategy_formula", "Mass-balance formula"),
            Strategy::Model => txt("gui.pred.strategy_model", "Regression model"),
        };
        ui.label(strategy_label);
        ui.add_space(8.0);

        egui::Frame::group(ui.style()).show(ui, |ui| {
            ui.vertical(|ui| {
                ui.label(txt("gui.pred.inputs", "Input Parameters"));
                egui::Grid::new("pred_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        label_with_tip(ui, "MP (gr)", "Solid feed mass");
                        ui.add(egui::DragValue::new(&mut self.input.solid_mass_g).speed(1.0));
                        ui.end_row();

                        label_with_tip(ui, "Cantidad Total (gr)", "Total quantity");
                        ui.add(egui::DragValue::new(&mut self.input.total_quantity_g).speed(1.0));
                        ui.end_row();

                        let time_label = match self.config.time_unit {
                            TimeUnit::Hours => "Tiempo (horas)",
                            TimeUnit::Minutes => "Tiempo (minutos)",
                        };
                        label_with_tip(ui, time_label, "Leaching time");
                        ui.add(egui::DragValue::new(&mut self.time_value).speed(0.1));
                        ui.end_row();

                        label_with_tip(ui, "Temperatura (°C)", "Reaction temperature");
                        ui.add(egui::DragValue::new(&mut self.input.temperature_c).speed(1.0));
                        ui.end_row();

                        label_with_tip(ui, "Disolvente", "Solvent amount");
                        ui.add(egui::DragValue::new(&mut self.input.solvent).speed(0.1));
                        ui.end_row();

                        label_with_tip(ui, "Licor de Lavado", "Wash liquor amount");
                        ui.add(egui::DragValue::new(&mut self.input.wash_liquor).speed(0.1));
                        ui.end_row();

                        label_with_tip(
                            ui,
                            "Concentración de ácido (mol/L)",
                            "Acid concentration; pH is derived from it",
                        );
                        ui.add(
                            egui::DragValue::new(&mut self.input.acid_concentration_mol_per_l)
                                .speed(0.01),
                        );
                        ui.end_row();

                        label_with_tip(ui, "Residuo Seco (%)", "Dry residue percentage");
                        ui.add(egui::DragValue::new(&mut self.input.dry_residue_pct).speed(0.1));
                        ui.end_row();

                        label_with_tip(ui, "cte2 (g/L)", "Secondary constant");
                        ui.add(egui::DragValue::new(&mut self.input.cte2_g_per_l).speed(0.1));
                        ui.end_row();

                        label_with_tip(
                            ui,
                            &txt("gui.pred.metal", "Metal"),
                            "Target metal to leach",
                        );
                        let schema = FeatureSchema::preset(self.config.schema);
                        if !schema.metals.contains(&self.input.metal) {
                            self.input.metal = schema.metals[0];
                        }
                        egui::ComboBox::from_id_source("pred_metal")
                            .selected_text(self.input.metal.code())
                            .show_ui(ui, |ui| {
                                for m in schema.metals {
                                    ui.selectable_value(&mut self.input.metal, *m, m.code());
                                }
                            });
                        ui.end_row();
                    });
            });
        });

        // 예측 전 표시 전용 파생값 피드백
        let ph = derived::ph_from_concentration(self.input.acid_concentration_mol_per_l);
        let volume = derived::acid_volume_from_mass(self.input.solid_mass_g);
        ui.add_space(4.0);
        ui.label(format!("{}: {:.2}", txt("gui.pred.derived_ph", "Computed pH"), ph));
        ui.label(format!(
            "{}: {:.5}",
            txt("gui.pred.derived_volume", "Computed acid volume (L)"),
            volume
        ));

        ui.add_space(8.0);
        if ui.button(txt("gui.pred.predict", "Predict")).clicked() {
            self.run_prediction();
        }

        if let Some(err) = &self.predict_error {
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::LIGHT_RED, err);
        }
        if let Some(p) = &self.prediction {
            ui.add_space(4.0);
            ui.label(format!(
                "{}: {:.2} %",
                txt("gui.pred.result_efficiency", "Predicted efficiency (BS)"),
                p.efficiency_pct
            ));
            ui.label(format!(
                "{}: {:.2} g",
                txt("gui.pred.result_residue", "Predicted residue (g)"),
                p.residue_g
            ));
            if let Some(cte2) = p.neutralized_output_g {
                ui.label(format!(
                    "{}: {:.2} g",
                    txt("gui.pred.result_neutralized", "Neutralized output cte2 (g)"),
                    cte2
                ));
            }
            if let Some(cte3) = p.solid_residue_g {
                ui.label(format!(
                    "{}: {:.2} g",
                    txt("gui.pred.result_solid_residue", "Solid residue cte3 (g)"),
                    cte3
                ));
            }
        }
    }

    fn ui_importances(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        heading_with_tip(
            ui,
            &txt("gui.imp.heading", "Feature Importances"),
            &txt(
                "gui.imp.tip",
                "Per-feature influence scores of the loaded regression models.",
            ),
        );
        ui.add_space(8.0);

        if ui
            .button(txt("gui.imp.pick_dir", "Choose model directory..."))
            .clicked()
        {
            if let Some(dir) = FileDialog::new().pick_folder() {
                self.config.models_dir = dir.display().to_string();
                self.reload_models();
                if self.models.is_some() {
                    if let Err(e) = self.config.save() {
                        self.models_status = Some(e.to_string());
                    }
                }
            }
        }

        let Some(models) = &self.models else {
            let msg = self
                .models_status
                .clone()
                .unwrap_or_else(|| txt("gui.imp.not_loaded", "Model artifacts are not loaded."));
            ui.add_space(4.0);
            ui.colored_label(egui::Color32::LIGHT_RED, msg);
            return;
        };

        let schema = FeatureSchema::preset(self.config.schema);
        let names = schema.feature_names();
        let top_n = self.config.top_importances;

        for (id, title_key, title_default, scores) in [
            (
                "imp_eff",
                "gui.imp.efficiency",
                "Top features - efficiency model",
                &models.efficiency.feature_importances,
            ),
            (
                "imp_res",
                "gui.imp.residue",
                "Top features - residue model",
                &models.residue.feature_importances,
            ),
        ] {
            ui.add_space(8.0);
            ui.label(txt(title_key, title_default));
            match importance::rank(&names, scores, top_n) {
                Ok(ranked) => draw_importance_bars(ui, id, &ranked),
                Err(err) => {
                    ui.colored_label(egui::Color32::LIGHT_RED, err.to_string());
                }
            }
        }
    }

    fn ui_settings(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();
        let txt = |key: &str, default: &str| tr.lookup(key).unwrap_or_else(|| default.to_string());
        ui.heading(txt("gui.set.heading", "Settings"));
        ui.add_space(8.0);

        egui::Grid::new("set_grid")
            .num_columns(2)
            .spacing([12.0, 8.0])
            .show(ui, |ui| {
                ui.label(txt("gui.set.strategy", "Prediction strategy"));
                egui::ComboBox::from_id_source("set_strategy")
                    .selected_text(format!("{:?}", self.config.strategy))
                    .show_ui(ui, |ui| {
                        ui.selectable_value(
                            &mut self.config.strategy,
                            Strategy::Formula,
                            txt("gui.pred.strategy_formula", "Mass-balance formula"),
                        );
                        ui.selectable_value(
                            &mut self.config.strategy,
                            Strategy::Model,
                            txt("gui.pred.strategy_model", "Regression model"),
                        );
                    });
                ui.end_row();

                ui.label(txt("gui.set.schema", "Feature schema"));
                egui::ComboBox::from_id_source("set_schema")
                    .selected_text(self.schema().name)
                    .show_ui(ui, |ui| {
                        for preset in [
                            SchemaPreset::Complete,
                            SchemaPreset::Reduced,
                            SchemaPreset::Restricted,
                        ] {
                            ui.selectable_value(
                                &mut self.config.schema,
                                preset,
                                FeatureSchema::preset(preset).name,
                            );
                        }
                    });
                ui.end_row();

                ui.label(txt("gui.set.time_unit", "Time-entry unit"));
                egui::ComboBox::from_id_source("set_time_unit")
                    .selected_text(self.config.time_unit.code())
                    .show_ui(ui, |ui| {
                        ui.selectable_value(&mut self.config.time_unit, TimeUnit::Hours, "h");
                        ui.selectable_value(&mut self.config.time_unit, TimeUnit::Minutes, "min");
                    });
                ui.end_row();

                ui.label(txt("gui.set.models_dir", "Model directory"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.config.models_dir);
                    if ui.button("...").clicked() {
                        if let Some(dir) = FileDialog::new().pick_folder() {
                            self.config.models_dir = dir.display().to_string();
                            self.reload_models();
                        }
                    }
                });
                ui.end_row();

                ui.label(txt("gui.set.language", "Language (auto/ko/en/es)"));
                ui.horizontal(|ui| {
                    ui.text_edit_singleline(&mut self.lang_input);
                    if ui
                        .button(txt("gui.set.apply_language", "Apply language"))
                        .clicked()
                    {
                        self.config.language = self.lang_input.clone();
                        let code = i18n::resolve_language(&self.config.language, None);
                        self.tr = i18n::Translator::new_with_pack(
                            &code,
                            self.config.language_pack_dir.as_deref(),
                        );
                        self.lang_save_status = Some(code);
                    }
                });
                ui.end_row();

                ui.label(txt("gui.set.alpha", "Window alpha"));
                ui.add(egui::Slider::new(&mut self.window_alpha, 0.3..=1.0));
                ui.end_row();
            });

        if let Some(code) = &self.lang_save_status {
            ui.label(format!("language = {code}"));
        }

        ui.add_space(8.0);
        if ui.button(txt("gui.set.save", "Save settings")).clicked() {
            self.config.window_alpha = self.window_alpha;
            match self.config.save() {
                Ok(()) => {
                    self.lang_save_status = Some(txt("gui.set.saved", "Settings saved."));
                }
                Err(e) => {
                    self.lang_save_status = Some(e.to_string());
                }
            }
        }
    }
}

/// 중요도 수평 막대 차트. 최고 점수를 기준으로 폭을 정규화한다.
fn draw_importance_bars(ui: &mut egui::Ui, id: &str, ranked: &[RankedImportance]) {
    let max_score = ranked
        .iter()
        .map(|r| r.score)
        .fold(f64::EPSILON, f64::max);
    egui::Grid::new(id)
        .num_columns(3)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            for item in ranked {
                ui.label(egui::RichText::new(&item.name).small());
                let desired = egui::vec2(220.0, 14.0);
                let (rect, _resp) = ui.allocate_exact_size(desired, egui::Sense::hover());
                ui.painter().rect_filled(
                    rect,
                    2.0,
                    ui.visuals().extreme_bg_color,
                );
                let frac = (item.score / max_score).clamp(0.0, 1.0) as f32;
                let bar = egui::Rect::from_min_size(
                    rect.min,
                    egui::vec2(rect.width() * frac, rect.height()),
                );
                ui.painter()
                    .rect_filled(bar, 2.0, egui::Color32::from_rgb(102, 153, 204));
                ui.label(format!("{:.4}", item.score));
                ui.end_row();
            }
        });
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let mut style = (*ctx.style()).clone();
        style.visuals.window_fill = style.visuals.window_fill.linear_multiply(self.window_alpha);
        style.visuals.panel_fill = style.visuals.panel_fill.linear_multiply(self.window_alpha);
        ctx.set_style(style);

        // 좌측 네비 + 본문
        egui::SidePanel::left("nav")
            .resizable(true)
            .min_width(140.0)
            .default_width(200.0)
            .max_width(400.0)
            .show(ctx, |ui| {
                self.ui_nav(ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| match self.tab {
                    Tab::Prediction => self.ui_prediction(ui),
                    Tab::Importances => self.ui_importances(ui),
                    Tab::Settings => self.ui_settings(ui),
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use leaching_prediction_toolbox::leaching::metal::Metal;

    #[test]
    fn new_app_starts_on_prediction_tab() {
        let app = GuiApp::new(config::Config::default());
        assert_eq!(app.tab, Tab::Prediction);
        assert_eq!(app.input.metal, Metal::Fe);
        assert!(app.prediction.is_none());
    }

    #[test]
    fn run_prediction_formula_path() {
        let mut app = GuiApp::new(config::Config::default());
        app.config.strategy = Strategy::Formula;
        app.input.solid_mass_g = 100.0;
        app.input.dry_residue_pct = 20.0;
        app.run_prediction();
        let p = app.prediction.expect("formula prediction");
        assert!((p.efficiency_pct - 80.0).abs() < 1e-9);
        assert!((p.residue_g - 20.0).abs() < 1e-9);
    }

    #[test]
    fn run_prediction_model_without_artifacts_reports_error() {
        let mut app = GuiApp::new(config::Config::default());
        app.config.strategy = Strategy::Model;
        app.models = None;
        app.run_prediction();
        assert!(app.prediction.is_none());
        assert!(app.predict_error.is_some());
    }
}
