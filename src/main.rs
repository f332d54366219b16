use clap::Parser;

use leaching_prediction_toolbox::{
    app, artifact::ModelSet, config, i18n, leaching::predictor::Strategy, ui_cli,
};
use std::path::Path;

/// 침출 효율 예측 CLI.
#[derive(Parser, Debug)]
#[command(name = "leaching_prediction_toolbox_cli")]
struct Cli {
    /// 표시 언어 (auto/ko/en/es)
    #[arg(long, short = 'L', default_value = "auto")]
    lang: String,
    /// 모델 아티팩트 디렉터리 (설정값을 대체)
    #[arg(long)]
    models: Option<String>,
}

/// 프로그램의 엔트리 포인트. 설정과 모델을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default()?;
    if let Some(dir) = cli.models {
        cfg.models_dir = dir;
    }
    let lang_code = i18n::resolve_language(&cli.lang, Some(cfg.language.as_str()));
    let tr = i18n::Translator::new_with_pack(&lang_code, cfg.language_pack_dir.as_deref());

    // 아티팩트는 시작 시 한 번만 로드한다. 공식 전략이면 없어도 동작한다.
    let models = match ModelSet::load_dir(Path::new(&cfg.models_dir)) {
        Ok(set) => Some(set),
        Err(err) => {
            if cfg.strategy == Strategy::Model {
                return Err(Box::new(err));
            }
            eprintln!("{}: {err}", tr.t(i18n::keys::MODELS_NOT_LOADED));
            None
        }
    };
    if cfg.strategy == Strategy::Model {
        if let Some(set) = &models {
            ui_cli::check_schema_against_models(&cfg, set)?;
        }
    }

    app::run(&mut cfg, &tr, models.as_ref())?;
    Ok(())
}
