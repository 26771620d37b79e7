use crate::{AppSettings, RawSettings};
use color_eyre::eyre::Result;
use config::{Config, Environment, File, FileFormat};
use std::path::Path;
use tracing::info;

const SETTINGS_PATH: &str = "config/settings.yaml";

/// Defaults for every setting, so a partial `settings.yaml` is enough.
const DEFAULT_SETTINGS: &str = r"
api:
  host: 0.0.0.0
  port: 5000
  allowed_origins: []
  max_upload_bytes: 16777216
  allowed_extensions: [png, jpg, jpeg, gif, bmp]
logging:
  level: info
analyzer:
  inference_max_size: 800
  llm:
    base_url: http://localhost:8080
    classification_model: ''
    caption_model: ''
    temperature: 0.2
    top_predictions: 5
  faces:
    model_path: ''
    min_face_size: 20
    score_threshold: 2.0
    pyramid_scale_factor: 0.8
    slide_window_step: 4
";

/// Loads settings from the defaults, `config/settings.yaml` when present, and
/// `APP__`-prefixed environment variables, in increasing priority.
pub fn load_app_settings() -> Result<AppSettings> {
    // Need to load from dotenv to get it to overwrite settings from env.
    dotenv::from_path(".env").ok();
    let config_path = Path::new(SETTINGS_PATH);
    if config_path.exists() {
        info!("Loading settings from {}", config_path.display());
    }

    let builder = Config::builder()
        .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Yaml))
        .add_source(File::from(config_path).required(false))
        .add_source(
            Environment::with_prefix("APP")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("api.allowed_origins")
                .with_list_parse_key("api.allowed_extensions")
                .try_parsing(true),
        );

    let raw_settings = builder.build()?.try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}

/// Parses settings from a YAML document layered over the defaults.
pub fn settings_from_yaml(yaml: &str) -> Result<AppSettings> {
    let raw_settings = Config::builder()
        .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Yaml))
        .add_source(File::from_str(yaml, FileFormat::Yaml))
        .build()?
        .try_deserialize::<RawSettings>()?;
    Ok(raw_settings.into())
}
