use color_eyre::Result;
use directories::ProjectDirs;
use lazy_static::lazy_static;
use serde::Deserialize;
use std::{env, path::PathBuf};
use tracing::debug;

/// Settings of the creation flow.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct WizardCfg {
    /// Artificial delay of the simulated creation call.
    pub submit_delay_ms: u64,
    /// Use the stricter "Basic Info" rules of the standalone creation page.
    pub strict_basic_info: bool,
    pub log_level: String,
    pub market_route: String,
    pub group_route: String,
}

impl Default for WizardCfg {
    fn default() -> Self {
        Self {
            submit_delay_ms: 1500,
            strict_basic_info: false,
            log_level: "info".into(),
            market_route: "/markets".into(),
            group_route: "/groups".into(),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub config_dir: PathBuf,
    #[serde(default)]
    pub wizard: WizardCfg,
}

lazy_static! {
    pub static ref PROJECT_NAME: String = env!("CARGO_CRATE_NAME").to_uppercase().to_string();
    pub static ref CONFIG_FOLDER: Option<PathBuf> =
        env::var(format!("{}_CONFIG", PROJECT_NAME.clone()))
            .ok()
            .map(PathBuf::from);
}

impl Config {
    /// Layer order (last wins): built-in defaults, `config.json5` / `config.toml`
    /// in the config dir, `MARKET_WIZARD__WIZARD__*` environment variables.
    pub fn new() -> Result<Self, config::ConfigError> {
        let config_dir = get_config_dir();
        Self::load_from(config_dir)
    }

    pub fn load_from(config_dir: PathBuf) -> Result<Self, config::ConfigError> {
        let defaults = WizardCfg::default();
        let mut builder = config::Config::builder()
            .set_default("config_dir", config_dir.to_string_lossy().to_string())?
            .set_default("wizard.submit_delay_ms", defaults.submit_delay_ms as i64)?
            .set_default("wizard.strict_basic_info", defaults.strict_basic_info)?
            .set_default("wizard.log_level", defaults.log_level)?
            .set_default("wizard.market_route", defaults.market_route)?
            .set_default("wizard.group_route", defaults.group_route)?;

        let config_files = [
            ("config.json5", config::FileFormat::Json5),
            ("config.toml", config::FileFormat::Toml),
        ];
        let mut found_config = false;
        for (file, format) in &config_files {
            let source = config::File::from(config_dir.join(file))
                .format(*format)
                .required(false);
            builder = builder.add_source(source);
            if config_dir.join(file).exists() {
                found_config = true
            }
        }
        if !found_config {
            debug!("No configuration file in {:?}; using defaults", config_dir);
        }
        builder = builder.add_source(
            config::Environment::with_prefix(PROJECT_NAME.as_str())
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let cfg: Self = builder.build()?.try_deserialize()?;

        Ok(cfg)
    }
}

pub fn get_config_dir() -> PathBuf {
    if let Some(s) = CONFIG_FOLDER.clone() {
        s
    } else if let Some(proj_dirs) = project_directory() {
        proj_dirs.config_local_dir().to_path_buf()
    } else {
        PathBuf::from(".").join(".config")
    }
}

fn project_directory() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "betting-platform", env!("CARGO_PKG_NAME"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = env::temp_dir().join(format!("market_wizard_cfg_{name}_{nanos}"));
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn defaults_without_files() {
        let dir = temp_dir("defaults");
        let cfg = Config::load_from(dir.clone()).unwrap();
        assert_eq!(cfg.wizard, WizardCfg::default());
        assert_eq!(cfg.config_dir, dir);
    }

    #[test]
    fn toml_file_overrides_defaults() {
        let dir = temp_dir("toml");
        fs::write(
            dir.join("config.toml"),
            "[wizard]\nsubmit_delay_ms = 20\nstrict_basic_info = true\n",
        )
        .unwrap();
        let cfg = Config::load_from(dir).unwrap();
        assert_eq!(cfg.wizard.submit_delay_ms, 20);
        assert!(cfg.wizard.strict_basic_info);
        assert_eq!(cfg.wizard.market_route, "/markets");
    }
}
