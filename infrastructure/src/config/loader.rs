//! Layered configuration discovery for `legalease`.

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "legalease";
const PROJECT_FILES: [&str; 2] = ["legalease.toml", ".legalease.toml"];
const ENV_PREFIX: &str = "LEGALEASE_";

/// Finds configuration files and merges them with the environment.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge every configuration source into a [`FileConfig`].
    ///
    /// Later sources win. From strongest to weakest:
    /// 1. `LEGALEASE_*` environment variables (e.g. `LEGALEASE_CHAT__STREAM=true`)
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./legalease.toml` or `./.legalease.toml`
    /// 4. XDG config: `$XDG_CONFIG_HOME/legalease/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(
            Self::global_config_path().as_deref(),
            Self::project_config_path().as_deref(),
            config_path.map(PathBuf::as_path),
        )
        .extract()
        .map_err(Box::new)
    }

    /// Built-in values only. Backs `--no-config`.
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    fn figment(global: Option<&Path>, project: Option<&Path>, explicit: Option<&Path>) -> Figment {
        let mut merged = Figment::from(Serialized::defaults(FileConfig::default()));

        if let Some(path) = global
            && path.exists()
        {
            merged = merged.merge(Toml::file(path));
        }

        if let Some(path) = project {
            merged = merged.merge(Toml::file(path));
        }

        // A missing explicit file is an error rather than silently skipped
        if let Some(path) = explicit {
            merged = merged.merge(Toml::file_exact(path));
        }

        merged.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// `<config dir>/legalease/config.toml`, whether or not it exists.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// First project file present in the working directory.
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Default location of the REPL history file
    pub fn default_history_path() -> Option<PathBuf> {
        dirs::data_dir().map(|d| d.join(APP_DIR).join("history.txt"))
    }

    /// Report which sources `load` would read. Backs `--show-config`.
    pub fn print_config_sources() {
        let mark = |found: bool| if found { "x" } else { " " };

        println!("Legal Ease configuration, strongest first:");
        println!("  [ ] environment   {}<SECTION>__<KEY>", ENV_PREFIX);
        match Self::project_config_path() {
            Some(path) => println!("  [x] project file  {}", path.display()),
            None => println!("  [ ] project file  {}", PROJECT_FILES.join(" or ")),
        }
        if let Some(path) = Self::global_config_path() {
            println!("  [{}] user file     {}", mark(path.exists()), path.display());
        }
        println!("  [x] defaults      built in");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use legalease_domain::{HistoryInclusionMode, Model};
    use std::io::Write;

    fn write_toml(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.model.name, Model::Falcon180BChat);
        assert_eq!(config.api.api_key_env, "AI71_API_KEY");
        assert!(config.output.color);
    }

    #[test]
    fn test_global_path_is_under_app_dir() {
        let path = ConfigLoader::global_config_path().unwrap();
        assert!(path.ends_with("legalease/config.toml"));
    }

    #[test]
    fn test_later_sources_override_earlier() {
        let dir = tempfile::tempdir().unwrap();
        let global = write_toml(
            dir.path(),
            "global.toml",
            r#"
[chat]
history_mode = "flat"
stream = true

[generation]
max_tokens = 256
"#,
        );
        let project = write_toml(
            dir.path(),
            "project.toml",
            r#"
[chat]
history_mode = "paired"
"#,
        );

        let config: FileConfig = ConfigLoader::figment(Some(&global), Some(&project), None)
            .extract()
            .unwrap();

        let chat = config.to_chat_config();
        assert_eq!(chat.history_mode, HistoryInclusionMode::FullPaired);
        assert!(chat.stream);
        assert_eq!(chat.parameters.max_tokens(), 256);
        assert_eq!(chat.parameters.top_p(), 0.95);
    }

    #[test]
    fn test_explicit_file_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        let result = ConfigLoader::figment(None, None, Some(&missing)).extract::<FileConfig>();
        assert!(result.is_err());
    }

    #[test]
    fn test_explicit_file_overrides_project() {
        let dir = tempfile::tempdir().unwrap();
        let project = write_toml(dir.path(), "project.toml", "[model]\nname = \"tiiuae/falcon-11B\"\n");
        let explicit =
            write_toml(dir.path(), "explicit.toml", "[model]\nname = \"tiiuae/falcon-40b-instruct\"\n");

        let config: FileConfig = ConfigLoader::figment(None, Some(&project), Some(&explicit))
            .extract()
            .unwrap();
        assert_eq!(config.model.name, Model::Falcon40BInstruct);
    }
}
