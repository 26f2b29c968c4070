//! Configuration loading from files.
//!
//! The YAML file is layered with `QUIRE__`-prefixed environment variables,
//! using `__` as the nesting separator (`QUIRE__SITE__URL` sets `site.url`).
//! List values are comma-separated (`QUIRE__MARKDOWN__EXTENSIONS=tables,footnotes`).

use std::path::{Path, PathBuf};

use super::{Config, ConfigError, DEFAULT_CONFIG_FILE};

const ENV_PREFIX: &str = "QUIRE";

/// Keys whose environment values are comma-separated lists.
const ENV_LIST_KEYS: &[&str] = &["markdown.extensions"];

/// The `QUIRE__` environment source.
fn environment() -> config::Environment {
    let environment = config::Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
        .list_separator(",");
    ENV_LIST_KEYS
        .iter()
        .fold(environment, |environment, key| environment.with_list_parse_key(key))
}

impl Config {
    /// Resolve the config file path from the command line argument,
    /// defaulting to `quire.yaml` in the current directory.
    pub fn path_from_arg(config_file: Option<&Path>) -> Result<PathBuf, ConfigError> {
        let config_file = config_file.unwrap_or(Path::new(DEFAULT_CONFIG_FILE));
        if config_file.is_relative() {
            Ok(std::env::current_dir()
                .map_err(ConfigError::CwdFailure)?
                .join(config_file))
        } else {
            Ok(config_file.to_path_buf())
        }
    }

    /// Load the config from the command line argument.
    ///
    /// An explicitly named file must exist; the default `quire.yaml` may be
    /// absent, in which case defaults (plus environment overrides) apply.
    pub fn load_from_arg(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let path = Self::path_from_arg(config_file)?;
        Self::load_from_file(&path, config_file.is_some())
    }

    /// Load the config from a file path
    pub(crate) fn load_from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        if required && !path.is_file() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        Self::load_with_environment(path, required, environment())
    }

    fn load_with_environment(
        path: &Path,
        required: bool,
        environment: config::Environment,
    ) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::File::from(path.to_path_buf())
                    .format(config::FileFormat::Yaml)
                    .required(required),
            )
            .add_source(environment)
            .build()?;

        let config: Config = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quire.yaml");
        std::fs::write(
            &path,
            r#"
site:
  title: Notes on Ruby and Go
  url: https://blog.example.com
content:
  posts: posts
  permalink: /:categories/:slug/
"#,
        )
        .unwrap();

        let config = Config::load_from_file(&path, true).unwrap();
        assert_eq!(config.site.title, "Notes on Ruby and Go");
        assert_eq!(config.site.url.as_deref(), Some("https://blog.example.com"));
        assert_eq!(config.content.posts, PathBuf::from("posts"));
        assert_eq!(config.content.permalink, "/:categories/:slug/");
        // Untouched sections keep their defaults
        assert_eq!(config.content.layouts, PathBuf::from("_layouts"));
        assert_eq!(config.site.output, PathBuf::from("_site"));
    }

    #[test]
    fn test_missing_optional_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from_file(&dir.path().join("quire.yaml"), false).unwrap();
        assert_eq!(config.content.default_layout, "post");
    }

    #[test]
    fn test_missing_required_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from_file(&dir.path().join("other.yaml"), true).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quire.yaml");
        std::fs::write(&path, "site:\n  title: From File\n").unwrap();

        let vars = config::Map::from([
            ("QUIRE__SITE__TITLE".to_string(), "From Env".to_string()),
            (
                "QUIRE__MARKDOWN__EXTENSIONS".to_string(),
                "tables,footnotes".to_string(),
            ),
        ]);
        let config =
            Config::load_with_environment(&path, true, environment().source(Some(vars))).unwrap();

        assert_eq!(config.site.title, "From Env");
        assert_eq!(config.markdown.extensions, vec!["tables", "footnotes"]);
    }

    #[test]
    fn test_invalid_permalink_fails_validation() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("quire.yaml");
        std::fs::write(&path, "content:\n  permalink: /:year/\n").unwrap();

        let err = Config::load_from_file(&path, true).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
