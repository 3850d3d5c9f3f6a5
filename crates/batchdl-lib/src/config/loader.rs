use super::Config;
use crate::error::ConfigError;
use config::Config as ConfigBuilder;

pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {
    let config_builder = ConfigBuilder::builder()
        .add_source(config::File::with_name(config_path))
        .build()?;

    config_builder.try_deserialize().map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DownloadEntry;
    use std::path::PathBuf;

    #[test]
    fn test_load_yaml_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batchdl.yaml");
        std::fs::write(
            &path,
            [
                "threads: 4",
                "dest_dir: /tmp/downloads",
                "downloads:",
                "  - url: http://example.invalid/a.iso",
                "    filename: a.iso",
                "  - url: http://example.invalid/b.iso",
            ]
            .join("\n"),
        )
        .unwrap();

        let config = load_config(path.to_str().unwrap()).unwrap();

        assert_eq!(config.threads, Some(4));
        assert_eq!(config.dest_dir, Some(PathBuf::from("/tmp/downloads")));
        assert_eq!(config.request_timeout_secs, None);
        assert_eq!(
            config.downloads,
            vec![
                DownloadEntry {
                    url: "http://example.invalid/a.iso".to_string(),
                    filename: Some("a.iso".to_string()),
                },
                DownloadEntry {
                    url: "http://example.invalid/b.iso".to_string(),
                    filename: None,
                },
            ]
        );
    }

    #[test]
    fn test_load_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batchdl.json");
        let config = Config {
            threads: Some(2),
            request_timeout_secs: Some(30),
            ..Default::default()
        };
        std::fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        assert_eq!(load_config(path.to_str().unwrap()).unwrap(), config);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("batchdl.toml");
        std::fs::write(&path, "threads = 2\nretries = 5\n").unwrap();

        let err = load_config(path.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Load(_)));
    }

    #[test]
    fn test_missing_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.yaml");

        assert!(matches!(
            load_config(path.to_str().unwrap()),
            Err(ConfigError::Load(_))
        ));
    }
}
