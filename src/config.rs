use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::json;

use crate::watch::display::parse_offset_hours;

#[derive(Debug, Clone)]
pub struct WatchConfig {
    #[allow(dead_code)]
    pub version: u32,
    pub use_24h: bool,
    pub clocks: Vec<String>,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            version: 1,
            use_24h: true,
            clocks: Vec::new(),
        }
    }
}

/// A missing file is a first run and yields the default config; anything
/// else that prevents reading or parsing is an error.
pub fn load_watch_config(path: &Path) -> Result<WatchConfig> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(WatchConfig::default()),
        Err(err) => {
            return Err(err).with_context(|| format!("unable to read config {}", path.display()));
        }
    };
    parse_watch_config_text(&content)
}

pub fn parse_watch_config_text(content: &str) -> Result<WatchConfig> {
    let raw = serde_json::from_str::<WatchConfigFile>(content).map_err(|err| {
        let line = err.line();
        let column = err.column();
        anyhow::anyhow!("invalid JSON at line {line}, column {column}: {err}")
    })?;

    if raw.version != 1 {
        bail!(
            "unsupported watch config version {}; expected version 1",
            raw.version
        );
    }

    for spec in &raw.clocks {
        if parse_offset_hours(spec).is_none() {
            bail!("invalid timezone offset '{spec}', expected GMT+N or GMT-N");
        }
    }

    Ok(WatchConfig {
        version: raw.version,
        use_24h: raw.use_24h,
        clocks: raw.clocks,
    })
}

pub fn save_watch_config(path: &Path, config: &WatchConfig) -> Result<()> {
    let payload = json!({
        "version": 1,
        "use_24h": config.use_24h,
        "clocks": config.clocks,
    });
    let text = serde_json::to_string_pretty(&payload)?;
    fs::write(path, format!("{text}\n"))
        .with_context(|| format!("unable to write config {}", path.display()))?;
    Ok(())
}

#[derive(Debug, Deserialize)]
struct WatchConfigFile {
    version: u32,
    #[serde(default = "default_use_24h")]
    use_24h: bool,
    #[serde(default)]
    clocks: Vec<String>,
}

fn default_use_24h() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_config() {
        let json = r#"
{
  "version": 1,
  "use_24h": false,
  "clocks": ["GMT+5", "GMT-3"]
}
"#;
        let config = parse_watch_config_text(json).expect("valid config");
        assert_eq!(config.version, 1);
        assert!(!config.use_24h);
        assert_eq!(config.clocks, vec!["GMT+5", "GMT-3"]);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config = parse_watch_config_text(r#"{ "version": 1 }"#).expect("valid config");
        assert!(config.use_24h);
        assert!(config.clocks.is_empty());
    }

    #[test]
    fn rejects_unsupported_version() {
        let err = parse_watch_config_text(r#"{ "version": 2 }"#)
            .expect_err("version 2 should fail");
        assert!(err.to_string().contains("unsupported watch config version"));
    }

    #[test]
    fn accepts_huge_offset_digit_runs() {
        let json = r#"{ "version": 1, "clocks": ["GMT+2147483647"] }"#;
        let config = parse_watch_config_text(json).expect("valid config");
        assert_eq!(config.clocks, vec!["GMT+2147483647"]);
    }

    #[test]
    fn rejects_invalid_offset_spec() {
        let json = r#"{ "version": 1, "clocks": ["GMT+5", "Tokyo"] }"#;
        let err = parse_watch_config_text(json).expect_err("bad offset should fail");
        assert!(err.to_string().contains("invalid timezone offset 'Tokyo'"));
    }

    #[test]
    fn reports_json_errors_with_position() {
        let err = parse_watch_config_text("{ not-valid-json ").expect_err("invalid json");
        assert!(err.to_string().contains("invalid JSON at line"));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let config = load_watch_config(&dir.path().join("absent.json")).expect("defaults");
        assert!(config.use_24h);
        assert!(config.clocks.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("watch.json");
        let config = WatchConfig {
            version: 1,
            use_24h: false,
            clocks: vec!["GMT+9".to_string()],
        };
        save_watch_config(&path, &config).expect("save");
        let loaded = load_watch_config(&path).expect("load");
        assert!(!loaded.use_24h);
        assert_eq!(loaded.clocks, vec!["GMT+9"]);
    }
}
