use std::{fs, path::Path};

use tracing::debug;

use super::{ConfigError, ShellConfig};
use crate::path::PathExpander;

pub struct ConfigLoader<'a> {
    expander: &'a PathExpander,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(expander: &'a PathExpander) -> Self {
        Self { expander }
    }

    pub fn source_if_exists(&self, path: &Path, config: &mut ShellConfig) -> Result<(), ConfigError> {
        if path.exists() {
            self.load_file(path, config)?;
        }
        Ok(())
    }

    pub fn load_file(&self, path: &Path, config: &mut ShellConfig) -> Result<(), ConfigError> {
        let content = fs::read_to_string(path)?;
        self.load_str(&content, config)?;
        debug!(path = %path.display(), "loaded config");
        Ok(())
    }

    fn load_str(&self, content: &str, config: &mut ShellConfig) -> Result<(), ConfigError> {
        for (index, line) in content.lines().enumerate() {
            self.process_line(index + 1, line, config)?;
        }
        Ok(())
    }

    fn process_line(
        &self,
        number: usize,
        line: &str,
        config: &mut ShellConfig,
    ) -> Result<(), ConfigError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        let Some((key, value)) = line.split_once('=') else {
            return Err(ConfigError::InvalidLine {
                line: number,
                content: line.to_string(),
            });
        };
        let key = key.trim();
        let value = unquote(value.trim());
        let invalid = || ConfigError::InvalidValue {
            line: number,
            key: key.to_string(),
            value: value.to_string(),
        };

        match key {
            "history" => config.history = parse_bool(value).ok_or_else(invalid)?,
            "highlight" => config.highlight = parse_bool(value).ok_or_else(invalid)?,
            "history_size" => {
                config.history_size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(invalid)?
            }
            "history_file" => {
                if value.is_empty() {
                    return Err(invalid());
                }
                config.history_file = Some(self.expander.expand(value)?);
            }
            "log_level" => config.log_level = Some(value.to_string()),
            _ => config.unknown_keys.push(key.to_string()),
        }
        Ok(())
    }
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn load(content: &str) -> Result<ShellConfig, ConfigError> {
        let expander = PathExpander::with_home("/home/tester");
        let loader = ConfigLoader::new(&expander);
        let mut config = ShellConfig::default();
        loader.load_str(content, &mut config)?;
        Ok(config)
    }

    #[test]
    fn test_all_keys() {
        let config = load(
            r#"
            history = no
            history_file = "~/.cache/smallsh_history"
            history_size = 250
            highlight = false
            log_level = 'smallsh=trace'
            "#,
        )
        .unwrap();

        assert!(!config.history);
        assert_eq!(
            config.history_file,
            Some(PathBuf::from("/home/tester/.cache/smallsh_history"))
        );
        assert_eq!(config.history_size, 250);
        assert!(!config.highlight);
        assert_eq!(config.log_level.as_deref(), Some("smallsh=trace"));
        assert!(config.unknown_keys.is_empty());
    }

    #[test]
    fn test_comments_and_blank_lines() {
        let config = load("\n# history = false\n   \n").unwrap();
        assert_eq!(config, ShellConfig::default());
    }

    #[test]
    fn test_unknown_keys_are_collected() {
        let config = load("prompt = $\ncolour = on\n").unwrap();
        assert_eq!(config.unknown_keys, ["prompt", "colour"]);
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            load("history = maybe"),
            Err(ConfigError::InvalidValue { line: 1, .. })
        ));
        assert!(matches!(
            load("\nhistory_size = 0"),
            Err(ConfigError::InvalidValue { line: 2, .. })
        ));
        assert!(matches!(
            load("history_size = -3"),
            Err(ConfigError::InvalidValue { .. })
        ));
        assert!(matches!(
            load("history_file ="),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_line_without_equals() {
        let err = load("history").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidLine { line: 1, .. }));
        assert!(err.to_string().contains("key = value"));
    }
}
