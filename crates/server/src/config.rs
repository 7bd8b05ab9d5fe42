use std::{collections::HashMap, fs};

#[derive(Debug, Clone)]
pub struct Settings {
    pub server_bind: String,
    /// Enables the test-only shutdown route.
    pub testing: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_bind: "127.0.0.1:5005".into(),
            testing: false,
        }
    }
}

/// Defaults, overridden by `roster.toml`, overridden by environment.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("roster.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("bind_addr") {
                settings.server_bind = v.clone();
            }
            if let Some(v) = file_cfg.get("testing") {
                settings.testing = parse_bool(v);
            }
        }
    }

    if let Ok(v) = std::env::var("SERVER_BIND") {
        settings.server_bind = v;
    }
    if let Ok(v) = std::env::var("APP__BIND_ADDR") {
        settings.server_bind = v;
    }

    if let Ok(v) = std::env::var("APP__TESTING") {
        settings.testing = parse_bool(&v);
    }

    settings
}

fn parse_bool(raw: &str) -> bool {
    matches!(raw.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_bind_locally_without_testing() {
        let settings = Settings::default();
        assert_eq!(settings.server_bind, "127.0.0.1:5005");
        assert!(!settings.testing);
    }

    #[test]
    fn parses_truthy_flag_spellings() {
        assert!(parse_bool("1"));
        assert!(parse_bool("true"));
        assert!(parse_bool(" TRUE "));
        assert!(parse_bool("yes"));
        assert!(!parse_bool("0"));
        assert!(!parse_bool("false"));
        assert!(!parse_bool(""));
    }
}
