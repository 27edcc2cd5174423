//! Coach settings from `{data_dir}/config.toml`.
//!
//! Every setting has a built-in value, so the file is optional. A file that
//! cannot be read or parsed is reported and ignored rather than fatal; the
//! `FITCOACH_MODEL` override is applied last.

use std::path::Path;

use fitcoach_types::config::CoachConfig;

/// Environment variable that overrides the configured model id.
pub const MODEL_ENV_VAR: &str = "FITCOACH_MODEL";

const CONFIG_FILE: &str = "config.toml";

/// Build the effective settings for one run.
///
/// `model_override` is the value of [`MODEL_ENV_VAR`], if set. It wins over
/// the file unless blank.
pub async fn load_coach_config(data_dir: &Path, model_override: Option<String>) -> CoachConfig {
    let path = data_dir.join(CONFIG_FILE);

    let mut config = match read_config_file(&path).await {
        Ok(Some(config)) => {
            tracing::debug!(path = %path.display(), "Coach settings loaded");
            config
        }
        Ok(None) => {
            tracing::debug!(path = %path.display(), "No settings file, built-in settings apply");
            CoachConfig::default()
        }
        Err(reason) => {
            tracing::warn!(path = %path.display(), %reason, "Ignoring settings file, built-in settings apply");
            CoachConfig::default()
        }
    };

    apply_model_override(&mut config, model_override);
    config
}

/// `Ok(None)` when the file does not exist.
async fn read_config_file(path: &Path) -> Result<Option<CoachConfig>, String> {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(format!("unreadable: {err}")),
    };

    toml::from_str(&content)
        .map(Some)
        .map_err(|err| format!("invalid settings: {err}"))
}

fn apply_model_override(config: &mut CoachConfig, model: Option<String>) {
    if let Some(model) = model.map(|m| m.trim().to_string()).filter(|m| !m.is_empty()) {
        tracing::debug!(model = %model, "Model overridden from environment");
        config.model = model;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_coach_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_coach_config(tmp.path(), None).await;
        assert_eq!(config, CoachConfig::default());
    }

    #[tokio::test]
    async fn load_coach_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join("config.toml"),
            r#"
model = "gemini-1.5-pro"
api_key_env = "MY_GEMINI_KEY"
request_timeout_secs = 30

[generation]
temperature = 0.4
"#,
        )
        .await
        .unwrap();

        let config = load_coach_config(tmp.path(), None).await;
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.api_key_env, "MY_GEMINI_KEY");
        assert_eq!(config.request_timeout_secs, 30);
        assert!((config.generation.temperature - 0.4).abs() < f64::EPSILON);
        assert_eq!(config.generation.max_output_tokens, 8192);
    }

    #[tokio::test]
    async fn load_coach_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "this is not { valid toml !!!")
            .await
            .unwrap();

        let config = load_coach_config(tmp.path(), None).await;
        assert_eq!(config, CoachConfig::default());
    }

    #[tokio::test]
    async fn load_coach_config_wrong_types_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "request_timeout_secs = \"soon\"")
            .await
            .unwrap();

        let config = load_coach_config(tmp.path(), None).await;
        assert_eq!(config.request_timeout_secs, 120);
    }

    #[tokio::test]
    async fn load_coach_config_unreadable_path_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::create_dir(tmp.path().join("config.toml")).await.unwrap();

        let config = load_coach_config(tmp.path(), None).await;
        assert_eq!(config, CoachConfig::default());
    }

    #[tokio::test]
    async fn load_coach_config_override_wins_over_file() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join("config.toml"), "model = \"gemini-1.5-pro\"\nrequest_timeout_secs = 30")
            .await
            .unwrap();

        let config = load_coach_config(tmp.path(), Some("gemini-2.5-pro".to_string())).await;
        assert_eq!(config.model, "gemini-2.5-pro");
        assert_eq!(config.request_timeout_secs, 30);
    }

    #[tokio::test]
    async fn read_config_file_distinguishes_absent_from_invalid() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        assert_eq!(read_config_file(&path).await, Ok(None));

        tokio::fs::write(&path, "model = [").await.unwrap();
        let reason = read_config_file(&path).await.unwrap_err();
        assert!(reason.starts_with("invalid settings"));
    }

    #[test]
    fn apply_model_override_replaces_model() {
        let mut config = CoachConfig::default();
        apply_model_override(&mut config, Some("gemini-2.5-pro".to_string()));
        assert_eq!(config.model, "gemini-2.5-pro");
    }

    #[test]
    fn apply_model_override_ignores_blank_or_missing() {
        let mut config = CoachConfig::default();
        apply_model_override(&mut config, None);
        apply_model_override(&mut config, Some("   ".to_string()));
        assert_eq!(config.model, "gemini-2.5-flash");
    }
}
