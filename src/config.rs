use serde::{Deserialize, Serialize};
use std::time::Duration;
use anyhow::Result;

use crate::constants::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    pub request_timeout_ms: u64,
    /// 원격 API 대신 Mock 데이터 소스 사용
    #[serde(default)]
    pub mock_mode: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PollingConfig {
    pub interval_secs: u64,
}

/// Per-metric counter animation durations (milliseconds)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub scans_ms: u64,
    pub wallets_ms: u64,
    pub prevented_ms: u64,
    pub active_ms: u64,
    pub bnb_price_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParticleConfig {
    pub count: usize,
    pub min_speed: f64, // rows per second
    pub max_speed: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    pub frame_rate_fps: u32,
    /// TUI 모드에서 로그를 기록할 파일
    pub log_file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_api")]
    pub api: ApiConfig,
    #[serde(default = "default_polling")]
    pub polling: PollingConfig,
    #[serde(default = "default_animation")]
    pub animation: AnimationConfig,
    #[serde(default = "default_particles")]
    pub particles: ParticleConfig,
    #[serde(default = "default_ui")]
    pub ui: UiConfig,
}

// 기본값 함수들
fn default_api() -> ApiConfig {
    ApiConfig {
        base_url: DEFAULT_API_BASE_URL.to_string(),
        request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
        mock_mode: false,
    }
}

fn default_polling() -> PollingConfig {
    PollingConfig { interval_secs: DEFAULT_POLL_INTERVAL_SECS }
}

fn default_animation() -> AnimationConfig {
    AnimationConfig {
        scans_ms: SCANS_ANIMATION_MS,
        wallets_ms: WALLETS_ANIMATION_MS,
        prevented_ms: PREVENTED_ANIMATION_MS,
        active_ms: ACTIVE_ANIMATION_MS,
        bnb_price_ms: BNB_PRICE_ANIMATION_MS,
    }
}

fn default_particles() -> ParticleConfig {
    ParticleConfig {
        count: DEFAULT_PARTICLE_COUNT,
        min_speed: PARTICLE_MIN_SPEED,
        max_speed: PARTICLE_MAX_SPEED,
    }
}

fn default_ui() -> UiConfig {
    UiConfig {
        frame_rate_fps: DEFAULT_FRAME_RATE_FPS,
        log_file: DEFAULT_LOG_FILE.to_string(),
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: default_api(),
            polling: default_polling(),
            animation: default_animation(),
            particles: default_particles(),
            ui: default_ui(),
        }
    }
}

impl Config {
    pub async fn load(path: &str) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub async fn save(&self, path: &str) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        tokio::fs::write(path, content).await?;
        Ok(())
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.polling.interval_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.api.request_timeout_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_micros(1_000_000 / u64::from(self.ui.frame_rate_fps.max(1)))
    }

    pub fn validate(&self) -> Result<()> {
        // Validate API configuration
        let base_url = self.api.base_url.trim();
        if base_url.is_empty() {
            return Err(anyhow::anyhow!("API base URL cannot be empty"));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(anyhow::anyhow!("API base URL must start with http:// or https://: {}", base_url));
        }
        if self.api.request_timeout_ms == 0 {
            return Err(anyhow::anyhow!("Request timeout must be greater than 0"));
        }

        // Validate polling cadence
        if self.polling.interval_secs < MIN_POLL_INTERVAL_SECS {
            return Err(anyhow::anyhow!(
                "Polling interval must be at least {} second(s)",
                MIN_POLL_INTERVAL_SECS
            ));
        }

        // Validate frame rate
        if self.ui.frame_rate_fps == 0 || self.ui.frame_rate_fps > MAX_FRAME_RATE_FPS {
            return Err(anyhow::anyhow!(
                "Frame rate must be between 1 and {} fps",
                MAX_FRAME_RATE_FPS
            ));
        }

        // Validate particle speeds
        let particles = &self.particles;
        if !(particles.min_speed > 0.0) || !particles.max_speed.is_finite() {
            return Err(anyhow::anyhow!("Particle speeds must be positive and finite"));
        }
        if particles.min_speed > particles.max_speed {
            return Err(anyhow::anyhow!("Particle min_speed cannot exceed max_speed"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
        assert!(!config.api.mock_mode);
        assert_eq!(config.polling.interval_secs, 30);
        assert_eq!(config.poll_interval(), Duration::from_secs(30));

        // 각 지표 애니메이션은 1.8~2.4초 범위
        let animation = &config.animation;
        for ms in [animation.scans_ms, animation.wallets_ms, animation.prevented_ms, animation.active_ms, animation.bnb_price_ms] {
            assert!((1_800..=2_400).contains(&ms));
        }

        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = Config::default();
        config.api.base_url = "".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(config.validate().is_err());

        config = Config::default();
        config.polling.interval_secs = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.ui.frame_rate_fps = 0;
        assert!(config.validate().is_err());

        config = Config::default();
        config.particles.min_speed = 3.0;
        config.particles.max_speed = 1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_frame_interval() {
        let mut config = Config::default();
        config.ui.frame_rate_fps = 20;
        assert_eq!(config.frame_interval(), Duration::from_millis(50));
    }

    #[test]
    fn test_shipped_default_file_matches_defaults() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/default.toml");
        let config = tokio_test::block_on(Config::load(path)).unwrap();
        let defaults = Config::default();

        assert_eq!(config.api.base_url, defaults.api.base_url);
        assert_eq!(config.polling.interval_secs, defaults.polling.interval_secs);
        assert_eq!(config.animation.scans_ms, defaults.animation.scans_ms);
        assert_eq!(config.particles.count, defaults.particles.count);
        assert_eq!(config.ui.frame_rate_fps, defaults.ui.frame_rate_fps);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_load_partial_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://localhost:8787"
request_timeout_ms = 2500

[polling]
interval_secs = 5
"#
        )
        .unwrap();

        let config = Config::load(file.path().to_str().unwrap()).await.unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8787");
        assert_eq!(config.api.request_timeout_ms, 2_500);
        assert_eq!(config.polling.interval_secs, 5);
        // 누락된 섹션은 기본값
        assert_eq!(config.particles.count, DEFAULT_PARTICLE_COUNT);
        assert_eq!(config.ui.log_file, DEFAULT_LOG_FILE);
    }

    #[tokio::test]
    async fn test_config_save_and_reload() {
        let file = NamedTempFile::new().unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let mut config = Config::default();
        config.api.mock_mode = true;
        config.particles.count = 12;
        config.save(&path).await.unwrap();

        let reloaded = Config::load(&path).await.unwrap();
        assert!(reloaded.api.mock_mode);
        assert_eq!(reloaded.particles.count, 12);
        assert_eq!(reloaded.animation.scans_ms, config.animation.scans_ms);
    }

    #[tokio::test]
    async fn test_load_missing_file_fails() {
        assert!(Config::load("/nonexistent/vibeguard.toml").await.is_err());
    }
}
