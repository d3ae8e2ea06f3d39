use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{ProfitabilitySettings, SettingsError, Timeline};

/// 기본 설정 파일 경로.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// auto | ko | en
    pub language: String,
    /// 배치/사이트 JSON 파일 경로
    pub portfolio_path: PathBuf,
    pub timeline: Timeline,
    pub settings: ProfitabilitySettings,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            portfolio_path: PathBuf::from("portfolio.json"),
            timeline: Timeline::default(),
            settings: ProfitabilitySettings::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    #[error("설정 파싱 오류: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("수익성 설정 오류: {0}")]
    Settings(#[from] SettingsError),
    #[error("타임라인 시작 월은 0~11 이어야 합니다: {0}")]
    StartMonth(u32),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        cfg.validate()?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 로드 직후 값 범위를 점검한다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timeline.start_month > 11 {
            return Err(ConfigError::StartMonth(self.timeline.start_month));
        }
        self.settings.validate()?;
        Ok(())
    }

    /// 포트폴리오 경로. 상대 경로는 설정 파일 위치를 기준으로 푼다.
    pub fn portfolio_path_relative_to(&self, config_path: &Path) -> PathBuf {
        if self.portfolio_path.is_absolute() {
            return self.portfolio_path.clone();
        }
        match config_path.parent() {
            Some(dir) => dir.join(&self.portfolio_path),
            None => self.portfolio_path.clone(),
        }
    }
}
