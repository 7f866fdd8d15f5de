//! 설정 관리.
//!
//! 기본값, 설정 파일, 환경 변수 순으로 설정을 병합합니다.
//! 데이터베이스 URL과 JWT 비밀 키는 필수이며, 없으면 부팅에 실패합니다.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// JWT 비밀 키 최소 길이 (바이트).
pub const MIN_JWT_SECRET_LEN: usize = 32;

/// 토큰 만료 시간 상한 (분, 1년).
pub const MAX_TOKEN_EXPIRY_MINUTES: i64 = 60 * 24 * 365;

/// 환경 변수 접두사 (예: `RENTAL__JWT__SECRET`).
pub const ENV_PREFIX: &str = "RENTAL";

/// 설정 에러.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("설정 로드 실패: {0}")]
    Load(#[from] config::ConfigError),
    #[error("필수 설정 누락: {0}")]
    Missing(&'static str),
    #[error("JWT 비밀 키는 최소 {MIN_JWT_SECRET_LEN}바이트여야 합니다")]
    WeakSecret,
    #[error("잘못된 설정 값: {0}")]
    Invalid(&'static str),
}

/// 애플리케이션 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// 서버 설정
    #[serde(default)]
    pub server: ServerConfig,
    /// 데이터베이스 설정
    #[serde(default)]
    pub database: DatabaseConfig,
    /// JWT 설정
    #[serde(default)]
    pub jwt: JwtConfig,
    /// 비밀번호 해싱 설정
    #[serde(default)]
    pub password: PasswordConfig,
    /// 로깅 설정
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 서버 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// 바인딩할 호스트
    pub host: String,
    /// 리스닝할 포트
    pub port: u16,
    /// 허용 CORS origin 목록 (비어 있으면 모든 origin 허용)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            cors_origins: Vec::new(),
        }
    }
}

/// 데이터베이스 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// PostgreSQL 연결 문자열
    pub url: Option<String>,
    /// 최대 연결 수
    pub max_connections: u32,
    /// 연결 획득 타임아웃 (초)
    pub acquire_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: 10,
            acquire_timeout_secs: 10,
        }
    }
}

/// JWT 설정.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct JwtConfig {
    /// 서명 비밀 키
    #[serde(default)]
    pub secret: Option<String>,
    /// 토큰 만료 시간 (분). 없으면 만료되지 않는 토큰을 발급합니다.
    #[serde(default)]
    pub expires_in_minutes: Option<i64>,
}

/// Argon2 비밀번호 해싱 비용 설정.
///
/// 기본값은 argon2 크레이트 기본값(m=19456 KiB, t=2, p=1)과 같습니다.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct PasswordConfig {
    /// 메모리 비용 (KiB)
    pub memory_kib: u32,
    /// 반복 횟수
    pub iterations: u32,
    /// 병렬도
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// 로깅 설정.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 로그 레벨
    pub level: String,
    /// 로그 형식 (pretty, json, compact)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "rental_api=info,tower_http=debug".to_string(),
            format: "pretty".to_string(),
        }
    }
}

impl AppConfig {
    /// 파일과 환경 변수에서 설정을 로드합니다.
    ///
    /// 파일이 없어도 에러가 아닙니다. 환경 변수가 파일 값을 덮어씁니다.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let builder = config::Config::builder()
            // 기본값으로 시작
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 5000)?
            // 파일에서 로드
            .add_source(config::File::from(path.as_ref()).required(false))
            // 환경 변수로 오버라이드
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("server.cors_origins")
                    .try_parsing(true),
            );

        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// 기본 경로에서 설정을 로드합니다.
    pub fn load_default() -> Result<Self, ConfigError> {
        Self::load("config/default.toml")
    }

    /// 필수 값을 검증합니다.
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.database.url.as_deref() {
            Some(url) if !url.trim().is_empty() => {}
            _ => return Err(ConfigError::Missing("database.url")),
        }

        let secret = self
            .jwt
            .secret
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("jwt.secret"))?;
        if secret.len() < MIN_JWT_SECRET_LEN {
            return Err(ConfigError::WeakSecret);
        }

        // 1분 이상, 상한 이하
        if let Some(minutes) = self.jwt.expires_in_minutes {
            if !(1..=MAX_TOKEN_EXPIRY_MINUTES).contains(&minutes) {
                return Err(ConfigError::Invalid("jwt.expires_in_minutes"));
            }
        }

        Ok(())
    }

    /// 검증된 데이터베이스 URL.
    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database
            .url
            .as_deref()
            .ok_or(ConfigError::Missing("database.url"))
    }

    /// 검증된 JWT 비밀 키.
    pub fn jwt_secret(&self) -> Result<&str, ConfigError> {
        self.jwt
            .secret
            .as_deref()
            .ok_or(ConfigError::Missing("jwt.secret"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        let mut config = AppConfig::default();
        config.database.url = Some("postgres://localhost/rental".to_string());
        config.jwt.secret = Some("a".repeat(MIN_JWT_SECRET_LEN));
        config
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert!(config.server.cors_origins.is_empty());
        assert!(config.jwt.expires_in_minutes.is_none());
        assert_eq!(config.password, PasswordConfig::default());
    }

    #[test]
    fn test_validate_ok() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn test_missing_database_url() {
        let mut config = valid_config();
        config.database.url = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("database.url"))
        ));

        config.database.url = Some("   ".to_string());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_secret() {
        let mut config = valid_config();
        config.jwt.secret = None;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Missing("jwt.secret"))
        ));
    }

    #[test]
    fn test_short_secret_rejected() {
        let mut config = valid_config();
        config.jwt.secret = Some("secret-key".to_string());
        assert!(matches!(config.validate(), Err(ConfigError::WeakSecret)));
    }

    #[test]
    fn test_token_expiry_bounds() {
        let mut config = valid_config();

        for minutes in [0, -5] {
            config.jwt.expires_in_minutes = Some(minutes);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::Invalid("jwt.expires_in_minutes"))
            ));
        }

        config.jwt.expires_in_minutes = Some(i64::MAX / 2);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Invalid("jwt.expires_in_minutes"))
        ));

        config.jwt.expires_in_minutes = Some(MAX_TOKEN_EXPIRY_MINUTES);
        assert!(config.validate().is_ok());
        config.jwt.expires_in_minutes = Some(60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_without_required_values_fails() {
        // 존재하지 않는 파일 + 환경 변수 없음
        let result = AppConfig::load("config/does-not-exist.toml");
        if std::env::var("RENTAL__DATABASE__URL").is_err() {
            assert!(result.is_err());
        }
    }
}
