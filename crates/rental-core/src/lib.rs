//! # Rental Core
//!
//! 주택 임대 서비스의 핵심 도메인 모델 및 설정을 제공합니다.
//!
//! 이 크레이트는 API 서버 전반에서 사용되는 기본 타입을 제공합니다:
//! - 사용자 및 주택 도메인 모델
//! - 필드 단위 유효성 검사
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use logging::*;
