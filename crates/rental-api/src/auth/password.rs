//! 비밀번호 해싱 유틸리티.
//!
//! Argon2id 기반 비밀번호 해싱 및 검증.

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as _, PasswordVerifier, SaltString,
    },
    Algorithm, Argon2, Params, Version,
};
use rental_core::PasswordConfig;
#[cfg(test)]
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

/// 존재하지 않는 계정의 로그인에서 검증 대상으로 쓰는 평문.
const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-accounts";

/// 비밀번호 처리 에러.
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("비밀번호 해싱 실패")]
    HashingFailed,
    #[error("잘못된 해싱 파라미터: {0}")]
    InvalidParams(String),
}

/// 비밀번호 해셔.
///
/// 비용 파라미터는 설정에서 읽어 옵니다. 검증은 해시 문자열에 포함된
/// 파라미터를 사용하므로, 비용을 바꿔도 기존 해시는 계속 검증됩니다.
///
/// 생성 시 같은 비용으로 더미 해시를 하나 만들어 둡니다. 존재하지 않는
/// 계정의 로그인도 이 해시로 검증하여 응답 시간이 같아지게 합니다.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: Params,
    dummy_hash: String,
    #[cfg(test)]
    verify_calls: Arc<AtomicUsize>,
}

impl PasswordHasher {
    /// 설정으로 해셔 생성.
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| PasswordError::InvalidParams(e.to_string()))?;

        let mut hasher = Self {
            params,
            dummy_hash: String::new(),
            #[cfg(test)]
            verify_calls: Arc::new(AtomicUsize::new(0)),
        };
        hasher.dummy_hash = hasher.hash(DUMMY_PASSWORD)?;

        Ok(hasher)
    }

    /// 설정된 비용으로 만든 더미 해시.
    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// 비밀번호 해싱.
    ///
    /// 호출마다 새 솔트를 생성합니다.
    ///
    /// # Returns
    ///
    /// PHC 형식의 해시 문자열 (솔트 및 비용 포함)
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let hash = hasher.hash("my_secure_password")?;
    /// // "$argon2id$v=19$m=19456,t=2,p=1$..."
    /// ```
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let salt = SaltString::generate(&mut OsRng);

        let hash = self
            .argon2()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|_| PasswordError::HashingFailed)?;

        Ok(hash.to_string())
    }

    /// 비밀번호 검증.
    ///
    /// 해시 형식이 잘못되었거나 일치하지 않으면 `false`를 반환합니다.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        #[cfg(test)]
        self.verify_calls.fetch_add(1, Ordering::SeqCst);

        let Ok(parsed_hash) = PasswordHash::new(hash) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// 블로킹 스레드 풀에서 해싱.
    pub async fn hash_blocking(&self, password: String) -> Result<String, PasswordError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|_| PasswordError::HashingFailed)?
    }

    /// 블로킹 스레드 풀에서 검증.
    pub async fn verify_blocking(&self, password: String, hash: String) -> bool {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .unwrap_or(false)
    }

    /// 존재하지 않는 계정에 대해 실제 검증과 같은 비용을 치릅니다.
    ///
    /// 결과는 항상 `false`입니다.
    pub async fn verify_dummy_blocking(&self, password: String) -> bool {
        let dummy = self.dummy_hash.clone();
        self.verify_blocking(password, dummy).await;
        false
    }

    #[cfg(test)]
    pub(crate) fn verify_calls(&self) -> usize {
        self.verify_calls.load(Ordering::SeqCst)
    }
}
