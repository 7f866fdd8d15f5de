//! 필드 단위 유효성 검사 함수.
//!
//! `validator` derive의 `custom(function = ...)`에서 사용됩니다.

use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use validator::{ValidationError, ValidationErrors};

/// 방글라데시 휴대폰 번호 형식 (`+88`/`88`/`0088` 국가번호 선택).
static PHONE_NUMBER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\+?88|0088)?0[0-9]{10}$").expect("phone number regex must compile")
});

/// 공백만 있는 문자열을 거부합니다.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("값이 비어 있습니다".into()));
    }
    Ok(())
}

/// 연락처 번호 형식을 검사합니다.
pub fn validate_phone_number(value: &str) -> Result<(), ValidationError> {
    if !PHONE_NUMBER_REGEX.is_match(value) {
        return Err(ValidationError::new("invalid_phone_number")
            .with_message(format!("{} is not a valid phone number!", value).into()));
    }
    Ok(())
}

/// 음수 금액을 거부합니다.
pub fn validate_non_negative(value: &Decimal) -> Result<(), ValidationError> {
    if *value < Decimal::ZERO {
        return Err(ValidationError::new("negative_amount")
            .with_message("금액은 0 이상이어야 합니다".into()));
    }
    Ok(())
}

/// `ValidationErrors`를 한 줄 메시지로 합칩니다.
///
/// 필드 순서는 정렬되어 항상 같은 메시지를 만듭니다.
pub fn validation_message(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| "유효하지 않은 값".to_string());
                format!("{}: {}", field, reason)
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}
