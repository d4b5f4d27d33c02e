//! 원격 JSON 응답 스키마 검증
//!
//! 서비스의 필드 이름과 타입을 그대로 믿지 않고, 필수 필드 존재 여부와
//! 숫자 범위를 확인한 뒤에만 타입이 지정된 페이로드로 변환합니다.

use serde_json::{Map, Value};

use crate::constants::{GLOBAL_PATH, STATS_PATH};
use crate::types::{DashboardError, DashboardResult, GlobalPayload, StatsPayload};

/// Validate a `/api/stats` body
pub fn validate_stats(body: &Value) -> DashboardResult<StatsPayload> {
    let object = require_object(body, STATS_PATH)?;

    Ok(StatsPayload {
        blocks: require_count(object, STATS_PATH, "blocks")?,
        wallets: require_count(object, STATS_PATH, "wallets")?,
        nft_minted: require_count(object, STATS_PATH, "nft_minted")?,
        bnb_price: require_amount(object, STATS_PATH, "bnb_price")?,
    })
}

/// Validate a `/api/global` body
pub fn validate_global(body: &Value) -> DashboardResult<GlobalPayload> {
    let object = require_object(body, GLOBAL_PATH)?;

    Ok(GlobalPayload {
        total_protected_usd: require_amount(object, GLOBAL_PATH, "total_protected_usd")?,
    })
}

fn require_object<'a>(body: &'a Value, endpoint: &str) -> DashboardResult<&'a Map<String, Value>> {
    body.as_object().ok_or_else(|| DashboardError::Decode {
        endpoint: endpoint.to_string(),
        message: "expected a JSON object".to_string(),
    })
}

fn require_number(object: &Map<String, Value>, endpoint: &str, field: &str) -> DashboardResult<f64> {
    let value = object
        .get(field)
        .ok_or_else(|| schema_error(endpoint, field, "is missing"))?;

    let number = value
        .as_f64()
        .ok_or_else(|| schema_error(endpoint, field, "is not a number"))?;

    if !number.is_finite() {
        return Err(schema_error(endpoint, field, "is not finite"));
    }
    if number < 0.0 {
        return Err(schema_error(endpoint, field, "is negative"));
    }
    Ok(number)
}

/// Non-negative integer count; integral floats such as `12450.0` are accepted
fn require_count(object: &Map<String, Value>, endpoint: &str, field: &str) -> DashboardResult<u64> {
    if let Some(count) = object.get(field).and_then(Value::as_u64) {
        return Ok(count);
    }

    let number = require_number(object, endpoint, field)?;
    if number.fract() != 0.0 {
        return Err(schema_error(endpoint, field, "is not an integer"));
    }
    if number > u64::MAX as f64 {
        return Err(schema_error(endpoint, field, "is out of range"));
    }
    Ok(number as u64)
}

fn require_amount(object: &Map<String, Value>, endpoint: &str, field: &str) -> DashboardResult<f64> {
    require_number(object, endpoint, field)
}

fn schema_error(endpoint: &str, field: &str, reason: &str) -> DashboardError {
    DashboardError::Schema {
        endpoint: endpoint.to_string(),
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
