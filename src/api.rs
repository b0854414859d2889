//! Calculation request boundary
//!
//! JSON request/response shapes for the max level calculation and the
//! mapping from engine errors to client or internal error replies. Carries
//! no transport of its own; an HTTP handler or the CLI feeds it bodies.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{CalcError, ValidationError};
use crate::items::{Inventory, JellyValues, NominalLevel, UpgradeTier};
use crate::progression::{CalculationResult, ProgressionCalculator};

/// `{ "jellies": { "Lv.1": 10, ... }, "jelly_upgrade": 2 }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcRequest {
    pub jellies: BTreeMap<String, i64>,
    pub jelly_upgrade: i64,
}

impl CalcRequest {
    /// Turn "Lv.N" labels into inventory keys. Only label syntax is checked
    /// here; range and quantity checks belong to the calculator.
    pub fn to_inventory(&self) -> Result<Inventory, ValidationError> {
        self.jellies
            .iter()
            .map(|(label, &qty)| {
                NominalLevel::parse_label(label)
                    .map(|level| (level, qty))
                    .ok_or_else(|| ValidationError::UnknownJellyLabel { label: label.clone() })
            })
            .collect()
    }
}

/// Successful calculation reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalcResponse {
    pub max_level: u32,
    pub jelly_total_exp: u64,
    pub remainder: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp_to_next_level: Option<u64>,
}

impl From<&CalculationResult> for CalcResponse {
    fn from(result: &CalculationResult) -> Self {
        Self {
            max_level: result.achieved_level.get(),
            jelly_total_exp: result.total_experience,
            remainder: result.remainder,
            exp_to_next_level: result.experience_to_next_level,
        }
    }
}

/// Error reply body
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl From<&CalcError> for ErrorResponse {
    fn from(err: &CalcError) -> Self {
        match err {
            CalcError::Validation(e) => Self { error: e.to_string(), field: Some(e.field()) },
            CalcError::Domain(_) => Self { error: err.to_string(), field: None },
        }
    }
}

/// Status code plus JSON body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

impl Reply {
    fn json<T: Serialize>(status: u16, value: &T) -> Self {
        match serde_json::to_string(value) {
            Ok(body) => Self { status, body },
            Err(e) => {
                log::error!("Failed to encode reply: {}", e);
                Self { status: 500, body: r#"{"error":"failed to encode reply"}"#.to_string() }
            }
        }
    }

    fn error(status: u16, error: impl Into<String>) -> Self {
        Self::json(status, &ErrorResponse { error: error.into(), field: None })
    }
}

/// Run a typed request through the calculator.
///
/// The tier is checked before the labels so that error precedence matches
/// the calculator's own: tier, then keys, then quantities.
pub fn handle_calc<V: JellyValues>(
    calc: &ProgressionCalculator<V>,
    request: &CalcRequest,
) -> Result<CalcResponse, CalcError> {
    UpgradeTier::new(request.jelly_upgrade)?;
    let inventory = request.to_inventory()?;
    let result = calc.calculate_max_level(&inventory, request.jelly_upgrade)?;
    Ok(CalcResponse::from(&result))
}

/// Run a raw JSON body through the calculator.
///
/// 200 on success, 400 for malformed bodies or invalid input, 500 for
/// internal faults.
pub fn handle_json<V: JellyValues>(calc: &ProgressionCalculator<V>, body: &str) -> Reply {
    let request: CalcRequest = match serde_json::from_str(body) {
        Ok(request) => request,
        Err(e) => {
            log::warn!("Rejected calculation request: {}", e);
            return Reply::error(400, format!("Missing or invalid jelly data: {}", e));
        }
    };

    match handle_calc(calc, &request) {
        Ok(response) => Reply::json(200, &response),
        Err(err) => {
            let status = if err.is_client_error() { 400 } else { 500 };
            if status == 500 {
                log::error!("Calculation failed: {}", err);
            } else {
                log::warn!("Rejected calculation request: {}", err);
            }
            Reply::json(status, &ErrorResponse::from(&err))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BalanceData;
    use crate::error::DomainError;

    fn calc() -> ProgressionCalculator {
        BalanceData::builtin().unwrap().into_calculator()
    }

    fn request(jellies: &[(&str, i64)], tier: i64) -> CalcRequest {
        CalcRequest {
            jellies: jellies.iter().map(|(l, q)| (l.to_string(), *q)).collect(),
            jelly_upgrade: tier,
        }
    }

    #[test]
    fn test_labels_to_inventory() {
        let inventory = request(&[("Lv.1", 3), ("Lv.8", 2)], 0).to_inventory().unwrap();
        assert_eq!(inventory.quantity(1), 3);
        assert_eq!(inventory.quantity(8), 2);

        let err = request(&[("Lv.x", 1)], 0).to_inventory().unwrap_err();
        assert_eq!(err, ValidationError::UnknownJellyLabel { label: "Lv.x".into() });
    }

    #[test]
    fn test_handle_calc() {
        let response = handle_calc(&calc(), &request(&[("Lv.1", 5)], 0)).unwrap();
        assert_eq!(
            response,
            CalcResponse { max_level: 2, jelly_total_exp: 70, remainder: 10, exp_to_next_level: Some(70) }
        );
    }

    #[test]
    fn test_tier_checked_before_labels() {
        let err = handle_calc(&calc(), &request(&[("bogus", 1)], 9)).unwrap_err();
        assert_eq!(err, ValidationError::TierOutOfRange { tier: 9 }.into());
    }

    #[test]
    fn test_out_of_range_label_reported_by_engine() {
        let err = handle_calc(&calc(), &request(&[("Lv.9", 1)], 0)).unwrap_err();
        assert_eq!(err, ValidationError::UnknownNominalLevel { level: 9 }.into());
    }

    #[test]
    fn test_json_success() {
        let reply = handle_json(&calc(), r#"{"jellies": {"Lv.8": 1}, "jelly_upgrade": 5}"#);
        assert_eq!(reply.status, 200);
        let response: CalcResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(response.jelly_total_exp, 8800);
        assert_eq!(response.max_level, 18);
        assert_eq!(response.remainder, 8800 - 7960);
    }

    #[test]
    fn test_json_capped_omits_next_level() {
        let reply = handle_json(&calc(), r#"{"jellies": {"Lv.8": 5000}, "jelly_upgrade": 0}"#);
        assert_eq!(reply.status, 200);
        let value: serde_json::Value = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(value["max_level"], 90);
        assert!(value.get("exp_to_next_level").is_none());
    }

    #[test]
    fn test_json_malformed_is_400() {
        for body in [
            "",
            "{",
            r#"{"jellies": {}}"#,
            r#"{"jelly_upgrade": 0}"#,
            r#"{"jellies": {"Lv.1": "ten"}, "jelly_upgrade": 0}"#,
        ] {
            let reply = handle_json(&calc(), body);
            assert_eq!(reply.status, 400, "body {:?}", body);
        }
    }

    #[test]
    fn test_json_missing_jellies_is_rejected() {
        let reply = handle_json(&calc(), r#"{"jelly_upgrade": 0}"#);
        assert_eq!(reply.status, 400);
        let error: ErrorResponse = serde_json::from_str(&reply.body).unwrap();
        assert!(error.error.starts_with("Missing or invalid jelly data"), "{}", error.error);
        assert!(error.error.contains("jellies"), "{}", error.error);
    }

    #[test]
    fn test_json_empty_jellies_is_level_one() {
        let reply = handle_json(&calc(), r#"{"jellies": {}, "jelly_upgrade": 1}"#);
        assert_eq!(reply.status, 200);
        let response: CalcResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(response.max_level, 1);
    }

    #[test]
    fn test_json_validation_names_field() {
        let reply = handle_json(&calc(), r#"{"jellies": {"Lv.1": -1}, "jelly_upgrade": 0}"#);
        assert_eq!(reply.status, 400);
        let error: ErrorResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(error.field.as_deref(), Some("jellies.Lv.1"));

        let reply = handle_json(&calc(), r#"{"jellies": {}, "jelly_upgrade": 6}"#);
        let error: ErrorResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(error.field.as_deref(), Some("jelly_upgrade"));
    }

    struct BrokenValues;

    impl JellyValues for BrokenValues {
        fn value_per_unit(&self, level: NominalLevel, tier: UpgradeTier) -> Result<u64, DomainError> {
            Err(DomainError { level: level.get(), tier: tier.get() })
        }
    }

    #[test]
    fn test_domain_error_is_500() {
        let calc = ProgressionCalculator::new(BalanceData::builtin().unwrap().curve, BrokenValues);
        let reply = handle_json(&calc, r#"{"jellies": {"Lv.2": 1}, "jelly_upgrade": 0}"#);
        assert_eq!(reply.status, 500);
        let error: ErrorResponse = serde_json::from_str(&reply.body).unwrap();
        assert_eq!(error.field, None);
    }
}
