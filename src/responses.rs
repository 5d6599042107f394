//! Response envelope
//!
//! Every answer to a pricing request is wrapped the same way: a success flag, a numeric status
//! code, a message and, on success, the priced result.

use serde::{Deserialize, Serialize};

use crate::{pricing::PricingError, receipt::DiscountResult, requests::RequestError};

/// Status code of a successful pricing.
pub const CREATED: u16 = 201;

/// Status code of a rejected request.
pub const BAD_REQUEST: u16 = 400;

/// Status code of a failure inside the engine.
pub const INTERNAL_ERROR: u16 = 500;

/// Message carried by an envelope: a single line, or one line per validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EnvelopeMessage {
    /// A single message
    Text(String),

    /// Validation messages
    List(Vec<String>),
}

/// Wire envelope around a pricing outcome.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope {
    /// Whether the request was priced
    pub status: bool,

    /// HTTP-style status code
    pub status_code: u16,

    /// Empty on success
    pub message: EnvelopeMessage,

    /// Present only on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<DiscountResult>,
}

impl Envelope {
    /// Wrap a successful result.
    pub fn success(result: DiscountResult) -> Self {
        Self {
            status: true,
            status_code: CREATED,
            message: EnvelopeMessage::Text(String::new()),
            data: Some(result),
        }
    }

    /// Wrap a request failure.
    pub fn failure(err: &RequestError) -> Self {
        let (status_code, message) = match err {
            RequestError::Validation(failure) => {
                (BAD_REQUEST, EnvelopeMessage::List(failure.messages.clone()))
            }
            RequestError::Json(err) => (BAD_REQUEST, EnvelopeMessage::List(vec![err.to_string()])),
            RequestError::Pricing(err @ PricingError::InvalidRequest) => {
                (BAD_REQUEST, EnvelopeMessage::Text(err.to_string()))
            }
            RequestError::Pricing(err @ PricingError::Overflow(_)) => {
                (INTERNAL_ERROR, EnvelopeMessage::Text(err.to_string()))
            }
        };

        Self {
            status: false,
            status_code,
            message,
            data: None,
        }
    }

    /// Whether this envelope carries a result.
    pub fn is_success(&self) -> bool {
        self.status
    }
}

impl From<Result<DiscountResult, RequestError>> for Envelope {
    fn from(outcome: Result<DiscountResult, RequestError>) -> Self {
        match outcome {
            Ok(result) => Self::success(result),
            Err(err) => Self::failure(&err),
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use smallvec::SmallVec;
    use testresult::TestResult;

    use crate::requests::ValidationFailure;

    use super::*;

    #[test]
    fn success_carries_data_and_an_empty_message() -> TestResult {
        let result = DiscountResult::new(Decimal::from(600), SmallVec::new())?;
        let value = serde_json::to_value(Envelope::success(result))?;

        assert_eq!(value.get("status"), Some(&json!(true)));
        assert_eq!(value.get("statusCode"), Some(&json!(201)));
        assert_eq!(value.get("message"), Some(&json!("")));
        assert_eq!(
            value.pointer("/data/finalPrice"),
            Some(&json!(600.0))
        );

        Ok(())
    }

    #[test]
    fn validation_failure_lists_every_message() -> TestResult {
        let err = RequestError::from(ValidationFailure {
            messages: vec!["a".to_string(), "b".to_string()],
        });

        let value = serde_json::to_value(Envelope::failure(&err))?;

        assert_eq!(value.get("statusCode"), Some(&json!(400)));
        assert_eq!(value.get("message"), Some(&json!(["a", "b"])));
        assert_eq!(value.get("data"), None::<&Value>);

        Ok(())
    }

    #[test]
    fn empty_cart_is_a_bad_request() {
        let envelope = Envelope::from(Err::<DiscountResult, _>(RequestError::Pricing(
            PricingError::InvalidRequest,
        )));

        assert_eq!(envelope.status_code, BAD_REQUEST);
        assert_eq!(
            envelope.message,
            EnvelopeMessage::Text("No items in the cart".to_string())
        );
        assert!(!envelope.is_success());
    }

    #[test]
    fn overflow_is_an_internal_error() {
        let envelope = Envelope::failure(&RequestError::Pricing(PricingError::Overflow(
            "summing line totals",
        )));

        assert_eq!(envelope.status_code, INTERNAL_ERROR);
        assert!(!envelope.status);
    }
}
