use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::domain::error::GatewayError;

/// Unwraps the backend's RPC response envelope: `{"result": ...}` on
/// success, `{"error": {"code", "message"}}` on rejection.
pub fn parse_envelope<T: DeserializeOwned>(value: Value) -> Result<T, GatewayError> {
    if let Some(error) = value.get("error") {
        let code = error.get("code").and_then(|v| v.as_i64()).unwrap_or(0);
        let message = error
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("unspecified backend error")
            .to_string();
        return Err(GatewayError::Rejected { code, message });
    }

    let result = value
        .get("result")
        .cloned()
        .ok_or_else(|| GatewayError::InvalidResponse("missing result field".to_string()))?;

    serde_json::from_value(result).map_err(|e| GatewayError::InvalidResponse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::gateway::models::QuoteDto;
    use serde_json::json;

    #[test]
    fn parses_result_payload() {
        let envelope = json!({
            "id": 7,
            "result": {
                "market": "ICP/ckUSDC",
                "side": "buy",
                "amount_in": 100.0,
                "amount_out": 19.6,
                "effective_tick": -16100,
                "price_impact_pct": 0.12,
                "fees": { "protocol_fee": 0.05, "liquidity_fee": 0.25 },
                "fills": [
                    { "venue": "book", "amount_in": 60.0, "amount_out": 11.8 },
                    { "venue": "pool", "amount_in": 40.0, "amount_out": 7.8 }
                ],
                "quoted_at": "2025-11-02T10:15:00Z"
            }
        });

        let dto: QuoteDto = parse_envelope(envelope).unwrap();
        let quote = dto.into_domain();
        assert_eq!(quote.amount_in, 100.0);
        assert_eq!(quote.fills.len(), 2);
        assert_eq!(quote.fees.total(), 0.3);
    }

    #[test]
    fn maps_error_envelope_to_rejection() {
        let envelope = json!({
            "id": 8,
            "error": { "code": 2001, "message": "insufficient liquidity" }
        });

        let err = parse_envelope::<QuoteDto>(envelope).unwrap_err();
        match err {
            GatewayError::Rejected { code, message } => {
                assert_eq!(code, 2001);
                assert_eq!(message, "insufficient liquidity");
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[test]
    fn missing_result_is_invalid_response() {
        let err = parse_envelope::<QuoteDto>(json!({ "id": 9 })).unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
