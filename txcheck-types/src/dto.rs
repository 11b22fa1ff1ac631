//! The inbound transaction record as delivered by a host.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::domain::{Transaction, amount};
use crate::error::StructuralError;

/// A transaction record whose shape has not been checked yet.
///
/// Every field is optional. [`TransactionRequest::to_transaction`] runs the
/// structural gate and yields a [`Transaction`] or the list of shape errors.
///
/// Deserializing fails on the first malformed field; use
/// [`TransactionRequest::from_value`] to collect every shape error.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(
        default,
        deserialize_with = "numeric_amount",
        skip_serializing_if = "Option::is_none"
    )]
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl TransactionRequest {
    /// Request with every required field set.
    pub fn new(
        amount: Decimal,
        currency: impl Into<String>,
        from_account: impl Into<String>,
        to_account: impl Into<String>,
    ) -> Self {
        Self {
            amount: Some(amount),
            currency: Some(currency.into()),
            from_account: Some(from_account.into()),
            to_account: Some(to_account.into()),
            memo: None,
            id: None,
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Runs the structural gate.
    ///
    /// Required fields are checked in the order amount, fromAccount,
    /// toAccount, currency. Empty strings count as missing.
    pub fn to_transaction(&self) -> Result<Transaction, Vec<StructuralError>> {
        let mut errors = Vec::new();

        if self.amount.is_none() {
            errors.push(StructuralError::MissingField("amount"));
        }
        let from_account = required_text(&self.from_account, "fromAccount", &mut errors);
        let to_account = required_text(&self.to_account, "toAccount", &mut errors);
        let currency = required_text(&self.currency, "currency", &mut errors);

        match (self.amount, from_account, to_account, currency) {
            (Some(amount), Some(from), Some(to), Some(currency)) if errors.is_empty() => {
                Ok(Transaction {
                    amount,
                    currency: currency.to_string(),
                    from_account: from.to_string(),
                    to_account: to.to_string(),
                    memo: self.memo.clone(),
                    id: self.id.clone(),
                })
            }
            _ => Err(errors),
        }
    }

    /// Reads a request out of an arbitrary JSON value.
    ///
    /// Rejects non-objects, non-numeric amounts (including numeric strings)
    /// and non-string text fields. An absent or `null` field is left unset,
    /// so the structural gate later reports it as missing.
    pub fn from_value(value: &Value) -> Result<Self, Vec<StructuralError>> {
        let Value::Object(map) = value else {
            return Err(vec![StructuralError::NotAnObject]);
        };

        let mut errors = Vec::new();
        let amount = match present(map, "amount") {
            None => None,
            Some(raw) => match amount::from_json(raw) {
                Ok(a) => Some(a),
                Err(_) => {
                    errors.push(StructuralError::InvalidAmount);
                    None
                }
            },
        };
        let from_account = text_field(map, "fromAccount", &mut errors);
        let to_account = text_field(map, "toAccount", &mut errors);
        let currency = text_field(map, "currency", &mut errors);
        let memo = text_field(map, "memo", &mut errors);
        let id = text_field(map, "id", &mut errors);

        let request = Self {
            amount,
            currency,
            from_account,
            to_account,
            memo,
            id,
        };

        if errors.is_empty() {
            return Ok(request);
        }

        // Report missing required fields alongside the type errors, skipping
        // the ones that were present but malformed.
        if let Err(missing) = request.to_transaction() {
            for err in missing {
                let StructuralError::MissingField(name) = err else {
                    continue;
                };
                let malformed = match name {
                    "amount" => errors.contains(&StructuralError::InvalidAmount),
                    other => errors.contains(&StructuralError::NotAString(other)),
                };
                if !malformed {
                    errors.push(err);
                }
            }
        }
        Err(errors)
    }
}

fn required_text<'a>(
    field: &'a Option<String>,
    name: &'static str,
    errors: &mut Vec<StructuralError>,
) -> Option<&'a str> {
    match field.as_deref() {
        Some(s) if !s.is_empty() => Some(s),
        _ => {
            errors.push(StructuralError::MissingField(name));
            None
        }
    }
}

/// JSON numbers only; numeric strings are rejected like in `from_value`.
fn numeric_amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Decimal>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(raw) => amount::from_json(&raw)
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

fn present<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

fn text_field(
    map: &Map<String, Value>,
    key: &'static str,
    errors: &mut Vec<StructuralError>,
) -> Option<String> {
    match present(map, key)? {
        Value::String(s) => Some(s.clone()),
        _ => {
            errors.push(StructuralError::NotAString(key));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_complete_request_converts() {
        let tx = TransactionRequest::new(dec!(500), "USD", "A", "B")
            .with_memo("invoice 7")
            .to_transaction()
            .unwrap();

        assert_eq!(tx.amount, dec!(500));
        assert_eq!(tx.from_account, "A");
        assert_eq!(tx.memo.as_deref(), Some("invoice 7"));
    }

    #[test]
    fn test_missing_fields_reported_in_order() {
        let errors = TransactionRequest::default().to_transaction().unwrap_err();
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

        assert_eq!(
            messages,
            vec![
                "Missing required field: amount",
                "Missing required field: fromAccount",
                "Missing required field: toAccount",
                "Missing required field: currency",
            ]
        );
    }

    #[test]
    fn test_empty_string_counts_as_missing() {
        let mut req = TransactionRequest::new(dec!(5), "USD", "A", "B");
        req.to_account = Some(String::new());

        let errors = req.to_transaction().unwrap_err();
        assert_eq!(errors, vec![StructuralError::MissingField("toAccount")]);
    }

    #[test]
    fn test_zero_amount_is_present() {
        let tx = TransactionRequest::new(dec!(0), "USD", "A", "B").to_transaction();
        assert!(tx.is_ok());
    }

    #[test]
    fn test_deserializes_camel_case_request() {
        let req: TransactionRequest = serde_json::from_str(
            r#"{"amount": 250.5, "fromAccount": "A", "toAccount": "B", "currency": "EUR"}"#,
        )
        .unwrap();

        assert_eq!(req.amount, Some(dec!(250.5)));
        assert!(req.memo.is_none());
        assert_eq!(req.to_transaction().unwrap().currency, "EUR");
    }

    #[test]
    fn test_deserialize_leaves_absent_fields_for_the_gate() {
        let req: TransactionRequest =
            serde_json::from_str(r#"{"fromAccount": "A", "amount": null}"#).unwrap();

        assert_eq!(req.amount, None);
        assert_eq!(
            req.to_transaction().unwrap_err(),
            vec![
                StructuralError::MissingField("amount"),
                StructuralError::MissingField("toAccount"),
                StructuralError::MissingField("currency"),
            ]
        );
    }

    #[test]
    fn test_deserialize_rejects_textual_amount() {
        let result = serde_json::from_str::<TransactionRequest>(
            r#"{"amount": "9", "fromAccount": "A", "toAccount": "B", "currency": "USD"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert_eq!(
            TransactionRequest::from_value(&json!(null)).unwrap_err(),
            vec![StructuralError::NotAnObject]
        );
        assert_eq!(
            TransactionRequest::from_value(&json!("tx")).unwrap_err(),
            vec![StructuralError::NotAnObject]
        );
    }

    #[test]
    fn test_from_value_rejects_textual_amount() {
        let errors = TransactionRequest::from_value(&json!({
            "amount": "9",
            "fromAccount": "A",
            "toAccount": "B",
            "currency": "USD"
        }))
        .unwrap_err();

        assert_eq!(errors, vec![StructuralError::InvalidAmount]);
    }

    #[test]
    fn test_from_value_mixes_type_and_missing_errors() {
        let errors = TransactionRequest::from_value(&json!({
            "amount": 10,
            "fromAccount": 42,
            "currency": "USD"
        }))
        .unwrap_err();

        assert_eq!(
            errors,
            vec![
                StructuralError::NotAString("fromAccount"),
                StructuralError::MissingField("toAccount"),
            ]
        );
    }

    #[test]
    fn test_from_value_null_fields_left_unset() {
        let req = TransactionRequest::from_value(&json!({
            "amount": 10,
            "fromAccount": "A",
            "toAccount": "B",
            "currency": "USD",
            "memo": null
        }))
        .unwrap();

        assert!(req.memo.is_none());
        assert_eq!(req.amount, Some(dec!(10)));
    }
}
