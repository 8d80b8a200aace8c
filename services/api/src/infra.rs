use metrics_exporter_prometheus::PrometheusHandle;
use mortgage_prequal::error::AppError;
use mortgage_prequal::qualification::ToolDispatcher;
use serde_json::{Map, Value};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Dispatcher shared by every request; the rule table is fixed once the service starts.
pub(crate) type SharedDispatcher = Arc<ToolDispatcher>;

/// Parses a `key=value` pair from the command line into a JSON argument.
///
/// Values that parse as JSON (numbers, booleans, null) keep their type; anything else is passed
/// through as a string so the dispatcher's own coercion and error reporting apply.
pub(crate) fn parse_argument(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing argument name in '{raw}'"));
    }

    let value = value.trim();
    let parsed = serde_json::from_str::<Value>(value)
        .ok()
        .filter(|parsed| !parsed.is_object() && !parsed.is_array())
        .unwrap_or_else(|| Value::String(value.to_string()));

    Ok((key.to_string(), parsed))
}

/// Merges a `--json` object with individual `--arg` pairs; pairs win on conflict.
pub(crate) fn collect_arguments(
    json: Option<&str>,
    pairs: Vec<(String, Value)>,
) -> Result<Map<String, Value>, AppError> {
    let mut arguments = match json {
        Some(raw) => match serde_json::from_str::<Value>(raw)? {
            Value::Object(map) => map,
            other => {
                return Err(AppError::Usage(format!(
                    "--json must be a JSON object, got {other}"
                )))
            }
        },
        None => Map::new(),
    };

    arguments.extend(pairs);
    Ok(arguments)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_argument_keeps_numbers_typed() {
        assert_eq!(
            parse_argument("purchase_price=650000").expect("valid pair"),
            ("purchase_price".to_string(), json!(650000))
        );
        assert_eq!(
            parse_argument("contract_interest_rate = 5.25").expect("valid pair"),
            ("contract_interest_rate".to_string(), json!(5.25))
        );
    }

    #[test]
    fn parse_argument_falls_back_to_strings() {
        let (_, value) = parse_argument("credit_score=excellent").expect("valid pair");
        assert_eq!(value, json!("excellent"));

        let (_, value) = parse_argument("note={\"a\":1}").expect("valid pair");
        assert_eq!(value, json!("{\"a\":1}"));
    }

    #[test]
    fn parse_argument_rejects_malformed_pairs() {
        assert!(parse_argument("purchase_price").is_err());
        assert!(parse_argument("=650000").is_err());
    }

    #[test]
    fn collect_arguments_merges_pairs_over_json() {
        let arguments = collect_arguments(
            Some(r#"{"purchase_price": 500000, "proposed_down_payment": 25000}"#),
            vec![("proposed_down_payment".to_string(), json!(50000))],
        )
        .expect("arguments merge");

        assert_eq!(arguments["purchase_price"], json!(500000));
        assert_eq!(arguments["proposed_down_payment"], json!(50000));
    }

    #[test]
    fn collect_arguments_requires_object_json() {
        let err = collect_arguments(Some("[1, 2]"), Vec::new()).expect_err("array rejected");
        assert!(matches!(err, AppError::Usage(_)));

        let err = collect_arguments(Some("{not json"), Vec::new()).expect_err("bad json");
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
