use crate::types::{ChartKind, SourceCitation};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Serialize)]
pub(crate) struct QueryRequest<'a> {
    pub query: &'a str,
}

#[derive(Serialize)]
pub(crate) struct ApiKeyRequest<'a> {
    pub api_key: &'a str,
}

/// Error bodies carry an optional `detail` string.
#[derive(Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<Value>,
}

impl ErrorBody {
    pub fn detail_text(body: &str) -> Option<String> {
        let parsed = serde_json::from_str::<ErrorBody>(body).ok()?;
        match parsed.detail? {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Null => None,
            Value::String(_) => None,
            other => Some(other.to_string()),
        }
    }
}

/// Decode a 2xx body without failing the call.
///
/// Response fields are raw JSON values, so any object decodes; `null`, other
/// non-object bodies and non-JSON text fall back to the empty response.
pub(crate) fn lenient<T: DeserializeOwned + Default>(body: &str) -> T {
    serde_json::from_str(body).unwrap_or_else(|err| {
        tracing::warn!(error = %err, "unexpected response shape; using defaults");
        T::default()
    })
}

fn text_field(field: &Option<Value>) -> Option<&str> {
    field
        .as_ref()?
        .as_str()
        .map(str::trim)
        .filter(|text| !text.is_empty())
}

/// Response of `/query_router`. Every field is optional; missing or
/// mistyped pieces fall back to defaults instead of failing the exchange.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub answer: Option<Value>,
    #[serde(default)]
    pub response: Option<Value>,
    #[serde(default)]
    pub sources: Option<Value>,
}

impl QueryResponse {
    /// First non-empty string among `answer` then `response`.
    pub fn answer_text(&self) -> Option<&str> {
        [&self.answer, &self.response]
            .into_iter()
            .filter_map(|field| field.as_ref()?.as_str())
            .find(|text| !text.trim().is_empty())
    }

    /// Citation objects, skipping entries that are not citation-shaped.
    /// A `sources` value that is not an array yields no citations.
    pub fn citations(&self) -> Vec<SourceCitation> {
        self.sources
            .as_ref()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|raw| serde_json::from_value::<SourceCitation>(raw.clone()).ok())
            .collect()
    }
}

/// Response of `/visualize_router`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct VisualizeResponse {
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub chart_type: Option<Value>,
    #[serde(default)]
    pub chart_base64: Option<Value>,
    #[serde(default)]
    pub insight: Option<Value>,
}

impl VisualizeResponse {
    /// Object records in backend order; non-object entries are dropped and a
    /// non-array `data` counts as no records.
    pub fn records(&self) -> Vec<Map<String, Value>> {
        self.data
            .as_ref()
            .and_then(Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|record| record.as_object().cloned())
            .collect()
    }

    pub fn kind(&self) -> ChartKind {
        ChartKind::from_tag(self.chart_type.as_ref().and_then(Value::as_str))
    }

    pub fn image(&self) -> Option<&str> {
        text_field(&self.chart_base64)
    }

    pub fn insight_text(&self) -> Option<&str> {
        text_field(&self.insight)
    }
}

/// Response of `/load_api_key`.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ApiKeyResponse {
    #[serde(default)]
    pub status: Option<Value>,
}

impl ApiKeyResponse {
    pub fn status_text(&self) -> Option<&str> {
        text_field(&self.status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_prefers_answer_then_response() {
        let both: QueryResponse =
            serde_json::from_str(r#"{"answer":"A","response":"R"}"#).unwrap();
        assert_eq!(both.answer_text(), Some("A"));

        let response_only: QueryResponse =
            serde_json::from_str(r#"{"status":"success","response":"R"}"#).unwrap();
        assert_eq!(response_only.answer_text(), Some("R"));

        let empty_answer: QueryResponse =
            serde_json::from_str(r#"{"answer":"","response":null}"#).unwrap();
        assert_eq!(empty_answer.answer_text(), None);
    }

    #[test]
    fn citations_skip_malformed_entries() {
        let parsed: QueryResponse = serde_json::from_str(
            r#"{"sources":[{"type":"table","text":"<b>Revenue</b>","score":0.91,"source":"q4.pdf"},"junk"]}"#,
        )
        .unwrap();
        let citations = parsed.citations();
        assert_eq!(citations.len(), 1);
        assert_eq!(citations[0].kind, "table");
        assert_eq!(citations[0].score, Some(0.91));
    }

    #[test]
    fn records_keep_field_order() {
        let parsed: VisualizeResponse = serde_json::from_str(
            r#"{"data":[{"quarter":"Q1","revenue":45000}],"chart_type":"line"}"#,
        )
        .unwrap();
        let records = parsed.records();
        let keys: Vec<&String> = records[0].keys().collect();
        assert_eq!(keys, ["quarter", "revenue"]);
        assert_eq!(parsed.kind(), ChartKind::Line);
        assert_eq!(parsed.image(), None);
    }

    #[test]
    fn error_detail_extraction() {
        assert_eq!(
            ErrorBody::detail_text(r#"{"detail":"Invalid API key"}"#),
            Some("Invalid API key".to_string())
        );
        assert_eq!(ErrorBody::detail_text("Internal Server Error"), None);
        assert_eq!(ErrorBody::detail_text(r#"{"detail":null}"#), None);
    }

    #[test]
    fn mistyped_fields_fall_back() {
        let query: QueryResponse = lenient(r#"{"answer":"Revenue up","sources":"none"}"#);
        assert_eq!(query.answer_text(), Some("Revenue up"));
        assert!(query.citations().is_empty());

        let chart: VisualizeResponse =
            lenient(r#"{"data":{},"chart_type":7,"chart_base64":false,"insight":42}"#);
        assert!(chart.records().is_empty());
        assert_eq!(chart.kind(), ChartKind::Bar);
        assert_eq!(chart.image(), None);
        assert_eq!(chart.insight_text(), None);
    }

    #[test]
    fn non_object_bodies_use_defaults() {
        let null_body: QueryResponse = lenient("null");
        assert_eq!(null_body.answer_text(), None);

        let text_body: VisualizeResponse = lenient("OK");
        assert!(text_body.records().is_empty());

        let list_body: ApiKeyResponse = lenient("[1,2]");
        assert_eq!(list_body.status_text(), None);
    }
}
