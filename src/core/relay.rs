use crate::core::forms::{descriptor, FormDescriptor};
use crate::domain::model::{FormKind, RelayResponse, RelayedPayload, SubmissionRequest};
use crate::domain::ports::Destination;
use crate::utils::error::{RelayError, Result};
use serde_json::{Map, Value};

/// 依表單規則檢查必填欄位並組出目的地 payload，不做任何網路呼叫。
///
/// 必填欄位依表格順序檢查，第一個空白的欄位就回傳 `ValidationError`。
pub fn build_payload(request: &SubmissionRequest) -> Result<RelayedPayload> {
    let form = descriptor(request.form_kind);
    let mut fields = Map::new();

    for field in form.required {
        let value = request.text(field.name);
        if value.is_empty() {
            return Err(RelayError::validation(field.name, field.label));
        }
        fields.insert(field.name.to_string(), Value::String(value));
    }

    for field in form.optional {
        let value = request.text(field.name);
        let value = if value.is_empty() {
            field.default.to_value()
        } else {
            Value::String(value)
        };
        fields.insert(field.name.to_string(), value);
    }

    Ok(RelayedPayload::new(fields, resolve_source(form, request)))
}

fn resolve_source(form: &FormDescriptor, request: &SubmissionRequest) -> String {
    if form.source_overridable {
        let requested = request.text("source");
        if !requested.is_empty() {
            return requested;
        }
    }
    form.source.to_string()
}

/// 表單轉送：驗證、組 payload、呼叫一次目的地
pub struct FormRelay<D: Destination> {
    destination: D,
}

impl<D: Destination> FormRelay<D> {
    pub fn new(destination: D) -> Self {
        Self { destination }
    }

    pub async fn relay(
        &self,
        form_kind: FormKind,
        raw_fields: Map<String, Value>,
    ) -> Result<RelayResponse> {
        self.relay_request(&SubmissionRequest::new(form_kind, raw_fields))
            .await
    }

    pub async fn relay_request(&self, request: &SubmissionRequest) -> Result<RelayResponse> {
        let form = descriptor(request.form_kind);

        let payload = match build_payload(request) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!(
                    "📝 {}: rejected submission, missing {}",
                    request.form_kind,
                    e.field().unwrap_or("?")
                );
                return Err(e);
            }
        };

        tracing::debug!(
            "📡 {}: relaying to {} (source {})",
            request.form_kind,
            form.destination_path,
            payload.source()
        );

        match self.destination.post_json(form.destination_path, &payload).await {
            Ok(response) => {
                tracing::info!(
                    "✅ {}: relayed to {} (status {})",
                    request.form_kind,
                    form.destination_path,
                    response.status
                );
                Ok(response)
            }
            Err(e) => {
                match &e {
                    RelayError::UpstreamError { message, status } => tracing::error!(
                        "❌ {}: upstream {} failed (status {:?}): {}",
                        request.form_kind,
                        form.destination_path,
                        status,
                        message
                    ),
                    other => tracing::error!(
                        "❌ {}: upstream {} failed: {}",
                        request.form_kind,
                        form.destination_path,
                        other
                    ),
                }
                Err(e)
            }
        }
    }
}
