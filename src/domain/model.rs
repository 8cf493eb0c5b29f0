use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// 網站上的四種表單
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormKind {
    Contact,
    NetworkSignup,
    VendorWaitlist,
    WeeklyPicks,
}

impl FormKind {
    pub const ALL: [FormKind; 4] = [
        FormKind::Contact,
        FormKind::NetworkSignup,
        FormKind::VendorWaitlist,
        FormKind::WeeklyPicks,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::NetworkSignup => "network-signup",
            FormKind::VendorWaitlist => "vendor-waitlist",
            FormKind::WeeklyPicks => "weekly-picks",
        }
    }
}

impl fmt::Display for FormKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FormKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| format!("Unknown form kind: {}", s))
    }
}

/// 呼叫端送來的原始表單資料，未經信任
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub form_kind: FormKind,
    pub fields: Map<String, Value>,
}

impl SubmissionRequest {
    pub fn new(form_kind: FormKind, fields: Map<String, Value>) -> Self {
        Self { form_kind, fields }
    }

    /// 從請求 body 建立；無法解析或不是 JSON 物件時視為空表單
    pub fn from_body(form_kind: FormKind, body: &[u8]) -> Self {
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => map,
            Ok(_) | Err(_) => Map::new(),
        };
        Self { form_kind, fields }
    }

    /// 取得欄位並轉成去除前後空白的字串，缺少的欄位為空字串
    pub fn text(&self, name: &str) -> String {
        coerce_field(self.fields.get(name))
    }
}

pub fn coerce_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string().trim().to_string(),
    }
}

/// 送往目的地的資料。只能透過驗證流程建立
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelayedPayload {
    #[serde(flatten)]
    fields: Map<String, Value>,
    source: String,
}

impl RelayedPayload {
    pub(crate) fn new(fields: Map<String, Value>, source: String) -> Self {
        Self { fields, source }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }

    pub fn to_json(&self) -> Value {
        let mut map = self.fields.clone();
        map.insert("source".to_string(), Value::String(self.source.clone()));
        Value::Object(map)
    }
}

/// 目的地回傳的結果，body 原樣轉交
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: Value,
}
