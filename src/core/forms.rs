//! 各表單的欄位規則與目的地對應表。
//!
//! 四個表單共用同一套流程，差別只在這張表：必填欄位、選填欄位的預設值、
//! 目的地路徑與 `source` 標籤。

use crate::domain::model::FormKind;
use serde_json::{json, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredField {
    pub name: &'static str,
    /// 用在驗證訊息，例如 "Venue name is required."
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldDefault {
    Text(&'static str),
    Null,
}

impl FieldDefault {
    pub fn to_value(self) -> Value {
        match self {
            FieldDefault::Text(text) => Value::String(text.to_string()),
            FieldDefault::Null => Value::Null,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionalField {
    pub name: &'static str,
    pub default: FieldDefault,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    PassThrough,
    Wrapped { message: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormDescriptor {
    pub kind: FormKind,
    /// 網站前端呼叫的路徑
    pub route: &'static str,
    pub destination_path: &'static str,
    pub source: &'static str,
    pub source_overridable: bool,
    pub required: &'static [RequiredField],
    pub optional: &'static [OptionalField],
    pub response: ResponseShape,
}

const fn required(name: &'static str, label: &'static str) -> RequiredField {
    RequiredField { name, label }
}

const fn optional(name: &'static str, default: FieldDefault) -> OptionalField {
    OptionalField { name, default }
}

static CONTACT: FormDescriptor = FormDescriptor {
    kind: FormKind::Contact,
    route: "/api/contact-message",
    destination_path: "/contact_message",
    source: "website_contact",
    source_overridable: false,
    required: &[
        required("name", "Name"),
        required("email", "Email"),
        required("subject", "Subject"),
        required("message", "Message"),
    ],
    optional: &[],
    response: ResponseShape::PassThrough,
};

static NETWORK_SIGNUP: FormDescriptor = FormDescriptor {
    kind: FormKind::NetworkSignup,
    route: "/api/genie-network",
    destination_path: "/genie_network_signup",
    source: "website_join_genie_network",
    source_overridable: false,
    required: &[
        required("name", "Name"),
        required("email", "Email"),
        required("city", "City"),
    ],
    optional: &[
        optional("phone", FieldDefault::Text("")),
        optional("vibe", FieldDefault::Text("")),
    ],
    response: ResponseShape::PassThrough,
};

static VENDOR_WAITLIST: FormDescriptor = FormDescriptor {
    kind: FormKind::VendorWaitlist,
    route: "/api/vendor-waitlist",
    destination_path: "/vendor_waitlist_signup",
    source: "website_vendor_waitlist",
    source_overridable: false,
    required: &[
        required("venue_name", "Venue name"),
        required("name", "Contact name"),
        required("email", "Email"),
        required("city", "City"),
    ],
    optional: &[
        optional("phone", FieldDefault::Null),
        optional("venue_type", FieldDefault::Null),
        optional("website", FieldDefault::Null),
        optional("best_nights", FieldDefault::Null),
        optional("main_goal", FieldDefault::Null),
        optional("notes", FieldDefault::Null),
    ],
    response: ResponseShape::PassThrough,
};

static WEEKLY_PICKS: FormDescriptor = FormDescriptor {
    kind: FormKind::WeeklyPicks,
    route: "/api/weekly-picks",
    destination_path: "/weekly_pick_signup",
    source: "website_home_weekly_picks",
    source_overridable: true,
    required: &[required("contact_value", "Contact value")],
    optional: &[
        optional("contact_type", FieldDefault::Text("unknown")),
        optional("city", FieldDefault::Text("")),
    ],
    response: ResponseShape::Wrapped {
        message: "Signup successful.",
    },
};

pub fn descriptor(kind: FormKind) -> &'static FormDescriptor {
    match kind {
        FormKind::Contact => &CONTACT,
        FormKind::NetworkSignup => &NETWORK_SIGNUP,
        FormKind::VendorWaitlist => &VENDOR_WAITLIST,
        FormKind::WeeklyPicks => &WEEKLY_PICKS,
    }
}

impl FormDescriptor {
    /// 組出回給網站前端的成功 body
    pub fn success_body(&self, upstream: Value) -> Value {
        let data = if upstream.is_null() {
            json!({ "ok": true })
        } else {
            upstream
        };

        match self.response {
            ResponseShape::PassThrough => data,
            ResponseShape::Wrapped { message } => json!({
                "message": message,
                "data": data,
            }),
        }
    }
}
