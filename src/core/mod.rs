pub mod forms;
pub mod relay;

pub use crate::domain::model::{FormKind, RelayResponse, RelayedPayload, SubmissionRequest};
pub use crate::domain::ports::{AuthScheme, ConfigProvider, Destination};
pub use crate::utils::error::Result;
