pub mod remediation;

pub use crate::domain::model::{
    ConfigChangeEvent, HandlerOutcome, Incident, Verdict, VersioningStatus,
};
pub use crate::domain::ports::{Notifier, VersioningStore};
pub use crate::utils::error::Result;
