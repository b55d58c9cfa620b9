//! Shared CLI argument types

mod common;
mod global;

pub use common::{LinkStyle, UploadArgs};
pub use global::GlobalOptions;
