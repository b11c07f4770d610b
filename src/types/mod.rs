//! Data types for the SMS relay
//!
//! This module contains the event record and the error taxonomy used
//! throughout the application.

mod error;
mod sms;

pub use error::{IngestError, ServerError, ServerResult, SubscribeError};
pub use sms::{SmsEvent, MESSAGE_FIELD, RECEIVED_AT_FIELD, SENDER_FIELD};
