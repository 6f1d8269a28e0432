//! Core types for conngen
//!
//! This module holds the pieces every other module shares: the error taxonomy
//! ([`ConnGenError`]), the user-facing error wrapper ([`ErrorContext`]), and the
//! definition record model ([`record`]).
//!
//! The record model follows a two-state lifecycle. Documents are parsed into a
//! [`RawRecord`], which becomes either an already-terminal [`ConnectionType`] or a
//! [`PendingRecord`] waiting on its parent. The resolver turns every pending record
//! into a [`ConnectionType`] exactly once.

pub mod error;
pub mod record;

pub use error::{ConnGenError, ErrorContext, user_friendly_error};
pub use record::{ConnectionType, Parameter, ParameterSlot, PendingRecord, RawRecord, RecordState};
