//! Protocol types for the Ignite REST API.
//!
//! This crate contains the pieces of the client that do not touch the
//! network: the [`Command`] request builder, the [`RestResponse`] envelope
//! and paged-query payload types, the time-boxed request signature, and the
//! shared [`IgniteError`] type.
//!
//! The wire protocol is HTTP/1.1 GET or POST against a fixed path with a
//! `cmd=<name>&<key>=<value>...` query string. POST requests carry a JSON
//! body; every response is a JSON envelope of the form
//! `{"successStatus": ..., "error": ..., "response": ...}`.

#![warn(missing_docs)]

pub mod command;
pub mod error;
pub mod response;
pub mod signature;

pub use command::{Command, Method};
pub use error::{IgniteError, Result};
pub use response::{FieldMetadata, QueryPage, RestResponse};
