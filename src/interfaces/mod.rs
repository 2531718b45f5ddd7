//! Inbound adapters: CSV batches, the HTTP API and the types they share.

pub mod batch;
pub mod csv;
pub mod dto;
pub mod http;
