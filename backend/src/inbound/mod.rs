//! Inbound adapters that translate HTTP requests into listing port calls
//! while keeping actix details at the edge.

pub mod http;
