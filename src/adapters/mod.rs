//! Infrastructure adapters. Implement outbound ports and the inbound UI.
//!
//! Generation, risk scoring, market data, session state, terminal UI. Map errors to DomainError.

pub mod ai;
pub mod http;
pub mod market;
pub mod persistence;
pub mod scoring;
pub mod ui;
