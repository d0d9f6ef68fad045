//! startup-copilot: AI co-pilot for early-stage founders with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
