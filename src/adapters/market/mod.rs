//! Market data adapters. Implement MarketDataPort.

pub mod static_data;

pub use static_data::StaticMarketData;
