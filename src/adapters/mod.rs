// Adapters layer: concrete implementations for external systems (lookup http, storage, web api).

pub mod api;
pub mod http;
#[cfg(feature = "postgres")]
pub mod postgres;
pub mod storage;
