// Adapters layer: concrete implementations for external systems (http, serverless events).

pub mod gateway;
pub mod http;
