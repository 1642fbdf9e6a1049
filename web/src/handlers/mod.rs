//! HTTP and WebSocket request handlers.
//!
//! Handlers are generic over the served component and take
//! [`LiveState`](crate::LiveState) as axum state.

pub mod health;
pub mod live;
pub mod metrics;
pub mod websocket;

pub use health::health_check;
