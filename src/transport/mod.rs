//! The `transport` module carries sessions over the network.
//!
//! It defines the JSON frames exchanged with the broker and implements
//! [`WsSession`], the WebSocket-backed [`Session`](crate::session::Session).

pub mod message;
pub mod websocket;

pub use websocket::WsSession;
