//! # PopSub samples
//!
//! `popsub-samples` is a set of small, single-purpose programs showing
//! point-to-point and publish/subscribe messaging against a broker:
//! a request/reply responder and requestor, a durable-queue producer and
//! consumer, and a topic publisher and subscriber.
//!
//! ## Core Modules
//!
//! - `config`: Loads sample configuration (destination names, default credentials).
//! - `model`: The message type, destinations and topic wildcard matching.
//! - `session`: The `Session` abstraction every sample is written against, its
//!   callback roles and the one-shot gate used to wait for a callback.
//! - `transport`: The WebSocket-backed session and its JSON frames.
//! - `samples`: The sample programs themselves; `src/bin` only wires them up.
//! - `utils`: Shared error type and logging setup.

pub mod config;
pub mod model;
pub mod samples;
pub mod session;
pub mod transport;
pub mod utils;
