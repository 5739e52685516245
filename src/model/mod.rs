pub mod message;
pub mod topic;

pub use message::{DeliveryMode, Destination, Message};

#[cfg(test)]
mod tests;
