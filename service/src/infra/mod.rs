//! Infrastructure layer.

pub mod gateway;

#[cfg(feature = "http")]
pub use self::gateway::Http;
pub use self::gateway::{Backend, Gateway, Local};
