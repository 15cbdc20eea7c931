//! [`Gateway`]-related implementations.

mod backend;
#[cfg(feature = "http")]
pub mod http;
pub mod local;

use derive_more::{Display, Error as StdError, From};

pub use self::backend::Backend;
#[cfg(feature = "http")]
pub use self::http::Http;
pub use self::local::Local;

/// Entity store operation.
pub use common::Handler as Gateway;

/// [`Gateway`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "http")]
    /// [`Http`] error.
    #[display("{_0}")]
    Http(http::Error),

    /// [`Local`] error.
    #[display("{_0}")]
    Local(local::Error),

    /// Operation isn't supported by the configured [`Gateway`].
    #[display("{_0} is not supported by the configured gateway")]
    #[from(ignore)]
    Unsupported(#[error(not(source))] &'static str),
}
