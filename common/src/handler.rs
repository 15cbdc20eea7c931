//! [`Handler`] abstractions.

use std::future::Future;

/// Executable handler.
///
/// Gateways, commands and queries are all expressed as [`Handler`]s of some
/// operation type, so the callers only name the operation they need.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided arguments.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
