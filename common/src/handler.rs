//! [`Handler`] abstractions.

use std::future::Future;

/// Asynchronous operation executed against some environment.
///
/// The same trait backs queries, commands and storage operations: the
/// `Args` type selects which operation is executed.
pub trait Handler<Args = ()> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Executes this [`Handler`] with the provided `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}
