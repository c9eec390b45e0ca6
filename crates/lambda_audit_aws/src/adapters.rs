pub mod config;
pub mod connector;
pub mod iam;
pub mod lambda;

use std::future::Future;

/// Runs an SDK future to completion from synchronous adapter code.
///
/// Requires a multi-threaded Tokio runtime.
pub(crate) fn block_on<F: Future>(future: F) -> F::Output {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
