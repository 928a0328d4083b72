//! Submit work to a thread pool or to a legacy work manager through one interface, then wait on the outcomes of
//! one, any, or all of the submitted units of work under a single deadline.
//!
//! - [`WorkExecutor`]: the submission interface, implemented by [`PoolWorkExecutor`] (tokio blocking pool) and
//!   [`WorkManagerExecutor`] (any [`WorkManager`]).
//! - [`WorkHandle`]: the outcome of a unit of work (pending, succeeded, failed, or cancelled).
//! - [`wait_for_completion()`], [`wait_for_any_to_complete()`], [`wait_for_all_to_complete()`]: composite waits.
//!   They never fail because a unit of work failed; they only report whether the waited-for work finished in time.

//module tree
mod deadline;
mod errors;
mod interrupt;
mod pool_executor;
mod wait;
mod work_executor;
mod work_handle;
mod work_manager;

//API exports
pub use crate::deadline::*;
pub use crate::errors::*;
pub use crate::interrupt::*;
pub use crate::pool_executor::*;
pub use crate::wait::*;
pub use crate::work_executor::*;
pub use crate::work_handle::*;
pub use crate::work_manager::*;
