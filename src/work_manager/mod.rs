//module tree
mod config;
mod thread_work_manager;
mod work_manager;
mod work_manager_executor;

//API exports
pub use crate::work_manager::config::*;
pub use crate::work_manager::thread_work_manager::*;
pub use crate::work_manager::work_manager::*;
pub use crate::work_manager::work_manager_executor::*;
