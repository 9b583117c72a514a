//! HTTP API module for the Leave Engine.
//!
//! This module provides the REST endpoints the attendance system calls to
//! read leave balances and to check vacation requests against them.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{BalanceRequest, CheckRequest, WorkerRequest};
pub use response::{ApiError, BalanceResponse, CheckResponse, NO_HIRE_DATE_MESSAGE};
pub use state::AppState;
