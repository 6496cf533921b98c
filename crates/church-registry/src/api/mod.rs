pub mod auth;
pub mod openapi;
pub mod problem;
pub mod rest;
pub mod state;

/// Handler result: success or an RFC 9457 problem response.
pub type ApiResult<T> = Result<T, problem::Problem>;
