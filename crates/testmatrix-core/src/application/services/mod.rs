//! Application services (use case implementations).

mod matrix_service;

pub use matrix_service::MatrixService;
