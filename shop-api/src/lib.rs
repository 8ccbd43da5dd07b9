//! # shop-api
//!
//! Shared API types for the interior-shop backend.
//! This crate has no server dependencies and can be used by the backend as
//! well as by a Rust/WASM frontend.
//!
//! ## Features
//!
//! - Request DTOs (`SignInRequest`, `RegisterRequest`, `ConfirmCodeRequest`)
//! - Response DTOs (`UserResponse`, `AuthResponse`, `AppealResponse`)
//! - Error response format (`ErrorResponse`)
//! - Generic response wrapper (`AppResponse`)
//!
//! ## Example
//!
//! ```rust
//! use shop_api::SignInRequest;
//!
//! let request = SignInRequest {
//!     email: "user@example.com".to_string(),
//!     password: "password123".to_string(),
//! };
//! assert_eq!(request.email, "user@example.com");
//! ```

pub mod error;
pub mod requests;
pub mod responses;
pub mod result;

// Re-exports for convenient access
pub use error::ErrorResponse;
pub use requests::*;
pub use responses::*;
pub use result::{AppResponse, StatusCode};
