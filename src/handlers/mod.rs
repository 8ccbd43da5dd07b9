pub mod appeal;
pub mod auth;
pub mod health;
pub mod user;
