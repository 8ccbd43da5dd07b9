pub mod appeal;
pub mod user;

pub use appeal::{Appeal, NewAppeal};
pub use user::{NewUser, User};
