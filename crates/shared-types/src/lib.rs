pub mod auth;
pub mod dates;
pub mod error;
pub mod health;
pub mod plate;
pub mod search;

pub use auth::*;
pub use dates::*;
pub use error::*;
pub use health::*;
pub use plate::*;
pub use search::*;
