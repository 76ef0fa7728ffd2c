mod core;
mod reply;
pub use self::core::*;
pub use self::reply::{InvalidJson, Reply};
