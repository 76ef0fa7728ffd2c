pub mod public;
mod router;
pub use router::{BODY_LIMIT, endpoint, router};
