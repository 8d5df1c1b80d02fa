pub mod router;
pub mod server;

pub use router::{router, AppState};
pub use server::serve;
