mod docs;
mod error;
mod router;
mod routes;
mod state;

pub use error::{ApiError, ServerError};
pub use router::{build_router, serve, serve_listener};
