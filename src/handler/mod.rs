//! Request handling: method routing, static file resolution, directory
//! listings.

mod listing;
mod router;
mod static_files;

pub use router::{handle_request, RequestContext};
