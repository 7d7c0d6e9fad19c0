// SyncriBullet API Library
//
// HTTP surface of the add-on: manifest, catalogs and install links

pub mod http;

// Re-export commonly used types
pub use http::{create_router, AppState};
