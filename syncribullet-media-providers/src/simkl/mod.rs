//! Simkl Provider Client
//!
//! Pure HTTP client for the Simkl sync API, independent of `ListProvider`.
//!
//! # Example
//!
//! ```no_run
//! use syncribullet_media_providers::simkl::{SimklClient, SimklListStatus, SimklListType};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = SimklClient::new().with_credentials(Some("token"), Some("client-id"));
//! let entries = client
//!     .all_items(SimklListType::Anime, SimklListStatus::Completed)
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
pub mod types;

pub use client::{SimklClient, DEFAULT_API_BASE_URL, POSTER_BASE_URL};
pub use types::*;
