//! Entity structs for wkcal domain objects.
//!
//! All structs derive `Serialize` and `Deserialize` so they can be emitted by
//! the CLI and the HTTP routes as JSON.

mod api_key;
mod item;
mod profile;

pub use api_key::ApiKey;
pub use item::ReviewItem;
pub use profile::Profile;
