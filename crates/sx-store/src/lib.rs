pub mod error;
pub mod profile;
pub mod schema;
pub mod store;

pub use error::{Result, StoreError};
pub use profile::{DEFAULT_PROFILE, ProfileStore, resolve_data_dir};
pub use store::Store;
