//! Selection and ordering of sidechain records.
//!
//! - [`selection`]: pure sort/filter functions over withdrawals and bundles
//! - [`registry`]: identity-keyed in-memory record set that re-keys on
//!   status changes

pub mod error;
pub mod registry;
pub mod selection;

pub use error::{RegistryError, RegistryResult};
pub use registry::RecordRegistry;
pub use selection::{
    filter_unspent, retain_unspent, sort_by_fee_desc, sort_by_fee_desc_in_place,
    sort_by_height_desc, sort_by_height_desc_in_place,
};
