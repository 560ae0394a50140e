//! Philippine address hierarchy: bundled reference tables, cascading filters
//! and the selection controller used by address forms.

pub mod filter;
pub mod reference;
pub mod selection;

pub use filter::children_of;
pub use reference::{
    reference_data, Barangay, City, LocationEntry, Province, ReferenceData, Region,
};
pub use selection::{AddressField, AddressSink, LocationCodes, LocationSelection};
