pub mod address_selector;
pub mod ui;

pub use address_selector::AddressSelector;
