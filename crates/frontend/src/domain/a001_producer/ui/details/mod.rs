//! Producer Details UI Module
//!
//! Simplified MVVM pattern implementation:
//! - view_model.rs: ViewModel with commands and state management
//! - view.rs: Leptos component (pure UI)
//!
//! API access goes through `ProducerRepository`.

mod view;
mod view_model;

pub use view::ProducerDetails;
pub use view_model::ProducerDetailsViewModel;
