//! Category-management core for the storefront admin back office.
//!
//! All pricing, inventory, and persistence logic lives in the remote catalog
//! API; this crate is the state-orchestration layer over it. The interesting
//! part is the category tree engine: building a forest from the flat wire
//! list, flattening it for dropdowns and tables, and guarding mutations so a
//! category can never become its own ancestor.

pub mod core;
pub mod features;
