//! Admin category management feature.
//!
//! Categories form a forest of arbitrary depth. The remote catalog API is
//! the system of record; this feature caches its flat listing in a
//! [`store::CategoryStore`], nests it with [`tree::build_forest`], projects
//! it for tables and parent dropdowns with the [`flatten`] functions, and
//! refuses mutations that would loop the hierarchy via [`guards`].
//!
//! ## Remote operations used
//!
//! | Method | Endpoint | Description |
//! |--------|----------|-------------|
//! | GET | `/api/categories` | List categories (flat or pre-nested) |
//! | POST | `/api/categories` | Create category |
//! | PUT | `/api/categories/{id}` | Update category |
//! | DELETE | `/api/categories/{id}` | Delete category |

pub mod clients;
pub mod dtos;
pub mod flatten;
pub mod guards;
pub mod models;
pub mod services;
pub mod store;
pub mod tree;

pub use services::CategoryService;
