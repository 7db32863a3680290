mod category;

pub use category::{Category, CategoryNode};
