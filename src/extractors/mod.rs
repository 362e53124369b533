pub mod json;
pub mod resource;

pub use json::JsonBody;
pub use resource::{is_supplier_alias, SupplierCollection, SupplierItem, SUPPLIER_ALIASES};
