pub mod customers;
pub mod employees;
pub mod flowers;
pub mod line_items;
pub mod orders;
pub mod payments;
pub mod suppliers;

pub use customers::*;
pub use employees::*;
pub use flowers::*;
pub use line_items::*;
pub use orders::*;
pub use payments::*;
pub use suppliers::*;
