//! Element templates: loading, conversion and lookup.

pub mod conversion;
pub mod definition;
pub mod raw;
pub mod registry;

pub use conversion::*;
pub use definition::*;
pub use raw::*;
pub use registry::*;
