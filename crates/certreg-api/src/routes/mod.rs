//! Route modules, one per slice of the exposed surface.

pub mod certificates;
pub mod issuers;
pub mod metadata;
