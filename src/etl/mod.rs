//! Core ETL (Extract, Transform, Load) abstractions
//!
//! The dataset download, the CSV-to-table load and the CSV copy used by
//! extraction are all expressed as a [`Pipeline`] of these three traits.

mod extract;
mod load;
mod pipeline;
mod transform;

pub use extract::Extractor;
pub use load::Loader;
pub use pipeline::Pipeline;
pub use transform::{IdentityTransformer, Transformer};
