// Application layer - use cases on top of the settlement domain:
// - loading/saving sheet documents
// - row editing by position
// - rendering print-ready output

pub mod error;
pub mod render;
pub mod service;

pub use error::*;
pub use render::*;
pub use service::*;
