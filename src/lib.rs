pub use crate::errors::{SourceContext, StencilError};
pub use crate::location::SourceLocation;
pub use crate::render::{Locale, RenderFormat};
pub use crate::span::Span;
pub use crate::tagged::Tagged;

pub mod cli;
pub mod config;
pub mod errors;
pub mod location;
pub mod render;
pub mod span;
pub mod syntax;
pub mod tagged;
