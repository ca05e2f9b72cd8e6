pub mod document;
pub mod emitter;
pub mod markup;
pub mod serialize;

pub use crate::core::emitter::{Emitter, RelationType, ToNml, NML_NAMESPACE, NML_PREFIX};
pub use crate::core::markup::{ElementRef, ElementTree, RenderOptions};
