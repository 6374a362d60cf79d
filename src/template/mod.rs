mod render;
mod types;

pub use render::{render, HEADER, PROPERTY_KEY_WIDTH};
pub use types::FormatKind;
