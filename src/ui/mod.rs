//! The UI definition transformer: walks a decoded `#ui/definition` tree and
//! classifies every element into a typed node descriptor.
//!
//! Classification is intentionally shallow and single-pass: it recognizes
//! shape (first map key, tag name) and captures `:source`/`:when` payloads
//! as structured data without evaluating them.

use crate::error::TransformError;
use crate::value::Value;

mod fields;
mod node;
mod process;

pub use fields::{FieldName, FieldValue, Fields};
pub use node::{UiBlock, UiNode};

/// Transform a decoded value tree rooted at a `ui/definition` tag into an
/// ordered block list. The first grammar mismatch aborts the whole
/// transform; there is no partial node list on failure.
pub fn process_ui(root: &Value) -> Result<Vec<UiBlock>, TransformError> {
    process::process_definition(root)
}
