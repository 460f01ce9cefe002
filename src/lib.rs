pub mod decode;
pub mod document;
pub mod error;
pub mod export;
pub mod reader;
pub mod ui;
pub mod value;

pub use decode::decode;
pub use document::UiDocument;
pub use error::{DecodeError, EdnError, TransformError, UidefError};
pub use ui::{process_ui, FieldName, FieldValue, Fields, UiBlock, UiNode};
pub use value::{MapEntry, Value};
