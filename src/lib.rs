pub mod event;
pub mod mask;
pub mod text_edit;

pub use event::{KeyCode, KeyEvent, KeyModifiers, Selection, SelectionDirection};
pub use mask::compiler::{MaskItem, Program};
pub use mask::options::{FieldKind, FillMask, MaskOptions, OptionsError};
pub use mask::{CaretTicket, EditOutcome, MaskedField, NavOutcome};
