//! maskfield - mask-driven text input formatting
//!
//! This crate reconciles a stream of user edits against a mask pattern,
//! producing a canonically formatted buffer that tracks which characters
//! are user-supplied versus synthesized, and preserving the cursor across
//! reformatting.
//!
//! # Architecture
//!
//! Three components, leaves first:
//!
//! - [`slot`]: compiles a mask pattern string into an ordered list of typed
//!   slots. Pure, stateless.
//! - [`engine`]: the reconciliation pass. Rebuilds the annotated buffer from
//!   the candidate input stream and remaps the selection.
//! - [`session`]: wraps the engine for live editing. Receives the host
//!   surface's edit notifications, suppresses re-entrant reconciliation, and
//!   forwards change notifications to listeners only when the unmasked
//!   value changed.
//!
//! # Example
//!
//! ```
//! use maskfield::{engine, slot};
//!
//! let slots = slot::compile("(999) 999-9999");
//! let result = engine::reconcile("5551234567", &slots, '_');
//! assert_eq!(result.buffer.raw_text(), "(555) 123-4567");
//! assert_eq!(result.buffer.unmasked_text(), "5551234567");
//! ```

pub mod buffer;
pub mod cli;
pub mod config;
pub mod config_paths;
pub mod engine;
pub mod selection;
pub mod session;
pub mod slot;
pub mod tracing;

// Re-export commonly used types
pub use buffer::{CharTag, MaskedBuffer, MaskedChar};
pub use config::{MaskConfig, MaskPresets};
pub use engine::{reconcile, remap_selection, Reconciled};
pub use selection::Selection;
pub use session::{ChangeListener, EditSession, EditSurface, ListenerId};
pub use slot::{compile, Slot};
