//! Bridge between native code and a rich-text editor hosted in an embedded
//! web document.
//!
//! The boundary offers no synchronous call path and no shared memory:
//! commands go out as script evaluations through a [`host::DocumentHost`],
//! and the document reports state changes back by queueing notification
//! strings and navigating to a reserved callback scheme. The host web view
//! forwards every navigation request to
//! [`editor::RichEditorHandle::decide_navigation`] and every load completion
//! to [`editor::RichEditorHandle::document_did_load`]; everything else is
//! handled here.

pub mod delegate;
pub mod editor;
pub mod host;
pub mod navigation;
pub mod state;
pub mod value;
