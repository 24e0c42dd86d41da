//! JSOP patch grammar for the canopy tree store.
//!
//! A patch is a concatenation of operations with no separator between them:
//!
//! ```text
//! +"<path>":{…}        add node (empty object payload for merge-produced adds)
//! -"<path>"            remove node
//! ^"<path>":<scalar>   set property (a null scalar removes the property)
//! >"<old>":"<new>"     move node
//! *"<old>":"<new>"     copy node
//! ```
//!
//! Path tokens use standard JSON string quoting. Raw payload and scalar text
//! is carried verbatim through parse and re-encode, so historic patches
//! survive re-rooting bit for bit.
//!
//! # Key Types
//!
//! - [`PatchOp`] — One operation of the grammar
//! - [`PatchBuilder`] / [`encode`] — Bit-exact emission
//! - [`parse`] — Tokenizing parser
//! - [`reroot`] — Prefix every path token of a recorded patch

pub mod builder;
pub mod error;
pub mod op;
pub mod parser;
pub mod reroot;

pub use builder::{encode, PatchBuilder};
pub use error::{JsopError, JsopResult};
pub use op::PatchOp;
pub use parser::parse;
pub use reroot::reroot;
