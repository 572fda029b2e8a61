// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor and transformer infrastructure for CST traversal.
//!
//! The design follows a hybrid approach: macro-generated trait method
//! signatures with hand-written walk and rebuild functions.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order** for `visit_*` methods
//! - **Post-order** for `leave_*` methods and `transform_*` hooks
//! - Children are visited in source order
//!
//! # Visitor Pattern
//!
//! ```ignore
//! use tugfold_cst::visitor::{walk_module, VisitResult, Visitor};
//!
//! struct NameCounter {
//!     count: usize,
//! }
//!
//! impl<'a> Visitor<'a> for NameCounter {
//!     fn visit_name(&mut self, _node: &'a NameExpr) -> VisitResult {
//!         self.count += 1;
//!         VisitResult::Continue
//!     }
//! }
//! ```
//!
//! # Transformer Pattern
//!
//! ```ignore
//! use tugfold_cst::visitor::{rebuild_module, Transform, Transformer};
//!
//! struct DropEmpty;
//!
//! impl Transformer for DropEmpty {
//!     fn transform_statement(&mut self, node: Statement) -> Transform<Statement> {
//!         match node {
//!             Statement::Empty(_) => Transform::Remove,
//!             other => Transform::Keep(other),
//!         }
//!     }
//! }
//! ```

mod dispatch;
mod reference;
mod sequence;
mod traits;

pub use dispatch::*;
pub use reference::{NameReference, ReferenceCollector, ReferenceKind};
pub use sequence::{
    ReplaceError, SequenceCollector, SequenceKind, SequenceReplacer, StatementSequence,
};
pub use traits::{Transform, Transformer, VisitResult, Visitor};
