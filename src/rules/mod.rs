//! Built-in rule families and the helpers they share.

pub mod compound_assignment;
pub mod declaration_assignment;
pub mod rewrite;
pub mod validate;

use crate::registry::Rule;

pub use compound_assignment::CompoundAssignment;
pub use declaration_assignment::DeclarationAssignment;

/// One instance of every built-in rule, in id order.
pub fn builtin_rules() -> Vec<Box<dyn Rule>> {
    vec![Box::new(DeclarationAssignment), Box::new(CompoundAssignment)]
}
