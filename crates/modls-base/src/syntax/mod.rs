//! The concrete-syntax parser and the generic tree it produces.
//!
//! Spec.md treats the parser as an external collaborator the core only
//! consumes through a narrow node API (§3, §9 "Parser interop"). This
//! module is that collaborator's concrete implementation: a `pest`
//! grammar (`modelica.pest`) feeding a homogeneous [`node::SyntaxTree`],
//! plus the pure [`helpers`] the rest of the core queries it with.

pub mod helpers;
pub mod node;
pub mod parser;

pub use node::{NodeId, SyntaxNode, SyntaxTree};
