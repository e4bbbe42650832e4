// Interaction Script Parser Module

pub mod ast;
pub mod lexer;
pub mod script;

// Public API re-exports
pub use ast::Step;
pub use script::{parse_script, parse_steps};
