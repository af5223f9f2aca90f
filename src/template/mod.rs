// Template scanning and expansion.
//
// A template is scanned once into literal runs and placeholder occurrences
// (scanner), then rendered against the supplied parameters (expander). No
// state survives a call.

mod ast;
mod expander;
mod scanner;

pub(crate) use expander::expand;
