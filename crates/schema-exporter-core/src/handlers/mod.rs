//! Handlers for the composite field kinds.
//!
//! Each handler consumes the attributes of one field and builds a fresh
//! successor value; nested sub-schemas recurse back through the dispatcher or
//! the assembler.

pub mod area;
pub mod relationship;
pub mod repeatable;
