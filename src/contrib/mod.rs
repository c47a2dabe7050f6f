//! Premade noms for common lexical pieces.

pub mod parsers;
