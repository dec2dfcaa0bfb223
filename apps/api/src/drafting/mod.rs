// Statement drafting.
// Deterministic: builds supporting-statement paragraphs from an analysis result
// in one of three writing styles. No model calls.

pub mod handlers;
pub mod statement;
pub mod style;
