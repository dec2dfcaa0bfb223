// Document comparison engine.
// Pure, synchronous heuristics over plain text: value tagging, requirement
// extraction, skills, experience and tenure, requirement matching, highlights.
// The orchestrator sequences them; handlers expose them over HTTP.

pub mod dates;
pub mod experience;
pub mod handlers;
pub mod highlights;
pub mod matcher;
pub mod models;
pub mod orchestrator;
pub mod progress;
pub mod requirements;
pub mod skills;
pub mod tenure;
pub mod text;
pub mod values;
pub mod vocabulary;
