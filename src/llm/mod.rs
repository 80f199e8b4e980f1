// LLM abstraction layer

pub mod provider;
pub mod gemini;

pub use provider::*;
pub use gemini::GeminiAdapter;
