//! AI classification adapters

pub mod gemini;

pub use gemini::GeminiClassifier;
