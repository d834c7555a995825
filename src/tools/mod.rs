//! Tool request model, prompt composer, and engine

pub mod engine;
pub mod prompts;
pub mod request;
pub mod results;

pub use engine::ToolEngine;
pub use request::{ImageAttachment, ToolKind, ToolRequest};
pub use results::ToolResult;

/// Subjects offered for assignment help; the first is the default
pub const SUBJECTS: [&str; 10] = [
    "Mathematics",
    "Physics",
    "Chemistry",
    "Biology",
    "Computer Science",
    "History",
    "Geography",
    "Literature",
    "Economics",
    "Philosophy",
];
