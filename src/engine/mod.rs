pub mod difficulty;
pub mod options;
pub mod quiz;
pub mod scheduler;
pub mod scoring;
