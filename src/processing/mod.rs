//! Resume evaluation engine

pub mod ats_matcher;
pub mod quality;
pub mod quick_score;
pub mod readiness;
pub mod recommendations;
pub mod requirements;
pub mod scoring;
pub mod taxonomy;
pub mod text_processor;
