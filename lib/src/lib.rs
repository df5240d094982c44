pub mod constants;
pub mod protocol;
pub mod queue;
