/// Game session module: per-session workers, their messages, and the live session registry.

pub mod worker;
pub mod messages;
pub mod registry;

