// Topic naming: specific and background topic groups.

pub mod naming;

pub use naming::{TopicGroups, TopicSpec};
