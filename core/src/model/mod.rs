pub mod budget;
pub mod daily_log;
pub(crate) mod de;
pub mod pipeline;
pub mod targets;
