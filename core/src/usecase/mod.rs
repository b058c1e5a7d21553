pub mod daily_table;
pub mod outlook;
pub mod revenue;
pub mod summary;
