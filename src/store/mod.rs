pub mod messages;
pub mod sqlite;
