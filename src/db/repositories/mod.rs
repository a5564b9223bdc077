pub mod favorite;
pub mod message;
pub mod movie;
pub mod user;
pub mod watch_history;
