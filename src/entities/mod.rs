pub mod prelude;

pub mod favorites;
pub mod messages;
pub mod movies;
pub mod users;
pub mod watch_history;
