pub use super::favorites::Entity as Favorites;
pub use super::messages::Entity as Messages;
pub use super::movies::Entity as Movies;
pub use super::users::Entity as Users;
pub use super::watch_history::Entity as WatchHistory;
