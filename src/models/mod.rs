//! Records returned by the store and serialized straight onto the wire.
//!
//! All of them serialize with camelCase field names.

pub mod activity;
pub mod message;
pub mod movie;
pub mod user;

pub use activity::{Favorite, FavoriteWithMovie, Profile, Stats, WatchActivity, WatchEntry};
pub use message::{EnrichedMessage, Message};
pub use movie::{Movie, MovieDetail, MovieSummary, NewMovie};
pub use user::{User, UserContact, UserSummary};
