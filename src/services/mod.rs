pub mod auth_service;
pub mod auth_service_impl;
pub use auth_service::{AuthError, AuthService, AuthSession};
pub use auth_service_impl::SeaOrmAuthService;

pub mod catalog_service;
pub mod catalog_service_impl;
pub use catalog_service::{CatalogError, CatalogService, MoviePage};
pub use catalog_service_impl::SeaOrmCatalogService;

pub mod favorite_service;
pub mod favorite_service_impl;
pub use favorite_service::{FavoriteError, FavoriteService, FavoriteToggle};
pub use favorite_service_impl::SeaOrmFavoriteService;

pub mod message_service;
pub mod message_service_impl;
pub use message_service::{MessageError, MessageService, SendMessage};
pub use message_service_impl::SeaOrmMessageService;

pub mod profile_service;
pub mod profile_service_impl;
pub use profile_service::{ProfileError, ProfileService, ProfileUpdate};
pub use profile_service_impl::SeaOrmProfileService;

pub mod seed;
pub use seed::{SAMPLE_MOVIES, seed_sample_movies};
