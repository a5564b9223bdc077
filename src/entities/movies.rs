use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "movies")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub title: String,

    pub description: String,

    pub poster: String,

    pub backdrop: Option<String>,

    /// JSON array of genre tags, e.g. `["Romance","Drama"]`
    pub genres: String,

    pub year: i32,

    /// 0.0 ..= 10.0
    pub rating: f64,

    /// Runtime in minutes
    pub duration: i32,

    pub created_at: String,

    /// Lowercased title and description, matched by catalog search
    pub search_text: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::favorites::Entity")]
    Favorites,
    #[sea_orm(has_many = "super::watch_history::Entity")]
    WatchHistory,
    #[sea_orm(has_many = "super::messages::Entity")]
    Messages,
}

impl Related<super::favorites::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Favorites.def()
    }
}

impl Related<super::watch_history::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WatchHistory.def()
    }
}

impl Related<super::messages::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Messages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
