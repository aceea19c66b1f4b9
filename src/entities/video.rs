use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "videos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub movie_id: i32,
    pub title: String,
    pub youtube_url: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Model {
    /// The text following the first `v=` in the source URL, up to any second `v=`.
    /// Trailing parameters such as `&t=10s` are kept.
    pub fn youtube_id(&self) -> Option<&str> {
        self.youtube_url.split("v=").nth(1)
    }

    pub fn youtube_embed_url(&self) -> Option<String> {
        self.youtube_id()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://www.youtube.com/embed/{id}"))
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::movie::Entity",
        from = "Column::MovieId",
        to = "super::movie::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Movie,
}

impl Related<super::movie::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Movie.def()
    }
}

timestamped!();
