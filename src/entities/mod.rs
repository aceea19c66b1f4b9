/// Fills `created_at` on insert and refreshes `updated_at` on every save.
macro_rules! timestamped {
    () => {
        #[async_trait::async_trait]
        impl ActiveModelBehavior for ActiveModel {
            async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
            where
                C: ConnectionTrait,
            {
                let now = crate::entities::now_sec();
                if insert {
                    self.created_at = sea_orm::ActiveValue::Set(now);
                }
                self.updated_at = sea_orm::ActiveValue::Set(now);
                Ok(self)
            }
        }
    };
}

pub mod actor;
pub mod movie;
pub mod review;
pub mod session;
pub mod user;
pub mod video;

/// Current unix time in seconds, the unit every timestamp column is stored in.
pub fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}
