//! Achievements Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::achievements::models::{Achievement, NewAchievement, UserAchievement};

const LIST_ACHIEVEMENTS_SQL: &str = include_str!("sql/list_achievements.sql");
const GET_ACHIEVEMENT_SQL: &str = include_str!("sql/get_achievement.sql");
const CREATE_ACHIEVEMENT_SQL: &str = include_str!("sql/create_achievement.sql");
const DELETE_ACHIEVEMENT_SQL: &str = include_str!("sql/delete_achievement.sql");
const GRANT_ACHIEVEMENT_SQL: &str = include_str!("sql/grant_achievement.sql");
const ACHIEVEMENTS_FOR_USER_SQL: &str = include_str!("sql/achievements_for_user.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAchievementsRepository;

impl PgAchievementsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_achievements(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        query_as::<Postgres, Achievement>(LIST_ACHIEVEMENTS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_achievement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        achievement_id: i32,
    ) -> Result<Achievement, sqlx::Error> {
        query_as::<Postgres, Achievement>(GET_ACHIEVEMENT_SQL)
            .bind(achievement_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_achievement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        achievement: NewAchievement,
    ) -> Result<Achievement, sqlx::Error> {
        query_as::<Postgres, Achievement>(CREATE_ACHIEVEMENT_SQL)
            .bind(achievement.title)
            .bind(achievement.description)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_achievement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        achievement_id: i32,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ACHIEVEMENT_SQL)
            .bind(achievement_id)
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    pub(crate) async fn grant_achievement(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<UserAchievement, sqlx::Error> {
        query_as::<Postgres, UserAchievement>(GRANT_ACHIEVEMENT_SQL)
            .bind(user_id)
            .bind(achievement_id)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn achievements_for_user(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user_id: i32,
    ) -> Result<Vec<Achievement>, sqlx::Error> {
        query_as::<Postgres, Achievement>(ACHIEVEMENTS_FOR_USER_SQL)
            .bind(user_id)
            .fetch_all(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Achievement {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            achievement_id: row.try_get("achievement_id")?,
            title: row.try_get("title")?,
            description: row.try_get("description")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for UserAchievement {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            user_id: row.try_get("user_id")?,
            achievement_id: row.try_get("achievement_id")?,
            awarded_at: row.try_get::<SqlxTimestamp, _>("awarded_at")?.to_jiff(),
        })
    }
}
