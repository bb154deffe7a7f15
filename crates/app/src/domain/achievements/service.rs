//! Achievements service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::achievements::{
        errors::AchievementsServiceError,
        models::{Achievement, NewAchievement, UserAchievement},
        repository::PgAchievementsRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgAchievementsService {
    db: Db,
    repository: PgAchievementsRepository,
}

impl PgAchievementsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgAchievementsRepository::new(),
        }
    }
}

#[async_trait]
impl AchievementsService for PgAchievementsService {
    async fn list_achievements(&self) -> Result<Vec<Achievement>, AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let achievements = self.repository.list_achievements(&mut tx).await?;

        tx.commit().await?;

        Ok(achievements)
    }

    async fn get_achievement(
        &self,
        achievement_id: i32,
    ) -> Result<Achievement, AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let achievement = self
            .repository
            .get_achievement(&mut tx, achievement_id)
            .await?;

        tx.commit().await?;

        Ok(achievement)
    }

    async fn create_achievement(
        &self,
        achievement: NewAchievement,
    ) -> Result<Achievement, AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self
            .repository
            .create_achievement(&mut tx, achievement)
            .await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn delete_achievement(
        &self,
        achievement_id: i32,
    ) -> Result<(), AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_achievement(&mut tx, achievement_id)
            .await?;

        if rows_affected == 0 {
            return Err(AchievementsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }

    async fn grant_achievement(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<UserAchievement, AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let granted = self
            .repository
            .grant_achievement(&mut tx, user_id, achievement_id)
            .await?;

        tx.commit().await?;

        Ok(granted)
    }

    async fn achievements_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Achievement>, AchievementsServiceError> {
        let mut tx = self.db.begin().await?;

        let achievements = self
            .repository
            .achievements_for_user(&mut tx, user_id)
            .await?;

        tx.commit().await?;

        Ok(achievements)
    }
}

#[automock]
#[async_trait]
pub trait AchievementsService: Send + Sync {
    /// Retrieves all achievements.
    async fn list_achievements(&self) -> Result<Vec<Achievement>, AchievementsServiceError>;

    /// Retrieve a single achievement.
    async fn get_achievement(
        &self,
        achievement_id: i32,
    ) -> Result<Achievement, AchievementsServiceError>;

    /// Creates a new achievement.
    async fn create_achievement(
        &self,
        achievement: NewAchievement,
    ) -> Result<Achievement, AchievementsServiceError>;

    /// Deletes an achievement with the given id.
    async fn delete_achievement(&self, achievement_id: i32)
    -> Result<(), AchievementsServiceError>;

    /// Grants an achievement to a user. Granting twice is an error.
    async fn grant_achievement(
        &self,
        user_id: i32,
        achievement_id: i32,
    ) -> Result<UserAchievement, AchievementsServiceError>;

    /// The achievements granted to a user, oldest grant first.
    async fn achievements_for_user(
        &self,
        user_id: i32,
    ) -> Result<Vec<Achievement>, AchievementsServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn grant_and_list_for_user() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;

        let achievement = ctx
            .achievements
            .create_achievement(NewAchievement {
                title: "First order".to_string(),
                description: None,
            })
            .await?;

        let granted = ctx
            .achievements
            .grant_achievement(user.user_id, achievement.achievement_id)
            .await?;

        assert_eq!(granted.user_id, user.user_id);

        let achievements = ctx.achievements.achievements_for_user(user.user_id).await?;

        assert_eq!(achievements.len(), 1);
        assert_eq!(achievements[0].title, "First order");

        Ok(())
    }

    #[tokio::test]
    async fn double_grant_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        let user = ctx.create_user("ada").await;

        let achievement = ctx
            .achievements
            .create_achievement(NewAchievement {
                title: "First order".to_string(),
                description: None,
            })
            .await?;

        ctx.achievements
            .grant_achievement(user.user_id, achievement.achievement_id)
            .await?;

        let result = ctx
            .achievements
            .grant_achievement(user.user_id, achievement.achievement_id)
            .await;

        assert!(
            matches!(result, Err(AchievementsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn grant_to_unknown_user_returns_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let achievement = ctx
            .achievements
            .create_achievement(NewAchievement {
                title: "First order".to_string(),
                description: None,
            })
            .await?;

        let result = ctx
            .achievements
            .grant_achievement(4242, achievement.achievement_id)
            .await;

        assert!(
            matches!(result, Err(AchievementsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn delete_achievement_makes_it_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let achievement = ctx
            .achievements
            .create_achievement(NewAchievement {
                title: "First order".to_string(),
                description: None,
            })
            .await?;

        ctx.achievements
            .delete_achievement(achievement.achievement_id)
            .await?;

        let result = ctx
            .achievements
            .get_achievement(achievement.achievement_id)
            .await;

        assert!(
            matches!(result, Err(AchievementsServiceError::NotFound)),
            "expected NotFound after deletion, got {result:?}"
        );

        Ok(())
    }
}
