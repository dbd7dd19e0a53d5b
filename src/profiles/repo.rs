use async_trait::async_trait;
use sqlx::{types::Json, PgPool};
use uuid::Uuid;

use crate::profiles::repo_types::{PopulatedProfileRow, Profile, ProfileFields, ProfileRow};

#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Creates the user's profile or updates it in place, as one atomic write.
    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> anyhow::Result<Profile>;

    /// Profile of `user_id` with the owner populated.
    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>>;

    /// Every profile with its owner populated, newest first.
    async fn list(&self) -> anyhow::Result<Vec<Profile>>;
}

#[derive(Clone)]
pub struct PgProfileStore {
    db: PgPool,
}

impl PgProfileStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

const POPULATED_SELECT: &str = r#"
    SELECT p.id, p.user_id, p.company, p.website, p.location, p.status, p.skills,
           p.bio, p.githubusername, p.social, p.extra, p.created_at, p.updated_at,
           u.name AS owner_name, u.avatar AS owner_avatar
    FROM profiles p
    JOIN users u ON u.id = p.user_id
"#;

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn upsert(&self, user_id: Uuid, fields: ProfileFields) -> anyhow::Result<Profile> {
        // Optional text fields keep their stored value when omitted. Social
        // links and extra attributes are replaced as a whole.
        let row = sqlx::query_as::<_, ProfileRow>(
            r#"
            INSERT INTO profiles
                (user_id, website, status, skills, company, location, bio, githubusername, social, extra)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (user_id) DO UPDATE SET
                website = EXCLUDED.website,
                status = EXCLUDED.status,
                skills = EXCLUDED.skills,
                company = COALESCE(EXCLUDED.company, profiles.company),
                location = COALESCE(EXCLUDED.location, profiles.location),
                bio = COALESCE(EXCLUDED.bio, profiles.bio),
                githubusername = COALESCE(EXCLUDED.githubusername, profiles.githubusername),
                social = EXCLUDED.social,
                extra = EXCLUDED.extra,
                updated_at = now()
            RETURNING id, user_id, company, website, location, status, skills, bio,
                      githubusername, social, extra, created_at, updated_at
            "#,
        )
        .bind(user_id)
        .bind(&fields.website)
        .bind(&fields.status)
        .bind(&fields.skills)
        .bind(&fields.company)
        .bind(&fields.location)
        .bind(&fields.bio)
        .bind(&fields.githubusername)
        .bind(Json(&fields.social))
        .bind(Json(&fields.extra))
        .fetch_one(&self.db)
        .await?;
        Ok(row.into())
    }

    async fn find_by_user(&self, user_id: Uuid) -> anyhow::Result<Option<Profile>> {
        let row = sqlx::query_as::<_, PopulatedProfileRow>(&format!(
            "{POPULATED_SELECT} WHERE p.user_id = $1"
        ))
        .bind(user_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(row.map(Profile::from))
    }

    async fn list(&self) -> anyhow::Result<Vec<Profile>> {
        let rows = sqlx::query_as::<_, PopulatedProfileRow>(&format!(
            "{POPULATED_SELECT} ORDER BY p.created_at DESC"
        ))
        .fetch_all(&self.db)
        .await?;
        Ok(rows.into_iter().map(Profile::from).collect())
    }
}
