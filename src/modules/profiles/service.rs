use sqlx::PgPool;
use tracing::instrument;

use zoskagram_auth::Identity;
use zoskagram_core::AppError;
use zoskagram_models::{Profile, UpsertProfileDto};

pub struct ProfileService;

impl ProfileService {
    /// Whether `identity` already has a profile.
    #[instrument(skip(db), fields(subject_id = %identity.subject_id()))]
    pub async fn exists(db: &PgPool, identity: &Identity) -> Result<bool, AppError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"SELECT EXISTS(SELECT 1 FROM profiles WHERE owner_id = $1)"#,
        )
        .bind(identity.subject_id())
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        Ok(exists)
    }

    #[instrument(skip(db), fields(subject_id = %identity.subject_id()))]
    pub async fn find_own(db: &PgPool, identity: &Identity) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"SELECT owner_id, username, full_name, bio, created_at, updated_at
               FROM profiles
               WHERE owner_id = $1"#,
        )
        .bind(identity.subject_id())
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        Ok(profile)
    }

    /// Creates the caller's profile, or updates it if it already exists.
    #[instrument(skip(db, dto), fields(subject_id = %identity.subject_id()))]
    pub async fn upsert_own(
        db: &PgPool,
        identity: &Identity,
        dto: UpsertProfileDto,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"INSERT INTO profiles (owner_id, username, full_name, bio)
               VALUES ($1, $2, $3, $4)
               ON CONFLICT (owner_id) DO UPDATE
               SET username = EXCLUDED.username,
                   full_name = EXCLUDED.full_name,
                   bio = EXCLUDED.bio,
                   updated_at = NOW()
               RETURNING owner_id, username, full_name, bio, created_at, updated_at"#,
        )
        .bind(identity.subject_id())
        .bind(&dto.username)
        .bind(&dto.full_name)
        .bind(&dto.bio)
        .fetch_one(db)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e
                && db_err.is_unique_violation()
            {
                return AppError::conflict("This username is already taken");
            }
            AppError::database(e)
        })?;

        tracing::info!(username = %profile.username, "Profile saved");

        Ok(profile)
    }
}
