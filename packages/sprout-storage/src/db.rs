use sqlx::{PgPool, postgres::PgPoolOptions};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Error, Result,
	models::{IdeaRecord, ProfileRecord, STATUS_PUBLISHED},
	store::{BoxFuture, IdeaStore, ProfileStore},
};

const IDEA_COLUMNS: &str = "\
idea_id, owner_id, title, pitch, details, summary, category, status, upvotes, downvotes, \
potential_score, created_at, updated_at";

const PROFILE_COLUMNS: &str = "profile_id, email, first_name, last_name, handle";

pub struct Db {
	pub pool: PgPool,
}
impl Db {
	pub async fn connect(cfg: &sprout_config::Postgres) -> Result<Self> {
		let pool =
			PgPoolOptions::new().max_connections(cfg.pool_max_conns).connect(&cfg.dsn).await?;

		Ok(Self { pool })
	}
}

impl IdeaStore for Db {
	fn fetch_published<'a>(&'a self) -> BoxFuture<'a, Result<Vec<IdeaRecord>>> {
		Box::pin(async move {
			let rows = sqlx::query_as::<_, IdeaRecord>(&format!(
				"\
SELECT {IDEA_COLUMNS}
FROM ideas
WHERE status = $1
ORDER BY created_at DESC",
			))
			.bind(STATUS_PUBLISHED)
			.fetch_all(&self.pool)
			.await?;

			Ok(rows)
		})
	}

	fn fetch_idea<'a>(&'a self, idea_id: Uuid) -> BoxFuture<'a, Result<Option<IdeaRecord>>> {
		Box::pin(async move {
			let row = sqlx::query_as::<_, IdeaRecord>(&format!(
				"\
SELECT {IDEA_COLUMNS}
FROM ideas
WHERE idea_id = $1",
			))
			.bind(idea_id)
			.fetch_optional(&self.pool)
			.await?;

			Ok(row)
		})
	}

	fn apply_analysis<'a>(
		&'a self,
		idea_id: Uuid,
		summary: &'a str,
		potential_score: u8,
		updated_at: OffsetDateTime,
	) -> BoxFuture<'a, Result<IdeaRecord>> {
		Box::pin(async move {
			sqlx::query_as::<_, IdeaRecord>(&format!(
				"\
UPDATE ideas
SET
	summary = $2,
	potential_score = $3,
	updated_at = $4
WHERE idea_id = $1
RETURNING {IDEA_COLUMNS}",
			))
			.bind(idea_id)
			.bind(summary)
			.bind(i32::from(potential_score))
			.bind(updated_at)
			.fetch_optional(&self.pool)
			.await?
			.ok_or_else(|| Error::NotFound(format!("Idea {idea_id} is gone.")))
		})
	}

	fn fetch_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
	) -> BoxFuture<'a, Result<Option<String>>> {
		Box::pin(async move {
			let row: Option<(String,)> = sqlx::query_as(
				"\
SELECT kind
FROM idea_votes
WHERE idea_id = $1 AND voter_id = $2",
			)
			.bind(idea_id)
			.bind(voter_id)
			.fetch_optional(&self.pool)
			.await?;

			Ok(row.map(|(kind,)| kind))
		})
	}

	fn apply_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
		next: Option<&'a str>,
		upvote_delta: i64,
		downvote_delta: i64,
	) -> BoxFuture<'a, Result<IdeaRecord>> {
		Box::pin(async move {
			let mut tx = self.pool.begin().await?;

			match next {
				Some(kind) => {
					sqlx::query(
						"\
INSERT INTO idea_votes (idea_id, voter_id, kind)
VALUES ($1, $2, $3)
ON CONFLICT (idea_id, voter_id)
DO UPDATE SET kind = EXCLUDED.kind",
					)
					.bind(idea_id)
					.bind(voter_id)
					.bind(kind)
					.execute(&mut *tx)
					.await?;
				},
				None => {
					sqlx::query("DELETE FROM idea_votes WHERE idea_id = $1 AND voter_id = $2")
						.bind(idea_id)
						.bind(voter_id)
						.execute(&mut *tx)
						.await?;
				},
			}

			let record = sqlx::query_as::<_, IdeaRecord>(&format!(
				"\
UPDATE ideas
SET
	upvotes = GREATEST(upvotes + $2, 0),
	downvotes = GREATEST(downvotes + $3, 0)
WHERE idea_id = $1
RETURNING {IDEA_COLUMNS}",
			))
			.bind(idea_id)
			.bind(upvote_delta)
			.bind(downvote_delta)
			.fetch_optional(&mut *tx)
			.await?
			.ok_or_else(|| Error::NotFound(format!("Idea {idea_id} is gone.")))?;

			tx.commit().await?;

			Ok(record)
		})
	}
}

impl ProfileStore for Db {
	fn fetch_profile<'a>(
		&'a self,
		profile_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRecord>>> {
		Box::pin(async move {
			let row = sqlx::query_as::<_, ProfileRecord>(&format!(
				"\
SELECT {PROFILE_COLUMNS}
FROM profiles
WHERE profile_id = $1",
			))
			.bind(profile_id)
			.fetch_optional(&self.pool)
			.await?;

			Ok(row)
		})
	}

	fn claim_handle<'a>(
		&'a self,
		profile_id: &'a str,
		handle: &'a str,
	) -> BoxFuture<'a, Result<ProfileRecord>> {
		Box::pin(async move {
			let claimed = sqlx::query_as::<_, ProfileRecord>(&format!(
				"\
UPDATE profiles
SET handle = $2
WHERE profile_id = $1
RETURNING {PROFILE_COLUMNS}",
			))
			.bind(profile_id)
			.bind(handle)
			.fetch_optional(&self.pool)
			.await;

			match claimed {
				Ok(Some(profile)) => Ok(profile),
				Ok(None) => Err(Error::NotFound(format!("Profile {profile_id} is gone."))),
				Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() =>
					Err(Error::Conflict(format!("Handle {handle} is already taken."))),
				Err(err) => Err(err.into()),
			}
		})
	}
}
