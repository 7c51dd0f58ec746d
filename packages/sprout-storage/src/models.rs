use time::OffsetDateTime;
use uuid::Uuid;

/// Vote labels as stored in `idea_votes.kind`.
pub const VOTE_UP: &str = "up";
pub const VOTE_DOWN: &str = "down";

/// Idea visibility gate: only this status reaches the leaderboard.
pub const STATUS_PUBLISHED: &str = "published";

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct IdeaRecord {
	pub idea_id: Uuid,
	pub owner_id: String,
	pub title: String,
	/// The original free-text submission. Never overwritten; analysis always reads
	/// from here rather than from a previously generated summary.
	pub pitch: String,
	pub details: Option<String>,
	pub summary: Option<String>,
	pub category: String,
	pub status: String,
	pub upvotes: i64,
	pub downvotes: i64,
	pub potential_score: i32,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct ProfileRecord {
	pub profile_id: String,
	pub email: String,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub handle: Option<String>,
}
