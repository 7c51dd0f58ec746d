use std::{future::Future, pin::Pin};

use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
	Result,
	models::{IdeaRecord, ProfileRecord},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Idea persistence as the service consumes it. The Postgres implementation lives in
/// [`crate::db::Db`]; tests substitute in-memory stores behind the same seam.
pub trait IdeaStore
where
	Self: Send + Sync,
{
	/// Every published idea, newest first, unbounded. The ranking layer truncates
	/// only after sorting, so no LIMIT may be applied here.
	fn fetch_published<'a>(&'a self) -> BoxFuture<'a, Result<Vec<IdeaRecord>>>;

	fn fetch_idea<'a>(&'a self, idea_id: Uuid) -> BoxFuture<'a, Result<Option<IdeaRecord>>>;

	/// Replaces summary and potential score and stamps `updated_at`, all in one
	/// write. Fails with [`crate::Error::NotFound`] when the idea is gone.
	fn apply_analysis<'a>(
		&'a self,
		idea_id: Uuid,
		summary: &'a str,
		potential_score: u8,
		updated_at: OffsetDateTime,
	) -> BoxFuture<'a, Result<IdeaRecord>>;

	fn fetch_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
	) -> BoxFuture<'a, Result<Option<String>>>;

	/// Persists the voter's next state (`None` clears the row) and adjusts the
	/// idea's counters in the same write.
	fn apply_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
		next: Option<&'a str>,
		upvote_delta: i64,
		downvote_delta: i64,
	) -> BoxFuture<'a, Result<IdeaRecord>>;
}

pub trait ProfileStore
where
	Self: Send + Sync,
{
	fn fetch_profile<'a>(
		&'a self,
		profile_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRecord>>>;

	/// Fails with [`crate::Error::Conflict`] when another profile already holds
	/// `handle`; disambiguation is the caller's call.
	fn claim_handle<'a>(
		&'a self,
		profile_id: &'a str,
		handle: &'a str,
	) -> BoxFuture<'a, Result<ProfileRecord>>;
}
