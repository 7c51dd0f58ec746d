use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result, SproutService};
use sprout_domain::vote::{self, VoteKind};
use sprout_storage::models::{VOTE_DOWN, VOTE_UP};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct CastVoteRequest {
	pub idea_id: Uuid,
	pub voter_id: String,
	pub kind: VoteKind,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct CastVoteResponse {
	pub idea_id: Uuid,
	/// The voter's state after the cast; `None` when the cast removed their vote.
	pub vote: Option<VoteKind>,
	pub upvotes: i64,
	pub downvotes: i64,
}

impl SproutService {
	pub async fn cast_vote(&self, req: CastVoteRequest) -> Result<CastVoteResponse> {
		let voter_id = req.voter_id.trim();

		if voter_id.is_empty() {
			return Err(Error::InvalidInput { message: "voter_id is required.".to_string() });
		}
		if self.ideas.fetch_idea(req.idea_id).await?.is_none() {
			return Err(Error::NotFound {
				message: format!("Idea {} does not exist.", req.idea_id),
			});
		}

		let held = self
			.ideas
			.fetch_vote(req.idea_id, voter_id)
			.await?
			.as_deref()
			.and_then(kind_from_label);
		let outcome = vote::transition(held, req.kind);
		let record = self
			.ideas
			.apply_vote(
				req.idea_id,
				voter_id,
				outcome.next.map(kind_label),
				outcome.delta.upvotes,
				outcome.delta.downvotes,
			)
			.await?;

		Ok(CastVoteResponse {
			idea_id: record.idea_id,
			vote: outcome.next,
			upvotes: record.upvotes,
			downvotes: record.downvotes,
		})
	}
}

fn kind_label(kind: VoteKind) -> &'static str {
	match kind {
		VoteKind::Up => VOTE_UP,
		VoteKind::Down => VOTE_DOWN,
	}
}

fn kind_from_label(label: &str) -> Option<VoteKind> {
	match label {
		VOTE_UP => Some(VoteKind::Up),
		VOTE_DOWN => Some(VoteKind::Down),
		_ => None,
	}
}
