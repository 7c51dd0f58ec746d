use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Error, Result, SproutService};
use sprout_domain::roster;
use sprout_storage::models::IdeaRecord;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct RefreshRequest {
	pub idea_id: Uuid,
	pub requester_id: String,
}

/// The updated record plus the two refreshed fields on their own, so callers never
/// have to dig them back out of the record.
#[derive(Clone, Debug)]
pub struct RefreshResponse {
	pub idea: IdeaRecord,
	pub summary: String,
	pub potential_score: u8,
}

impl SproutService {
	pub async fn refresh_analysis(&self, req: RefreshRequest) -> Result<RefreshResponse> {
		let requester_id = req.requester_id.trim();

		if requester_id.is_empty() {
			return Err(Error::InvalidInput { message: "requester_id is required.".to_string() });
		}

		let idea = self.ideas.fetch_idea(req.idea_id).await?.ok_or_else(|| Error::NotFound {
			message: format!("Idea {} does not exist.", req.idea_id),
		})?;

		// Fail closed before the oracle is involved; a denied refresh must not spend
		// an external call.
		if !roster::can_manage(requester_id, &idea.owner_id, &self.roster) {
			return Err(Error::Forbidden {
				message: "Only the idea's owner may refresh its analysis.".to_string(),
			});
		}

		// Always analyze the original pitch, never a summary left by a prior run.
		let analysis = self
			.oracle
			.analyze(&self.cfg.oracle, &idea.title, &idea.pitch, idea.details.as_deref())
			.await
			.map_err(|err| {
				tracing::warn!(idea_id = %req.idea_id, error = %err, "Scoring oracle call failed.");

				Error::OracleUnavailable { message: err.to_string() }
			})?;
		// Single write, issued only once the oracle call has fully completed: both
		// fields land together or not at all, and a cancelled request changes nothing.
		let updated = self
			.ideas
			.apply_analysis(
				req.idea_id,
				&analysis.summary,
				analysis.score,
				OffsetDateTime::now_utc(),
			)
			.await?;

		Ok(RefreshResponse {
			idea: updated,
			summary: analysis.summary,
			potential_score: analysis.score,
		})
	}
}
