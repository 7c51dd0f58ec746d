use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{Result, SproutService};
use sprout_domain::leaderboard::{self, CategoryFilter, TimeWindow};

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct LeaderboardRequest {
	/// "primary" | "secondary"; anything else (or absence) means all categories.
	pub category: Option<String>,
	/// "today" | "week" | "month"; anything else (or absence) means all time.
	pub window: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LeaderboardItem {
	pub rank: u32,
	pub idea_id: Uuid,
	pub title: String,
	pub summary: Option<String>,
	pub category: String,
	pub net_score: i64,
	pub upvotes: u32,
	pub downvotes: u32,
	pub potential_score: u8,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LeaderboardResponse {
	pub items: Vec<LeaderboardItem>,
}

impl SproutService {
	pub async fn leaderboard(&self, req: LeaderboardRequest) -> Result<LeaderboardResponse> {
		self.leaderboard_at(req, OffsetDateTime::now_utc()).await
	}

	/// Clock-injected variant; `leaderboard` only supplies `now`. Keeping the body
	/// here lets tests pin the window boundaries exactly.
	pub async fn leaderboard_at(
		&self,
		req: LeaderboardRequest,
		now: OffsetDateTime,
	) -> Result<LeaderboardResponse> {
		let category = req.category.as_deref().map(CategoryFilter::from_param).unwrap_or_default();
		let window = req.window.as_deref().map(TimeWindow::from_param).unwrap_or_default();
		let records = self.ideas.fetch_published().await?;
		// The projection walks the store's recency order, so full-tie ranking falls
		// back to newest-first.
		let stats = records.iter().filter_map(crate::idea_stats).collect::<Vec<_>>();
		let ranked = leaderboard::rank(stats, category, window, now);
		let mut by_id =
			records.into_iter().map(|record| (record.idea_id, record)).collect::<HashMap<_, _>>();
		let items = ranked
			.into_iter()
			.filter_map(|entry| {
				let record = by_id.remove(&entry.stats.id)?;

				Some(LeaderboardItem {
					rank: entry.rank,
					idea_id: record.idea_id,
					title: record.title,
					summary: record.summary,
					category: record.category,
					net_score: entry.net_score,
					upvotes: entry.stats.upvotes,
					downvotes: entry.stats.downvotes,
					potential_score: entry.stats.potential_score,
				})
			})
			.collect();

		Ok(LeaderboardResponse { items })
	}
}
