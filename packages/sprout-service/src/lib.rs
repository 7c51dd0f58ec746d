pub mod handles;
pub mod leaderboard;
pub mod refresh;
pub mod votes;

mod error;

pub use error::{Error, Result};
pub use handles::{AssignHandleRequest, HandleAssignment};
pub use leaderboard::{LeaderboardItem, LeaderboardRequest, LeaderboardResponse};
pub use refresh::{RefreshRequest, RefreshResponse};
pub use votes::{CastVoteRequest, CastVoteResponse};

use std::{future::Future, pin::Pin, sync::Arc};

use sprout_config::{Config, OracleConfig};
use sprout_domain::{
	leaderboard::{Category, IdeaStats},
	roster::Roster,
};
use sprout_providers::scoring::{self, Analysis};
use sprout_storage::{
	models::IdeaRecord,
	store::{IdeaStore, ProfileStore},
};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// External scoring service, abstracted so tests can count calls and script
/// failures. The default implementation delegates to [`sprout_providers::scoring`].
pub trait ScoringOracle
where
	Self: Send + Sync,
{
	fn analyze<'a>(
		&'a self,
		cfg: &'a OracleConfig,
		title: &'a str,
		pitch: &'a str,
		details: Option<&'a str>,
	) -> BoxFuture<'a, sprout_providers::Result<Analysis>>;
}

struct DefaultOracle;
impl ScoringOracle for DefaultOracle {
	fn analyze<'a>(
		&'a self,
		cfg: &'a OracleConfig,
		title: &'a str,
		pitch: &'a str,
		details: Option<&'a str>,
	) -> BoxFuture<'a, sprout_providers::Result<Analysis>> {
		Box::pin(scoring::analyze(cfg, title, pitch, details))
	}
}

pub struct SproutService {
	pub cfg: Config,
	pub roster: Roster,
	pub ideas: Arc<dyn IdeaStore>,
	pub profiles: Arc<dyn ProfileStore>,
	pub oracle: Arc<dyn ScoringOracle>,
}
impl SproutService {
	/// The admin roster is resolved from config exactly once, here, so authorization
	/// never reaches into process environment.
	pub fn new(
		cfg: Config,
		ideas: Arc<dyn IdeaStore>,
		profiles: Arc<dyn ProfileStore>,
		oracle: Arc<dyn ScoringOracle>,
	) -> Self {
		let roster = Roster::new(cfg.admins.user_ids.iter().cloned());

		Self { cfg, roster, ideas, profiles, oracle }
	}

	pub fn with_default_oracle(
		cfg: Config,
		ideas: Arc<dyn IdeaStore>,
		profiles: Arc<dyn ProfileStore>,
	) -> Self {
		Self::new(cfg, ideas, profiles, Arc::new(DefaultOracle))
	}
}

/// Projects a storage row into ranking input. Rows with labels the ranking layer
/// does not know are skipped rather than failing the whole board.
pub(crate) fn idea_stats(record: &IdeaRecord) -> Option<IdeaStats> {
	let category = match record.category.as_str() {
		"primary" => Category::Primary,
		"secondary" => Category::Secondary,
		other => {
			tracing::warn!(idea_id = %record.idea_id, category = other, "Idea has an unknown category label.");

			return None;
		},
	};

	Some(IdeaStats {
		id: record.idea_id,
		category,
		created_at: record.created_at,
		upvotes: clamp_counter(record.upvotes),
		downvotes: clamp_counter(record.downvotes),
		potential_score: record.potential_score.clamp(0, 100) as u8,
	})
}

fn clamp_counter(raw: i64) -> u32 {
	raw.clamp(0, i64::from(u32::MAX)) as u32
}
