//! In-memory store implementations and record builders for Sprout test suites.
//! Everything here is hermetic; no database or network is touched.

use std::{
	collections::HashMap,
	sync::Mutex,
};

use time::OffsetDateTime;
use uuid::Uuid;

use sprout_storage::{
	Error, Result,
	models::{IdeaRecord, ProfileRecord, STATUS_PUBLISHED},
	store::{BoxFuture, IdeaStore, ProfileStore},
};

/// Builds a published idea with quiet counters; tests overwrite what they care about.
pub fn idea(owner_id: &str, title: &str, created_at: OffsetDateTime) -> IdeaRecord {
	IdeaRecord {
		idea_id: Uuid::new_v4(),
		owner_id: owner_id.to_string(),
		title: title.to_string(),
		pitch: format!("Original pitch for {title}."),
		details: None,
		summary: None,
		category: "primary".to_string(),
		status: STATUS_PUBLISHED.to_string(),
		upvotes: 0,
		downvotes: 0,
		potential_score: 0,
		created_at,
		updated_at: created_at,
	}
}

pub fn profile(profile_id: &str, email: &str) -> ProfileRecord {
	ProfileRecord {
		profile_id: profile_id.to_string(),
		email: email.to_string(),
		first_name: None,
		last_name: None,
		handle: None,
	}
}

pub struct MemoryIdeas {
	ideas: Mutex<Vec<IdeaRecord>>,
	votes: Mutex<HashMap<(Uuid, String), String>>,
}
impl MemoryIdeas {
	pub fn new(records: Vec<IdeaRecord>) -> Self {
		Self { ideas: Mutex::new(records), votes: Mutex::new(HashMap::new()) }
	}

	/// Current state of one idea, for before/after assertions around failed
	/// mutations.
	pub fn snapshot(&self, idea_id: Uuid) -> Option<IdeaRecord> {
		let ideas = self.ideas.lock().unwrap_or_else(|err| err.into_inner());

		ideas.iter().find(|idea| idea.idea_id == idea_id).cloned()
	}
}
impl IdeaStore for MemoryIdeas {
	fn fetch_published<'a>(&'a self) -> BoxFuture<'a, Result<Vec<IdeaRecord>>> {
		let ideas = self.ideas.lock().unwrap_or_else(|err| err.into_inner());
		let mut published = ideas
			.iter()
			.filter(|idea| idea.status == STATUS_PUBLISHED)
			.cloned()
			.collect::<Vec<_>>();

		// Newest first, matching the Postgres store's ORDER BY.
		published.sort_by(|left, right| right.created_at.cmp(&left.created_at));

		Box::pin(async move { Ok(published) })
	}

	fn fetch_idea<'a>(&'a self, idea_id: Uuid) -> BoxFuture<'a, Result<Option<IdeaRecord>>> {
		let found = self.snapshot(idea_id);

		Box::pin(async move { Ok(found) })
	}

	fn apply_analysis<'a>(
		&'a self,
		idea_id: Uuid,
		summary: &'a str,
		potential_score: u8,
		updated_at: OffsetDateTime,
	) -> BoxFuture<'a, Result<IdeaRecord>> {
		let mut ideas = self.ideas.lock().unwrap_or_else(|err| err.into_inner());
		let updated = ideas.iter_mut().find(|idea| idea.idea_id == idea_id).map(|idea| {
			idea.summary = Some(summary.to_string());
			idea.potential_score = i32::from(potential_score);
			idea.updated_at = updated_at;

			idea.clone()
		});

		Box::pin(async move {
			updated.ok_or_else(|| Error::NotFound(format!("Idea {idea_id} is gone.")))
		})
	}

	fn fetch_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
	) -> BoxFuture<'a, Result<Option<String>>> {
		let votes = self.votes.lock().unwrap_or_else(|err| err.into_inner());
		let held = votes.get(&(idea_id, voter_id.to_string())).cloned();

		Box::pin(async move { Ok(held) })
	}

	fn apply_vote<'a>(
		&'a self,
		idea_id: Uuid,
		voter_id: &'a str,
		next: Option<&'a str>,
		upvote_delta: i64,
		downvote_delta: i64,
	) -> BoxFuture<'a, Result<IdeaRecord>> {
		{
			let mut votes = self.votes.lock().unwrap_or_else(|err| err.into_inner());

			match next {
				Some(kind) => {
					votes.insert((idea_id, voter_id.to_string()), kind.to_string());
				},
				None => {
					votes.remove(&(idea_id, voter_id.to_string()));
				},
			}
		}

		let mut ideas = self.ideas.lock().unwrap_or_else(|err| err.into_inner());
		let updated = ideas.iter_mut().find(|idea| idea.idea_id == idea_id).map(|idea| {
			idea.upvotes = (idea.upvotes + upvote_delta).max(0);
			idea.downvotes = (idea.downvotes + downvote_delta).max(0);

			idea.clone()
		});

		Box::pin(async move {
			updated.ok_or_else(|| Error::NotFound(format!("Idea {idea_id} is gone.")))
		})
	}
}

pub struct MemoryProfiles {
	profiles: Mutex<Vec<ProfileRecord>>,
}
impl MemoryProfiles {
	pub fn new(records: Vec<ProfileRecord>) -> Self {
		Self { profiles: Mutex::new(records) }
	}

	pub fn snapshot(&self, profile_id: &str) -> Option<ProfileRecord> {
		let profiles = self.profiles.lock().unwrap_or_else(|err| err.into_inner());

		profiles.iter().find(|profile| profile.profile_id == profile_id).cloned()
	}
}
impl ProfileStore for MemoryProfiles {
	fn fetch_profile<'a>(
		&'a self,
		profile_id: &'a str,
	) -> BoxFuture<'a, Result<Option<ProfileRecord>>> {
		let found = self.snapshot(profile_id);

		Box::pin(async move { Ok(found) })
	}

	fn claim_handle<'a>(
		&'a self,
		profile_id: &'a str,
		handle: &'a str,
	) -> BoxFuture<'a, Result<ProfileRecord>> {
		let mut profiles = self.profiles.lock().unwrap_or_else(|err| err.into_inner());
		let taken = profiles
			.iter()
			.any(|profile| profile.profile_id != profile_id && profile.handle.as_deref() == Some(handle));
		let result = if taken {
			Err(Error::Conflict(format!("Handle {handle} is already taken.")))
		} else {
			profiles
				.iter_mut()
				.find(|profile| profile.profile_id == profile_id)
				.map(|profile| {
					profile.handle = Some(handle.to_string());

					profile.clone()
				})
				.ok_or_else(|| Error::NotFound(format!("Profile {profile_id} is gone.")))
		};

		Box::pin(async move { result })
	}
}
