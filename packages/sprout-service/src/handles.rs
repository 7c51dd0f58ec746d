use serde::{Deserialize, Serialize};

use crate::{Error, Result, SproutService};
use sprout_domain::handle::{self, IdentitySeed, SeedError};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AssignHandleRequest {
	pub profile_id: String,
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct HandleAssignment {
	pub profile_id: String,
	pub handle: String,
	pub newly_assigned: bool,
}

impl SproutService {
	/// Gives a profile its derived handle. Idempotent: a profile that already has one
	/// is returned as-is, with no derivation and no write.
	pub async fn assign_handle(&self, req: AssignHandleRequest) -> Result<HandleAssignment> {
		let profile_id = req.profile_id.trim();

		if profile_id.is_empty() {
			return Err(Error::InvalidInput { message: "profile_id is required.".to_string() });
		}

		let profile =
			self.profiles.fetch_profile(profile_id).await?.ok_or_else(|| Error::NotFound {
				message: format!("Profile {profile_id} does not exist."),
			})?;

		if let Some(existing) = profile.handle {
			return Ok(HandleAssignment {
				profile_id: profile.profile_id,
				handle: existing,
				newly_assigned: false,
			});
		}

		let seed = IdentitySeed {
			first_name: profile.first_name,
			last_name: profile.last_name,
			email: profile.email,
			stable_id: profile.profile_id.clone(),
		};
		let handle = handle::derive(&seed)
			.map_err(|err| Error::InvalidInput { message: seed_error_message(err).to_string() })?;
		// A Conflict from the store means the suffix did not disambiguate; it is
		// surfaced, not resolved here.
		let claimed = self.profiles.claim_handle(&profile.profile_id, &handle).await?;

		Ok(HandleAssignment { profile_id: claimed.profile_id, handle, newly_assigned: true })
	}
}

fn seed_error_message(err: SeedError) -> &'static str {
	match err {
		SeedError::EmptyEmail => "Profile email must be non-empty.",
		SeedError::ShortStableId => "Profile id must be at least four characters long.",
	}
}
