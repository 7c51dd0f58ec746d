use std::collections::HashSet;

/// Moderation allow-list, resolved once from configuration at service construction
/// rather than read from process environment.
#[derive(Clone, Debug, Default)]
pub struct Roster {
	ids: HashSet<String>,
}
impl Roster {
	pub fn new<I, S>(ids: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self { ids: ids.into_iter().map(Into::into).collect() }
	}

	pub fn is_admin(&self, user_id: &str) -> bool {
		self.ids.contains(user_id)
	}
}

/// Ownership gate shared by mutating idea operations: the owner always passes,
/// roster members pass for any idea.
pub fn can_manage(requester_id: &str, owner_id: &str, roster: &Roster) -> bool {
	requester_id == owner_id || roster.is_admin(requester_id)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn owner_passes_without_roster_membership() {
		assert!(can_manage("u1", "u1", &Roster::default()));
	}

	#[test]
	fn roster_member_passes_for_any_owner() {
		let roster = Roster::new(["mod-1"]);

		assert!(can_manage("mod-1", "u2", &roster));
	}

	#[test]
	fn stranger_fails_closed() {
		let roster = Roster::new(["mod-1"]);

		assert!(!can_manage("u3", "u2", &roster));
	}
}
