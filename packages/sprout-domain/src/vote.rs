use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VoteKind {
	Up,
	Down,
}

/// Signed counter adjustment to apply alongside the stored vote state.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoteDelta {
	pub upvotes: i64,
	pub downvotes: i64,
}
impl VoteDelta {
	fn shift(&mut self, kind: VoteKind, amount: i64) {
		match kind {
			VoteKind::Up => self.upvotes += amount,
			VoteKind::Down => self.downvotes += amount,
		}
	}
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct VoteOutcome {
	/// Vote state to persist for this (idea, voter) pair after the cast.
	pub next: Option<VoteKind>,
	pub delta: VoteDelta,
}

/// Toggle semantics: re-casting the held kind removes the vote, casting the other
/// kind switches sides, and a fresh cast simply lands.
pub fn transition(current: Option<VoteKind>, cast: VoteKind) -> VoteOutcome {
	let next = match current {
		Some(held) if held == cast => None,
		_ => Some(cast),
	};
	let mut delta = VoteDelta::default();

	if let Some(held) = current {
		delta.shift(held, -1);
	}
	if let Some(next) = next {
		delta.shift(next, 1);
	}

	VoteOutcome { next, delta }
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn fresh_cast_lands() {
		let outcome = transition(None, VoteKind::Down);

		assert_eq!(outcome.next, Some(VoteKind::Down));
		assert_eq!(outcome.delta, VoteDelta { upvotes: 0, downvotes: 1 });
	}

	#[test]
	fn recasting_the_held_kind_removes_the_vote() {
		let outcome = transition(Some(VoteKind::Up), VoteKind::Up);

		assert_eq!(outcome.next, None);
		assert_eq!(outcome.delta, VoteDelta { upvotes: -1, downvotes: 0 });
	}

	#[test]
	fn casting_the_other_kind_switches_sides() {
		let outcome = transition(Some(VoteKind::Up), VoteKind::Down);

		assert_eq!(outcome.next, Some(VoteKind::Down));
		assert_eq!(outcome.delta, VoteDelta { upvotes: -1, downvotes: 1 });
	}
}
