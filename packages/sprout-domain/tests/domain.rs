use time::macros::datetime;
use uuid::Uuid;

use sprout_domain::{
	handle::{self, IdentitySeed},
	leaderboard::{self, Category, CategoryFilter, IdeaStats, TimeWindow},
	roster::{self, Roster},
	vote::{self, VoteKind},
};

fn stats(category: Category, created_at: time::OffsetDateTime, up: u32, down: u32, potential: u8) -> IdeaStats {
	IdeaStats { id: Uuid::new_v4(), category, created_at, upvotes: up, downvotes: down, potential_score: potential }
}

#[test]
fn category_labels_round_trip_through_serde() {
	assert_eq!(serde_json::to_string(&Category::Primary).expect("serialize"), "\"primary\"");
	assert_eq!(
		serde_json::from_str::<Category>("\"secondary\"").expect("deserialize"),
		Category::Secondary
	);
	assert_eq!(serde_json::to_string(&VoteKind::Down).expect("serialize"), "\"down\"");
}

#[test]
fn leaderboard_output_is_bounded_by_surviving_input() {
	let now = datetime!(2025-06-15 12:00:00 UTC);
	let ideas = vec![
		stats(Category::Primary, now - time::Duration::days(1), 4, 0, 10),
		stats(Category::Secondary, now - time::Duration::days(20), 9, 0, 90),
	];
	let ranked = leaderboard::rank(ideas, CategoryFilter::All, TimeWindow::Week, now);

	assert_eq!(ranked.len(), 1);
	assert_eq!(ranked[0].rank, 1);
}

#[test]
fn derived_handles_are_always_lowercase_alphanumeric() {
	let seeds = [
		IdentitySeed {
			first_name: Some("Ana-María".to_string()),
			last_name: Some("O'Lee".to_string()),
			email: "am@x.com".to_string(),
			stable_id: "ckq1abcd9876".to_string(),
		},
		IdentitySeed {
			first_name: None,
			last_name: None,
			email: "++@x.com".to_string(),
			stable_id: "ckq1abcd9876".to_string(),
		},
	];

	for seed in seeds {
		let handle = handle::derive(&seed).expect("valid seed");

		assert!((2..=handle::MAX_HANDLE_LEN).contains(&handle.len()));
		assert!(handle.chars().all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit()));
	}
}

#[test]
fn vote_toggle_round_trip_is_neutral() {
	let first = vote::transition(None, VoteKind::Up);
	let second = vote::transition(first.next, VoteKind::Up);

	assert_eq!(second.next, None);
	assert_eq!(first.delta.upvotes + second.delta.upvotes, 0);
	assert_eq!(first.delta.downvotes + second.delta.downvotes, 0);
}

#[test]
fn roster_backs_the_refresh_ownership_gate() {
	let roster = Roster::new(["mod-1".to_string()]);

	assert!(roster::can_manage("owner", "owner", &roster));
	assert!(roster::can_manage("mod-1", "owner", &roster));
	assert!(!roster::can_manage("visitor", "owner", &roster));
}
