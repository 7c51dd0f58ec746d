use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime, Time, util};
use uuid::Uuid;

/// Hard cap on leaderboard size, applied strictly after sorting.
pub const MAX_RESULTS: usize = 50;

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
	Primary,
	Secondary,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum CategoryFilter {
	#[default]
	All,
	Only(Category),
}
impl CategoryFilter {
	/// Unknown labels widen to `All`; a usable leaderboard beats strict validation here.
	pub fn from_param(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"primary" => Self::Only(Category::Primary),
			"secondary" => Self::Only(Category::Secondary),
			_ => Self::All,
		}
	}

	fn keeps(self, category: Category) -> bool {
		match self {
			Self::All => true,
			Self::Only(wanted) => category == wanted,
		}
	}
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimeWindow {
	Today,
	Week,
	Month,
	#[default]
	All,
}
impl TimeWindow {
	/// Unknown labels widen to `All`, same as [`CategoryFilter::from_param`].
	pub fn from_param(raw: &str) -> Self {
		match raw.trim().to_ascii_lowercase().as_str() {
			"today" => Self::Today,
			"week" => Self::Week,
			"month" => Self::Month,
			_ => Self::All,
		}
	}

	/// Inclusion cutoff relative to the injected `now`. Ideas created at the cutoff
	/// instant itself are kept; only strictly older ones fall out.
	pub fn cutoff(self, now: OffsetDateTime) -> Option<OffsetDateTime> {
		match self {
			Self::Today => Some(now.replace_time(Time::MIDNIGHT)),
			Self::Week => Some(now - Duration::days(7)),
			Self::Month => Some(one_month_before(now)),
			Self::All => None,
		}
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct IdeaStats {
	pub id: Uuid,
	pub category: Category,
	pub created_at: OffsetDateTime,
	pub upvotes: u32,
	pub downvotes: u32,
	pub potential_score: u8,
}
impl IdeaStats {
	pub fn net_score(&self) -> i64 {
		i64::from(self.upvotes) - i64::from(self.downvotes)
	}
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RankedIdea {
	pub stats: IdeaStats,
	pub net_score: i64,
	/// 1-based position in the final ordering. Dense and never shared; full ties
	/// keep the caller's order, so the earlier input gets the lower rank.
	pub rank: u32,
}

/// Filters, orders, and ranks the supplied ideas. Pure: the only clock involved is
/// the `now` argument, and identical input (including order) yields identical output.
pub fn rank(
	ideas: Vec<IdeaStats>,
	category: CategoryFilter,
	window: TimeWindow,
	now: OffsetDateTime,
) -> Vec<RankedIdea> {
	let cutoff = window.cutoff(now);
	let mut survivors = ideas
		.into_iter()
		.filter(|idea| cutoff.map(|cutoff| idea.created_at >= cutoff).unwrap_or(true))
		.filter(|idea| category.keeps(idea.category))
		.collect::<Vec<_>>();

	// Stable sort: ties on both keys must keep the caller's relative order.
	survivors.sort_by(|left, right| {
		right
			.net_score()
			.cmp(&left.net_score())
			.then_with(|| right.potential_score.cmp(&left.potential_score))
	});
	survivors.truncate(MAX_RESULTS);

	survivors
		.into_iter()
		.enumerate()
		.map(|(idx, stats)| RankedIdea { net_score: stats.net_score(), rank: idx as u32 + 1, stats })
		.collect()
}

fn one_month_before(now: OffsetDateTime) -> OffsetDateTime {
	let date = now.date();
	let (year, month) = match date.month() {
		Month::January => (date.year() - 1, Month::December),
		month => (date.year(), month.previous()),
	};
	// Clamp the day so e.g. Mar 31 lands on the last day of February.
	let day = date.day().min(util::days_in_year_month(year, month));

	Date::from_calendar_date(year, month, day).map(|date| now.replace_date(date)).unwrap_or(now)
}

#[cfg(test)]
mod tests {
	use time::macros::datetime;

	use super::*;

	fn idea(category: Category, age_days: i64, upvotes: u32, downvotes: u32, potential: u8) -> IdeaStats {
		IdeaStats {
			id: Uuid::new_v4(),
			category,
			created_at: now() - Duration::days(age_days),
			upvotes,
			downvotes,
			potential_score: potential,
		}
	}

	fn now() -> OffsetDateTime {
		datetime!(2025-06-15 12:30:00 UTC)
	}

	#[test]
	fn orders_by_net_score_then_potential() {
		let ideas = vec![
			idea(Category::Primary, 1, 5, 5, 90),
			idea(Category::Primary, 1, 8, 1, 10),
			idea(Category::Primary, 1, 5, 5, 95),
		];
		let ranked = rank(ideas.clone(), CategoryFilter::All, TimeWindow::All, now());

		assert_eq!(ranked[0].stats.id, ideas[1].id);
		assert_eq!(ranked[1].stats.id, ideas[2].id);
		assert_eq!(ranked[2].stats.id, ideas[0].id);
		assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2, 3]);
	}

	#[test]
	fn full_ties_keep_input_order() {
		let ideas = vec![
			idea(Category::Primary, 1, 3, 1, 50),
			idea(Category::Primary, 2, 3, 1, 50),
			idea(Category::Primary, 3, 3, 1, 50),
		];
		let ranked = rank(ideas.clone(), CategoryFilter::All, TimeWindow::All, now());
		let ids = ranked.iter().map(|r| r.stats.id).collect::<Vec<_>>();

		assert_eq!(ids, ideas.iter().map(|i| i.id).collect::<Vec<_>>());
	}

	#[test]
	fn negative_net_scores_sort_below_zero_and_positive() {
		let ideas = vec![
			idea(Category::Primary, 1, 0, 4, 99),
			idea(Category::Primary, 1, 0, 0, 0),
			idea(Category::Primary, 1, 2, 0, 0),
		];
		let ranked = rank(ideas, CategoryFilter::All, TimeWindow::All, now());
		let nets = ranked.iter().map(|r| r.net_score).collect::<Vec<_>>();

		assert_eq!(nets, vec![2, 0, -4]);
	}

	#[test]
	fn category_filter_drops_other_categories() {
		let ideas = vec![
			idea(Category::Primary, 1, 1, 0, 10),
			idea(Category::Secondary, 1, 9, 0, 10),
		];
		let ranked =
			rank(ideas, CategoryFilter::Only(Category::Primary), TimeWindow::All, now());

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].stats.category, Category::Primary);
	}

	#[test]
	fn week_cutoff_is_inclusive() {
		let boundary = IdeaStats {
			id: Uuid::new_v4(),
			category: Category::Primary,
			created_at: now() - Duration::days(7),
			upvotes: 1,
			downvotes: 0,
			potential_score: 10,
		};
		let older = idea(Category::Primary, 8, 9, 0, 99);
		let ranked = rank(vec![boundary.clone(), older], CategoryFilter::All, TimeWindow::Week, now());

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].stats.id, boundary.id);
	}

	#[test]
	fn today_cutoff_is_start_of_local_day() {
		let just_today = IdeaStats {
			id: Uuid::new_v4(),
			category: Category::Primary,
			created_at: datetime!(2025-06-15 00:00:00 UTC),
			upvotes: 1,
			downvotes: 0,
			potential_score: 10,
		};
		let yesterday = IdeaStats {
			id: Uuid::new_v4(),
			category: Category::Primary,
			created_at: datetime!(2025-06-14 23:59:59 UTC),
			upvotes: 9,
			downvotes: 0,
			potential_score: 99,
		};
		let ranked =
			rank(vec![just_today.clone(), yesterday], CategoryFilter::All, TimeWindow::Today, now());

		assert_eq!(ranked.len(), 1);
		assert_eq!(ranked[0].stats.id, just_today.id);
	}

	#[test]
	fn month_cutoff_clamps_day_of_month() {
		let now = datetime!(2025-03-31 09:00:00 UTC);

		assert_eq!(TimeWindow::Month.cutoff(now), Some(datetime!(2025-02-28 09:00:00 UTC)));

		let leap = datetime!(2024-03-31 09:00:00 UTC);

		assert_eq!(TimeWindow::Month.cutoff(leap), Some(datetime!(2024-02-29 09:00:00 UTC)));

		let january = datetime!(2025-01-15 09:00:00 UTC);

		assert_eq!(TimeWindow::Month.cutoff(january), Some(datetime!(2024-12-15 09:00:00 UTC)));
	}

	#[test]
	fn truncates_to_cap_after_sorting() {
		let ideas = (0..80)
			.map(|n| idea(Category::Primary, 1, n, 0, 0))
			.collect::<Vec<_>>();
		let ranked = rank(ideas, CategoryFilter::All, TimeWindow::All, now());

		assert_eq!(ranked.len(), MAX_RESULTS);
		// The cap keeps the best-scoring ideas, not the first-arriving ones.
		assert_eq!(ranked[0].net_score, 79);
		assert_eq!(ranked[MAX_RESULTS - 1].net_score, 30);
	}

	#[test]
	fn empty_input_and_fully_filtered_input_yield_empty_output() {
		assert!(rank(Vec::new(), CategoryFilter::All, TimeWindow::All, now()).is_empty());

		let stale = vec![idea(Category::Primary, 30, 5, 0, 50)];

		assert!(rank(stale, CategoryFilter::All, TimeWindow::Week, now()).is_empty());
	}

	#[test]
	fn identical_calls_yield_identical_output() {
		let ideas = vec![
			idea(Category::Primary, 1, 3, 1, 50),
			idea(Category::Secondary, 2, 3, 1, 50),
			idea(Category::Primary, 3, 7, 2, 10),
		];
		let first = rank(ideas.clone(), CategoryFilter::All, TimeWindow::Week, now());
		let second = rank(ideas, CategoryFilter::All, TimeWindow::Week, now());

		assert_eq!(first, second);
	}

	#[test]
	fn unknown_params_normalize_to_all() {
		assert_eq!(TimeWindow::from_param("fortnight"), TimeWindow::All);
		assert_eq!(TimeWindow::from_param(" WEEK "), TimeWindow::Week);
		assert_eq!(CategoryFilter::from_param("tertiary"), CategoryFilter::All);
		assert_eq!(CategoryFilter::from_param("Primary"), CategoryFilter::Only(Category::Primary));
	}
}
