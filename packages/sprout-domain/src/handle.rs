use unicode_normalization::UnicodeNormalization;

/// Handles never exceed this length; the base is cut before the suffix goes on.
pub const MAX_HANDLE_LEN: usize = 64;

const SUFFIX_LEN: usize = 4;
const FALLBACK_BASE: &str = "user";
const FALLBACK_SUFFIX_LEN: usize = 8;

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct IdentitySeed {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub email: String,
	pub stable_id: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SeedError {
	EmptyEmail,
	ShortStableId,
}

type Strategy = fn(&IdentitySeed) -> Option<String>;

/// Precedence is positional: the first strategy yielding a usable base wins.
const STRATEGIES: [Strategy; 3] = [full_name_base, first_name_base, email_base];

/// Derives a lowercase ASCII-alphanumeric handle from a profile's name and email
/// fragments, disambiguated with a tail of the profile's stable id. Total for any
/// seed passing validation; uniqueness against the profile store stays with the
/// caller.
pub fn derive(seed: &IdentitySeed) -> Result<String, SeedError> {
	if seed.email.trim().is_empty() {
		return Err(SeedError::EmptyEmail);
	}
	if seed.stable_id.chars().count() < 4 {
		return Err(SeedError::ShortStableId);
	}

	let id = sanitize(&seed.stable_id);

	for strategy in STRATEGIES {
		if let Some(base) = strategy(seed) {
			return Ok(compose(&base, tail(&id, SUFFIX_LEN)));
		}
	}

	// Guaranteed fallback. The longer id tail already carries the entropy the
	// name-derived handles get from their suffix, so no extra suffix step.
	Ok(format!("{FALLBACK_BASE}{}", tail(&id, FALLBACK_SUFFIX_LEN)))
}

fn full_name_base(seed: &IdentitySeed) -> Option<String> {
	let first = seed.first_name.as_deref()?;
	let last = seed.last_name.as_deref()?;
	let base = sanitize(&format!("{first}{last}"));

	(base.len() >= 3).then_some(base)
}

fn first_name_base(seed: &IdentitySeed) -> Option<String> {
	let base = sanitize(seed.first_name.as_deref()?);

	(base.len() >= 2).then_some(base)
}

fn email_base(seed: &IdentitySeed) -> Option<String> {
	let local = seed.email.split('@').next().unwrap_or_default();
	let base = sanitize(local);

	(base.len() >= 2).then_some(base)
}

/// NFKD-fold, lowercase, and keep `[a-z0-9]` only. Accented letters decompose to
/// their ASCII base before the filter, so "José" sanitizes to "jose".
fn sanitize(raw: &str) -> String {
	raw.nfkd().flat_map(char::to_lowercase).filter(char::is_ascii_alphanumeric).collect()
}

fn compose(base: &str, suffix: &str) -> String {
	let keep = MAX_HANDLE_LEN.saturating_sub(suffix.len());

	// Sanitized text is pure ASCII, so byte slicing is safe.
	format!("{}{suffix}", &base[..base.len().min(keep)])
}

fn tail(sanitized: &str, len: usize) -> &str {
	&sanitized[sanitized.len().saturating_sub(len)..]
}
