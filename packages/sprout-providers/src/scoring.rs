// std
use std::time::Duration as StdDuration;

// crates.io
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{Error, Result};
use sprout_config::OracleConfig;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Analysis {
	pub summary: String,
	pub score: u8,
}

/// Single-attempt scoring call. The timeout bounds the whole request; retry policy,
/// if any, belongs to the caller.
pub async fn analyze(
	cfg: &OracleConfig,
	title: &str,
	pitch: &str,
	details: Option<&str>,
) -> Result<Analysis> {
	let client = Client::builder().timeout(StdDuration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);
	let body = serde_json::json!({
		"model": cfg.model,
		"temperature": cfg.temperature,
		"title": title,
		"pitch": pitch,
		"details": details,
	});
	let res = client
		.post(url)
		.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
		.json(&body)
		.send()
		.await?;
	let json: Value = res.error_for_status()?.json().await?;

	parse_analysis_response(&json)
}

fn parse_analysis_response(json: &Value) -> Result<Analysis> {
	let summary = json
		.get("summary")
		.and_then(Value::as_str)
		.map(str::trim)
		.filter(|text| !text.is_empty())
		.ok_or_else(|| Error::InvalidResponse {
			message: "Analysis response is missing a summary.".to_string(),
		})?;
	let raw_score =
		json.get("score").or_else(|| json.get("potential_score")).ok_or_else(|| {
			Error::InvalidResponse { message: "Analysis response is missing a score.".to_string() }
		})?;
	let score = raw_score.as_u64().filter(|score| *score <= 100).ok_or_else(|| {
		Error::InvalidResponse {
			message: format!("Analysis score must be an integer in 0-100, got {raw_score}."),
		}
	})?;

	Ok(Analysis { summary: summary.to_string(), score: score as u8 })
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn accepts_the_primary_shape() {
		let json = serde_json::json!({ "summary": " A solid niche. ", "score": 74 });
		let analysis = parse_analysis_response(&json).expect("parse failed");

		assert_eq!(analysis, Analysis { summary: "A solid niche.".to_string(), score: 74 });
	}

	#[test]
	fn accepts_the_alternate_score_key() {
		let json = serde_json::json!({ "summary": "ok", "potential_score": 12 });

		assert_eq!(parse_analysis_response(&json).expect("parse failed").score, 12);
	}

	#[test]
	fn rejects_out_of_range_or_fractional_scores() {
		for score in [serde_json::json!(101), serde_json::json!(-3), serde_json::json!(3.5)] {
			let json = serde_json::json!({ "summary": "ok", "score": score });

			assert!(matches!(
				parse_analysis_response(&json),
				Err(Error::InvalidResponse { .. })
			));
		}
	}

	#[test]
	fn rejects_missing_or_blank_summary() {
		let missing = serde_json::json!({ "score": 10 });
		let blank = serde_json::json!({ "summary": "   ", "score": 10 });

		assert!(matches!(parse_analysis_response(&missing), Err(Error::InvalidResponse { .. })));
		assert!(matches!(parse_analysis_response(&blank), Err(Error::InvalidResponse { .. })));
	}
}
