mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Admins, Config, OracleConfig, Postgres, Service, Storage};

use std::{fs, path::Path};

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;

	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

pub fn validate(cfg: &Config) -> Result<()> {
	if !LOG_LEVELS.contains(&cfg.service.log_level.as_str()) {
		return Err(Error::Validation {
			message: "service.log_level must be one of error, warn, info, debug, or trace."
				.to_string(),
		});
	}
	if cfg.storage.postgres.dsn.trim().is_empty() {
		return Err(Error::Validation {
			message: "storage.postgres.dsn must be non-empty.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}

	for (label, value) in [
		("oracle.api_base", &cfg.oracle.api_base),
		("oracle.api_key", &cfg.oracle.api_key),
		("oracle.model", &cfg.oracle.model),
	] {
		if value.trim().is_empty() {
			return Err(Error::Validation { message: format!("{label} must be non-empty.") });
		}
	}

	if cfg.oracle.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "oracle.timeout_ms must be greater than zero.".to_string(),
		});
	}
	if !cfg.oracle.temperature.is_finite() {
		return Err(Error::Validation {
			message: "oracle.temperature must be a finite number.".to_string(),
		});
	}
	if !(0.0..=2.0).contains(&cfg.oracle.temperature) {
		return Err(Error::Validation {
			message: "oracle.temperature must be in the range 0.0-2.0.".to_string(),
		});
	}

	if cfg.admins.user_ids.iter().any(|id| id.trim().is_empty()) {
		return Err(Error::Validation {
			message: "admins.user_ids entries must be non-empty.".to_string(),
		});
	}

	Ok(())
}

fn normalize(cfg: &mut Config) {
	for id in &mut cfg.admins.user_ids {
		*id = id.trim().to_string();
	}

	cfg.admins.user_ids.retain(|id| !id.is_empty());

	if cfg.oracle.path.trim().is_empty() {
		cfg.oracle.path = "/".to_string();
	}
}
