use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading content indices and translation catalogs.
#[derive(Debug, Error)]
pub enum Error {
	/// A TOML document could not be parsed into the expected shape.
	#[error("failed to parse {origin}: {source}")]
	Parse {
		origin: String,
		#[source]
		source: toml::de::Error,
	},

	/// A content or catalog file could not be read.
	#[error("failed to read {}: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// An embedded resource was not valid UTF-8.
	#[error("{origin} is not valid UTF-8")]
	Encoding { origin: String },

	/// The catalog has no table for the requested locale.
	#[error("unknown locale '{locale}' (available: {available})")]
	UnknownLocale { locale: String, available: String },

	/// No catalog files were found at all.
	#[error("no translation catalogs were found")]
	EmptyCatalog,

	/// A catalog value was neither a string nor a table of strings.
	#[error("translation key '{key}' in {origin} must be a string or a table")]
	InvalidEntry { key: String, origin: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
