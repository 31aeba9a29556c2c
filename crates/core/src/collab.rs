//! Interfaces for the host services the overlay calls on activation.

use serde::Serialize;

/// Locale-aware router owned by the host. Fire-and-forget from the overlay's
/// point of view; failures are the router's business.
pub trait Navigator {
	fn navigate_to(&self, path: &str);
}

/// Opens absolute URLs in a fresh browsing context.
pub trait ExternalOpener {
	fn open_in_new_context(&self, request: &NewContextRequest);
}

/// Target name for a fresh, unnamed browsing context.
pub const BLANK_TARGET: &str = "_blank";

/// A request to open `url` detached from the current context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContextRequest {
	pub url: String,
	pub target: &'static str,
	/// The new context gets no handle back to the opener.
	pub no_opener: bool,
	/// No referrer is sent with the request.
	pub no_referrer: bool,
}

impl NewContextRequest {
	/// A request with opener access and referrer leakage suppressed.
	pub fn isolated(url: impl Into<String>) -> Self {
		Self {
			url: url.into(),
			target: BLANK_TARGET,
			no_opener: true,
			no_referrer: true,
		}
	}

	/// Window feature string in the form browsers accept.
	#[must_use]
	pub fn features(&self) -> String {
		let mut features = Vec::new();
		if self.no_opener {
			features.push("noopener");
		}
		if self.no_referrer {
			features.push("noreferrer");
		}
		features.join(",")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn isolated_requests_suppress_opener_and_referrer() {
		let request = NewContextRequest::isolated("https://github.com/pulse-js/pulse");
		assert_eq!(request.target, "_blank");
		assert_eq!(request.features(), "noopener,noreferrer");
	}
}
