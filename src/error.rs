//! Adapter-level error types shared across operations, transport, and stores.
//!
//! Every failure stays a tagged variant inside the crate; the dispatch layer is
//! the only place where [`Error::normalized`] collapses it into the single
//! string the platform's transport carries.

// self
use crate::{
	_prelude::*,
	model::{ContactSide, WaypointKind},
};

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Canonical input failed shape validation before any network call.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Inbound envelope problem raised by the dispatch table.
	#[error(transparent)]
	Dispatch(#[from] crate::dispatch::DispatchError),
	/// Token-store backend failure.
	#[error("{0}")]
	Storage(
		#[from]
		#[source]
		crate::store::StoreError,
	),
	/// Object-storage failure while persisting a proof image.
	#[error("{0}")]
	ObjectStorage(
		#[from]
		#[source]
		crate::storage::StorageError,
	),
	/// Identity endpoint unreachable or rejected the credentials.
	#[error("Authentication unavailable: {reason}.")]
	Auth {
		/// Summary of the identity endpoint failure.
		reason: String,
	},
	/// Courier API answered with a non-2xx status.
	#[error("Courier API returned status {status}.")]
	Upstream {
		/// HTTP status code returned by the courier.
		status: u16,
		/// Raw response body, when one was present.
		body: Option<String>,
	},
	/// Transport failure with no response received at all.
	#[error(transparent)]
	Network(#[from] TransportError),
	/// Outbound payload could not be serialized.
	#[error("Request payload could not be serialized.")]
	Encode(#[from] serde_json::Error),
	/// Courier response body did not match the expected wire shape.
	#[error("Courier response body is malformed: {source}.")]
	Decode {
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status the malformed body arrived with.
		status: u16,
	},
}
impl Error {
	/// Renders the single boundary string handed to the dispatch layer.
	///
	/// Priority follows the platform's wire contract: status plus body when the
	/// courier answered, status alone when the body was empty, the request line
	/// when nothing came back, the error's own message otherwise.
	pub fn normalized(&self) -> String {
		match self {
			Self::Upstream { status, body: Some(body) } => format!("[{status}] - {body}"),
			Self::Upstream { status, body: None } => format!("[{status}] - <no response body>"),
			Self::Decode { status, source } => format!("[{status}] - {source}"),
			Self::Network(e) => e.request_line().to_owned(),
			other => other.to_string(),
		}
	}
}

/// Canonical-input validation failures raised before any courier call.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Order carries no waypoint list at all.
	#[error("Order has no waypoint, expecting exactly 2 waypoints.")]
	MissingWaypoints,
	/// Order carries the wrong number of waypoints.
	#[error("Order has {found} waypoint(s), expecting exactly 2 waypoints.")]
	WaypointCount {
		/// Number of waypoints actually present.
		found: usize,
	},
	/// Required waypoint kind is absent from the route.
	#[error("{kind} waypoint not found.")]
	MissingWaypoint {
		/// The absent waypoint kind.
		kind: WaypointKind,
	},
	/// Waypoint kind appears more than once in the route.
	#[error("Duplicate {kind} waypoint.")]
	DuplicateWaypoint {
		/// The repeated waypoint kind.
		kind: WaypointKind,
	},
	/// Sender or receiver contact lacks a coordinate.
	#[error("{side} coordinate is required.")]
	MissingCoordinate {
		/// Which side of the route is missing the coordinate.
		side: ContactSide,
	},
	/// Webhook carried an out-of-range event timestamp.
	#[error("Event timestamp {value} is out of range.")]
	InvalidTimestamp {
		/// The rejected unix timestamp.
		value: i64,
	},
	/// Webhook carried a proof-image URL that does not parse.
	#[error("Proof image URL `{url}` is invalid.")]
	InvalidProofUrl {
		/// The rejected URL string.
		url: String,
	},
}

/// Configuration and validation failures raised at adapter construction.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Required configuration field is absent.
	#[error("Configuration field `{field}` is required.")]
	MissingField {
		/// Name of the absent field.
		field: &'static str,
	},
	/// Configuration field carries the wrong JSON type.
	#[error("Configuration field `{field}` must be a {expected}.")]
	FieldType {
		/// Name of the mistyped field.
		field: &'static str,
		/// Expected JSON type label.
		expected: &'static str,
	},
	/// Endpoint URL failed to parse.
	#[error("Endpoint URL is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<reqwest::Error> for ConfigError {
	fn from(e: reqwest::Error) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures where no HTTP response was received.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling `{request}`.")]
	Network {
		/// Request line (`METHOD url`) the failure was observed on.
		request: String,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling `{request}`.")]
	Io {
		/// Request line (`METHOD url`) the failure was observed on.
		request: String,
		/// Underlying IO error.
		#[source]
		source: std::io::Error,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error observed on `request`.
	pub fn network(
		request: impl Into<String>,
		src: impl 'static + Send + Sync + std::error::Error,
	) -> Self {
		Self::Network { request: request.into(), source: Box::new(src) }
	}

	/// Returns the request line the failure was observed on.
	pub fn request_line(&self) -> &str {
		match self {
			Self::Network { request, .. } | Self::Io { request, .. } => request,
		}
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn normalized_renders_status_and_body() {
		let err = Error::Upstream { status: 404, body: Some("{\"msg\":\"x\"}".into()) };

		assert_eq!(err.normalized(), "[404] - {\"msg\":\"x\"}");
	}

	#[test]
	fn normalized_handles_empty_body() {
		let err = Error::Upstream { status: 503, body: None };

		assert_eq!(err.normalized(), "[503] - <no response body>");
	}

	#[test]
	fn normalized_surfaces_request_line_for_network_failures() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err = Error::Network(TransportError::network("POST https://x/v1/deliveries", io));

		assert_eq!(err.normalized(), "POST https://x/v1/deliveries");
	}

	#[test]
	fn normalized_falls_back_to_message() {
		let err = Error::Validation(ValidationError::MissingWaypoint { kind: WaypointKind::Pickup });

		assert_eq!(err.normalized(), "PICKUP waypoint not found.");
	}

	#[test]
	fn validation_names_the_failing_side() {
		let sender = ValidationError::MissingCoordinate { side: ContactSide::Sender };
		let receiver = ValidationError::MissingCoordinate { side: ContactSide::Receiver };

		assert_eq!(sender.to_string(), "Sender coordinate is required.");
		assert_eq!(receiver.to_string(), "Receiver coordinate is required.");
	}
}
