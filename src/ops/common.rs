//! Shared canonical-input validation for the quotation and creation operations.

// self
use crate::{
	error::ValidationError,
	model::{ContactSide, Coord, Order, Waypoint, WaypointKind},
};

/// Extracts the single pickup + dropoff pair, rejecting every other shape.
pub(crate) fn route_pair(order: &Order) -> Result<(&Waypoint, &Waypoint), ValidationError> {
	let waypoints = order.waypoint.as_deref().ok_or(ValidationError::MissingWaypoints)?;

	if waypoints.len() != 2 {
		return Err(ValidationError::WaypointCount { found: waypoints.len() });
	}

	let pickup = single(waypoints, WaypointKind::Pickup)?;
	let dropoff = single(waypoints, WaypointKind::Dropoff)?;

	Ok((pickup, dropoff))
}

fn single(waypoints: &[Waypoint], kind: WaypointKind) -> Result<&Waypoint, ValidationError> {
	let mut matching = waypoints.iter().filter(|w| w.kind == kind);
	let first = matching.next().ok_or(ValidationError::MissingWaypoint { kind })?;

	if matching.next().is_some() {
		return Err(ValidationError::DuplicateWaypoint { kind });
	}

	Ok(first)
}

/// Requires a coordinate on the waypoint's contact, naming the failing side.
pub(crate) fn require_coord(
	waypoint: &Waypoint,
	side: ContactSide,
) -> Result<Coord, ValidationError> {
	waypoint.contact.coord.ok_or(ValidationError::MissingCoordinate { side })
}
