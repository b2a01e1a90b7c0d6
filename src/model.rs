//! Canonical order/shipment/tracking records exchanged with the platform.
//!
//! These shapes are the platform-neutral side of the adapter; the courier-wire
//! counterparts live in [`crate::courier`].

// self
use crate::{_prelude::*, storage::PodUpload};

/// Role a waypoint plays in a shipment's route.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WaypointKind {
	/// Collection stop.
	Pickup,
	/// Delivery stop.
	Dropoff,
}
impl Display for WaypointKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Self::Pickup => "PICKUP",
			Self::Dropoff => "DROPOFF",
		})
	}
}

/// Which route side a validation failure refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContactSide {
	/// The pickup-side contact.
	Sender,
	/// The dropoff-side contact.
	Receiver,
}
impl Display for ContactSide {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(match self {
			Self::Sender => "Sender",
			Self::Receiver => "Receiver",
		})
	}
}

/// Geographic coordinate pair.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coord {
	/// Latitude in decimal degrees.
	pub lat: f64,
	/// Longitude in decimal degrees.
	pub lon: f64,
}

/// Contact details attached to a waypoint.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Contact {
	/// Contact person name.
	pub name: Option<String>,
	/// Contact phone number.
	pub phone: Option<String>,
	/// Unit or lot number.
	pub unit_no: Option<String>,
	/// Primary address line.
	pub address1: Option<String>,
	/// Secondary address line.
	pub address2: Option<String>,
	/// City name.
	pub city: Option<String>,
	/// State or province.
	pub state: Option<String>,
	/// Postal code.
	pub postcode: Option<String>,
	/// ISO country code.
	pub country: Option<String>,
	/// Geographic coordinate, when the platform captured one.
	pub coord: Option<Coord>,
}

/// Length units accepted on canonical dimensions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
	/// Centimeters (the courier's native unit).
	#[default]
	Cm,
	/// Millimeters.
	Mm,
	/// Meters.
	M,
	/// Inches.
	In,
	/// Feet.
	Ft,
}
impl LengthUnit {
	/// Converts `value` expressed in this unit into centimeters.
	pub fn to_cm(self, value: f64) -> f64 {
		let factor = match self {
			Self::Cm => 1.,
			Self::Mm => 0.1,
			Self::M => 100.,
			Self::In => 2.54,
			Self::Ft => 30.48,
		};

		value * factor
	}
}

/// Mass units accepted on canonical weights.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
	/// Grams (the courier's native unit).
	#[default]
	G,
	/// Kilograms.
	Kg,
	/// Pounds.
	Lb,
	/// Ounces.
	Oz,
}
impl MassUnit {
	/// Converts `value` expressed in this unit into grams.
	pub fn to_g(self, value: f64) -> f64 {
		let factor = match self {
			Self::G => 1.,
			Self::Kg => 1_000.,
			Self::Lb => 453.592_37,
			Self::Oz => 28.349_523,
		};

		value * factor
	}
}

/// Shipment weight with its declared unit.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Weight {
	/// Magnitude in `unit`.
	pub value: f64,
	/// Declared mass unit.
	#[serde(default)]
	pub unit: MassUnit,
}
impl Weight {
	/// Weight expressed in grams.
	pub fn grams(&self) -> f64 {
		self.unit.to_g(self.value)
	}
}

/// Parcel dimensions with their declared unit.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize)]
pub struct Dimension {
	/// Height in `unit`.
	pub height: f64,
	/// Width in `unit`.
	pub width: f64,
	/// Length in `unit`.
	pub length: f64,
	/// Declared length unit.
	#[serde(default)]
	pub unit: LengthUnit,
}

/// One inventory line carried by a waypoint.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
	/// Item name.
	pub name: String,
	/// Optional item description.
	#[serde(default)]
	pub description: Option<String>,
	/// Item quantity.
	pub quantity: u32,
}

/// Monetary amount with its currency.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Money {
	/// Decimal amount.
	pub amount: f64,
	/// Currency code or symbol.
	pub currency: String,
}

/// One stop in a shipment's route.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
	/// Role of the stop.
	#[serde(rename = "type")]
	pub kind: WaypointKind,
	/// Contact details at the stop.
	pub contact: Contact,
	/// Scheduled pickup/delivery time, if any.
	#[serde(default, rename = "scheduledAt", with = "time::serde::rfc3339::option")]
	pub scheduled_at: Option<OffsetDateTime>,
	/// Inventory collected or delivered at the stop.
	#[serde(default)]
	pub inventory: Vec<InventoryItem>,
}

/// Canonical order record supplied by the platform.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Order {
	/// Platform order identifier.
	pub id: String,
	/// Route waypoints; the adapter requires exactly one pickup + one dropoff.
	#[serde(default)]
	pub waypoint: Option<Vec<Waypoint>>,
	/// Shipment weight.
	#[serde(default)]
	pub weight: Weight,
	/// Parcel dimensions, when declared.
	#[serde(default)]
	pub dimension: Option<Dimension>,
	/// Declared item value.
	pub price: Money,
	/// Free-form note.
	#[serde(default)]
	pub note: Option<String>,
}

/// Rate quotation produced by the quotation operation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Quotation {
	/// Quoted delivery price.
	pub price: Money,
}

/// Result of a successful shipment creation.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentReceipt {
	/// Platform order identifier echoed back.
	pub order_id: String,
	/// Courier tracking identifier for the shipment.
	pub consignment_no: String,
	/// Untouched courier response for auditing.
	pub raw_response: serde_json::Value,
}

/// Result of a cancellation request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Cancellation {
	/// Whether the courier accepted the cancellation.
	pub success: bool,
}

/// Normalized delivery-partner record; optional courier fields default to `""`.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Personnel {
	/// Courier-side personnel identifier, when exposed.
	pub id: String,
	/// Driver name.
	pub name: String,
	/// Driver phone number.
	pub phone: String,
	/// Vehicle registration plate.
	pub vehicle_reg_no: String,
	/// Vehicle type label.
	pub vehicle_type: String,
	/// Vehicle model name.
	pub vehicle_name: String,
	/// Driver photo URL.
	pub photo: String,
	/// Last known position, when reported.
	pub coord: Option<Coord>,
}

/// Partial personnel details carried on a tracking event.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventPersonnel {
	/// Driver name, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	/// Driver phone, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub phone: Option<String>,
	/// Vehicle registration plate, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub vehicle_reg_no: Option<String>,
	/// Driver photo URL, when reported.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub photo: Option<String>,
}

/// One canonical tracking timeline entry.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
	/// Courier tracking identifier.
	pub consignment_no: String,
	/// Canonical platform status code.
	pub status_code: u16,
	/// Event location description; the courier does not supply one.
	pub location: String,
	/// Event instant.
	#[serde(with = "time::serde::rfc3339")]
	pub date_time: OffsetDateTime,
	/// Partial driver details attached to the event.
	pub personnel: EventPersonnel,
	/// Driver position at the event, when reported.
	pub coord: Option<Coord>,
	/// Storage paths of proof images scheduled for upload.
	pub pod_picture: Vec<String>,
}

/// Acknowledgement returned to the webhook sender.
#[derive(Clone, Debug, Serialize)]
pub struct CallbackAck {
	/// Response body text.
	pub body: String,
	/// Response content type.
	pub header: String,
}
impl Default for CallbackAck {
	fn default() -> Self {
		Self { body: "OK".into(), header: "application/json".into() }
	}
}

/// Outcome of normalizing one tracking webhook.
///
/// Unrecognized courier statuses are not silently dropped: the raw status is
/// reported in `unmapped_status` alongside an empty timeline.
#[derive(Debug)]
pub struct TrackingOutcome {
	/// Canonical timeline entries derived from the event.
	pub timeline: Vec<TimelineEntry>,
	/// Raw courier status when it matched no table entry.
	pub unmapped_status: Option<String>,
	/// Acknowledgement for the webhook sender.
	pub ack: CallbackAck,
	/// Handles to background proof-image uploads; droppable to keep the
	/// fire-and-forget contract.
	pub uploads: Vec<PodUpload>,
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn unit_conversions_reach_courier_native_units() {
		assert_eq!(LengthUnit::M.to_cm(1.2), 120.);
		assert_eq!(LengthUnit::In.to_cm(2.), 5.08);
		assert_eq!(MassUnit::Kg.to_g(0.75), 750.);
		assert_eq!(Weight { value: 2., unit: MassUnit::Kg }.grams(), 2_000.);
	}

	#[test]
	fn waypoint_kind_deserializes_from_wire_names() {
		let pickup: WaypointKind =
			serde_json::from_str("\"PICKUP\"").expect("PICKUP should deserialize.");
		let dropoff: WaypointKind =
			serde_json::from_str("\"DROPOFF\"").expect("DROPOFF should deserialize.");

		assert_eq!(pickup, WaypointKind::Pickup);
		assert_eq!(dropoff, WaypointKind::Dropoff);
		assert_eq!(pickup.to_string(), "PICKUP");
	}

	#[test]
	fn order_tolerates_missing_optional_fields() {
		let order: Order = serde_json::from_value(serde_json::json!({
			"id": "ord-1",
			"price": { "amount": 10.0, "currency": "MYR" },
		}))
		.expect("Minimal order should deserialize.");

		assert!(order.waypoint.is_none());
		assert!(order.dimension.is_none());
	}
}
