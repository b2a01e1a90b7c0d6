//! Wire-level request/response shapes for the Grab Express REST surface.
//!
//! Field names follow the courier's JSON contract verbatim; canonical
//! counterparts live in [`crate::model`].

// self
use crate::{
	_prelude::*,
	model::{Contact, Order, Waypoint},
};

pub(crate) const QUOTES_PATH: &str = "v1/deliveries/quotes";
pub(crate) const DELIVERIES_PATH: &str = "v1/deliveries";

pub(crate) fn delivery_path(consignment_no: &str) -> String {
	format!("{DELIVERIES_PATH}/{consignment_no}")
}

pub(crate) fn courier_path(consignment_no: &str) -> String {
	format!("{DELIVERIES_PATH}/{consignment_no}/courier")
}

/// Address block in the courier's three-line format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CourierAddress {
	/// First address line.
	#[serde(rename = "Line1")]
	pub line1: Option<String>,
	/// Second address line.
	#[serde(rename = "Line2")]
	pub line2: Option<String>,
	/// Third address line.
	#[serde(rename = "Line3")]
	pub line3: Option<String>,
	/// City name.
	#[serde(rename = "City")]
	pub city: Option<String>,
	/// State or province code.
	#[serde(rename = "StateOrProvinceCode")]
	pub state_or_province_code: Option<String>,
	/// Postal code.
	#[serde(rename = "PostCode")]
	pub post_code: Option<String>,
	/// ISO country code.
	#[serde(rename = "CountryCode")]
	pub country_code: Option<String>,
}
impl CourierAddress {
	/// Maps a canonical contact onto the courier's address lines.
	///
	/// An absent unit number promotes the remaining lines up one slot, so
	/// `Line1` is always populated when any address data exists.
	pub fn from_contact(contact: &Contact) -> Self {
		let mut line1 = contact.unit_no.clone().filter(|s| !s.is_empty());
		let mut line2 = contact.address1.clone();
		let mut line3 = contact.address2.clone();

		if line1.is_none() {
			line1 = line2.take();
			line2 = line3.take();
		}

		Self {
			line1,
			line2,
			line3,
			city: contact.city.clone(),
			state_or_province_code: contact.state.clone(),
			post_code: contact.postcode.clone(),
			country_code: contact.country.clone(),
		}
	}
}

/// Package dimensions in the courier's native units (cm/g).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct PackageDimensions {
	/// Height in centimeters.
	pub height: f64,
	/// Width in centimeters.
	pub width: f64,
	/// Depth in centimeters.
	pub depth: f64,
	/// Weight in grams.
	pub weight: f64,
}

/// One quoted package line.
#[derive(Clone, Debug, Serialize)]
pub struct CourierPackage {
	/// Item name.
	pub name: String,
	/// Item description; `-` when the platform supplied none.
	pub description: String,
	/// Item quantity.
	pub quantity: u32,
	/// Declared item value.
	pub price: f64,
	/// Converted dimensions.
	pub dimensions: PackageDimensions,
}
impl CourierPackage {
	fn from_inventory(order: &Order, item: &crate::model::InventoryItem) -> Self {
		let dimensions = match &order.dimension {
			Some(dim) => PackageDimensions {
				height: dim.unit.to_cm(dim.height),
				width: dim.unit.to_cm(dim.width),
				depth: dim.unit.to_cm(dim.length),
				weight: order.weight.grams(),
			},
			None => PackageDimensions::default(),
		};

		Self {
			name: item.name.clone(),
			description: item.description.clone().unwrap_or_else(|| "-".into()),
			quantity: item.quantity,
			price: order.price.amount,
			dimensions,
		}
	}
}

/// Request body shared by the quotation and creation endpoints.
#[derive(Clone, Debug, Serialize)]
pub struct DeliveryRequest {
	/// Pickup address.
	pub origin: CourierAddress,
	/// Dropoff address.
	pub destination: CourierAddress,
	/// Declared weight magnitude.
	pub weight_value: f64,
	/// Declared weight unit.
	pub weight_unit: crate::model::MassUnit,
	/// Scheduled pickup instant, when the platform set one.
	#[serde(rename = "pickupDateTime", with = "time::serde::rfc3339::option")]
	pub pickup_date_time: Option<OffsetDateTime>,
	/// Packages built from the pickup-side inventory.
	#[serde(rename = "listOfItem")]
	pub list_of_item: Vec<CourierPackage>,
}
impl DeliveryRequest {
	/// Builds the courier payload from a validated pickup/dropoff pair.
	pub fn from_order(order: &Order, pickup: &Waypoint, dropoff: &Waypoint) -> Self {
		let list_of_item = pickup
			.inventory
			.iter()
			.map(|item| CourierPackage::from_inventory(order, item))
			.collect();

		Self {
			origin: CourierAddress::from_contact(&pickup.contact),
			destination: CourierAddress::from_contact(&dropoff.contact),
			weight_value: order.weight.value,
			weight_unit: order.weight.unit,
			pickup_date_time: pickup.scheduled_at,
			list_of_item,
		}
	}
}

/// Quotation endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub struct QuoteResponse {
	/// Quoted amount.
	pub amount: f64,
	/// Quoted currency.
	pub currency: QuoteCurrency,
}

/// Currency block on a quotation response.
#[derive(Clone, Debug, Deserialize)]
pub struct QuoteCurrency {
	/// Currency symbol or code.
	pub symbol: String,
}

/// Creation endpoint response.
#[derive(Clone, Debug, Deserialize)]
pub struct CreateResponse {
	/// Courier tracking identifier; the courier emits either a string or a
	/// number here depending on API version.
	#[serde(rename = "trackingNo")]
	pub tracking_no: serde_json::Value,
}
impl CreateResponse {
	/// Tracking identifier coerced to a string.
	pub fn consignment_no(&self) -> String {
		stringify(&self.tracking_no)
	}
}

/// Driver endpoint response.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct DriverResponse {
	/// Driver name.
	#[serde(default)]
	pub name: Option<String>,
	/// Driver phone number.
	#[serde(default)]
	pub phone: Option<String>,
	/// Vehicle registration plate.
	#[serde(default, rename = "plateNumber")]
	pub plate_number: Option<String>,
	/// Vehicle type label.
	#[serde(default, rename = "vehicleType")]
	pub vehicle_type: Option<String>,
	/// Vehicle model name.
	#[serde(default, rename = "vehicleName")]
	pub vehicle_name: Option<String>,
	/// Driver photo URL.
	#[serde(default, rename = "pictureURL")]
	pub picture_url: Option<String>,
	/// Last reported position.
	#[serde(default)]
	pub coordinates: Option<DriverCoordinates>,
}

/// Coordinate block on a driver response.
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct DriverCoordinates {
	/// Latitude in decimal degrees.
	pub latitude: f64,
	/// Longitude in decimal degrees.
	pub longitude: f64,
}

/// Tracking webhook payload posted by the courier.
#[derive(Clone, Debug, Deserialize)]
pub struct TrackingEvent {
	/// Raw courier status string.
	pub status: String,
	/// Delivery identifier; string or number depending on API version.
	#[serde(rename = "deliveryID")]
	pub delivery_id: serde_json::Value,
	/// Event unix timestamp in seconds.
	pub timestamp: i64,
	/// Driver details, when a driver is assigned.
	#[serde(default)]
	pub driver: Option<TrackingDriver>,
	/// Proof-of-delivery image URL, present on completion events.
	#[serde(default, rename = "dropoffProofURL")]
	pub dropoff_proof_url: Option<String>,
	/// Proof-of-pickup image URL, present once the parcel is in delivery.
	#[serde(default, rename = "pickupProofURL")]
	pub pickup_proof_url: Option<String>,
}
impl TrackingEvent {
	/// Delivery identifier coerced to the canonical consignment number.
	pub fn consignment_no(&self) -> String {
		stringify(&self.delivery_id)
	}
}

/// Driver block on a tracking webhook.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct TrackingDriver {
	/// Driver name.
	#[serde(default)]
	pub name: Option<String>,
	/// Driver phone number.
	#[serde(default)]
	pub phone: Option<String>,
	/// Vehicle registration plate.
	#[serde(default, rename = "licensePlate")]
	pub license_plate: Option<String>,
	/// Driver photo URL.
	#[serde(default, rename = "photoURL")]
	pub photo_url: Option<String>,
	/// Current latitude.
	#[serde(default, rename = "currentLat")]
	pub current_lat: Option<f64>,
	/// Current longitude.
	#[serde(default, rename = "currentLng")]
	pub current_lng: Option<f64>,
}

/// Closed set of courier delivery statuses with canonical mappings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeliveryStatus {
	/// Courier is searching for a driver.
	Allocating,
	/// Order is queued for allocation.
	Queuing,
	/// Driver is heading to the pickup.
	PickingUp,
	/// Parcel is on its way to the dropoff.
	InDelivery,
	/// Parcel is being returned to the sender.
	InReturn,
	/// Delivery completed.
	Completed,
	/// Order canceled.
	Canceled,
	/// Parcel returned to the sender.
	Returned,
	/// Delivery failed.
	Failed,
}
impl DeliveryStatus {
	/// Parses a webhook status string against the closed table.
	pub fn parse(raw: &str) -> Option<Self> {
		match raw {
			"ALLOCATING" => Some(Self::Allocating),
			"QUEUING" => Some(Self::Queuing),
			"PICKING_UP" => Some(Self::PickingUp),
			"IN_DELIVERY" => Some(Self::InDelivery),
			"IN_RETURN" => Some(Self::InReturn),
			"COMPLETED" => Some(Self::Completed),
			"CANCELED" => Some(Self::Canceled),
			"RETURNED" => Some(Self::Returned),
			"FAILED" => Some(Self::Failed),
			_ => None,
		}
	}

	/// Canonical platform status code for this courier status.
	pub fn canonical_code(self) -> u16 {
		match self {
			Self::Allocating | Self::Queuing => 100,
			Self::PickingUp => 400,
			Self::InDelivery => 600,
			Self::InReturn => 661,
			Self::Completed => 700,
			Self::Canceled | Self::Failed => 655,
			Self::Returned => 701,
		}
	}
}

fn stringify(value: &serde_json::Value) -> String {
	match value {
		serde_json::Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}
