#![allow(dead_code)]

// std
use std::sync::Arc;
// crates.io
use httpmock::MockServer;
// self
use grab_express_adapter::{
	config::{AdapterConfig, Endpoints},
	http::ReqwestHttpClient,
	model::{Contact, Coord, InventoryItem, Money, Order, Waypoint, WaypointKind, Weight},
	ops::Adapter,
	storage::MemoryObjectStore,
	store::MemoryStore,
	url::Url,
};

pub const CLIENT_ID: &str = "partner-client-id";
pub const CLIENT_SECRET: &str = "partner-client-secret";
pub const TOKEN_PATH: &str = "/oauth2/token";
pub const API_PREFIX: &str = "/grab-express";

/// Adapter wired to a mock server plus handles to its in-memory backends.
pub struct Harness {
	pub adapter: Adapter<ReqwestHttpClient>,
	pub config: AdapterConfig,
	pub store: MemoryStore,
	pub objects: MemoryObjectStore,
}

/// Builds an adapter whose identity endpoint and API base both point at the
/// mock server, backed by fresh in-memory stores.
pub fn build_adapter(server: &MockServer) -> Harness {
	let endpoints = Endpoints::custom(
		Url::parse(&server.url(TOKEN_PATH)).expect("Mock token endpoint should parse."),
		Url::parse(&server.url(API_PREFIX)).expect("Mock API base should parse."),
	);
	let config = AdapterConfig::new(CLIENT_ID, CLIENT_SECRET);
	let store = MemoryStore::default();
	let objects = MemoryObjectStore::default();
	let adapter = Adapter::with_http_client(
		config.clone(),
		endpoints,
		Arc::new(store.clone()),
		Arc::new(objects.clone()),
		ReqwestHttpClient::default(),
	);

	Harness { adapter, config, store, objects }
}

fn contact(name: &str, coord: Option<Coord>) -> Contact {
	Contact {
		name: Some(name.into()),
		phone: Some("+60123456789".into()),
		address1: Some("12 Jalan Ampang".into()),
		city: Some("Kuala Lumpur".into()),
		postcode: Some("50450".into()),
		country: Some("MY".into()),
		coord,
		..Default::default()
	}
}

/// A well-formed two-waypoint order with coordinates on both sides.
pub fn sample_order() -> Order {
	let pickup = Waypoint {
		kind: WaypointKind::Pickup,
		contact: contact("Sender Sdn Bhd", Some(Coord { lat: 3.139, lon: 101.687 })),
		scheduled_at: None,
		inventory: vec![InventoryItem {
			name: "Documents".into(),
			description: None,
			quantity: 1,
		}],
	};
	let dropoff = Waypoint {
		kind: WaypointKind::Dropoff,
		contact: contact("Receiver", Some(Coord { lat: 3.107, lon: 101.602 })),
		scheduled_at: None,
		inventory: vec![],
	};

	Order {
		id: "ord-1001".into(),
		waypoint: Some(vec![pickup, dropoff]),
		weight: Weight::default(),
		dimension: None,
		price: Money { amount: 25., currency: "MYR".into() },
		note: None,
	}
}

/// Same order with the coordinate stripped from one side.
pub fn order_without_coord(kind: WaypointKind) -> Order {
	let mut order = sample_order();

	if let Some(waypoints) = order.waypoint.as_mut() {
		for waypoint in waypoints.iter_mut().filter(|w| w.kind == kind) {
			waypoint.contact.coord = None;
		}
	}

	order
}
