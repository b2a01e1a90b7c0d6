//! Shipment creation operation.

// self
use crate::{
	_prelude::*,
	courier::{self, CreateResponse, DeliveryRequest},
	http::{ApiRequest, CourierHttpClient},
	model::{ContactSide, Order, ShipmentReceipt},
	ops::{Adapter, common},
};

impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Creates a delivery order with the courier.
	///
	/// On top of the route-shape rule, both contacts must carry a coordinate;
	/// the courier dispatches drivers by position, not by address text.
	pub async fn create(&self, order: &Order, service_code: &str) -> Result<ShipmentReceipt> {
		let (pickup, dropoff) = common::route_pair(order)?;

		common::require_coord(pickup, ContactSide::Sender)?;
		common::require_coord(dropoff, ContactSide::Receiver)?;

		tracing::debug!(order = %order.id, service_code, "creating shipment");

		let payload = serde_json::to_value(DeliveryRequest::from_order(order, pickup, dropoff))?;
		let url = self.client.endpoint(courier::DELIVERIES_PATH)?;
		let response = self.client.send(ApiRequest::post(url, payload)).await?;
		let raw_response: serde_json::Value = response.json()?;
		let created: CreateResponse = response.json()?;

		Ok(ShipmentReceipt {
			order_id: order.id.clone(),
			consignment_no: created.consignment_no(),
			raw_response,
		})
	}
}
