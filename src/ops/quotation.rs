//! Rate quotation operation.

// self
use crate::{
	_prelude::*,
	courier::{self, DeliveryRequest, QuoteResponse},
	http::{ApiRequest, CourierHttpClient},
	model::{Money, Order, Quotation},
	ops::{Adapter, common},
};

impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Requests a rate quotation for the delivery.
	pub async fn quotation(&self, order: &Order, service_code: &str) -> Result<Quotation> {
		let (pickup, dropoff) = common::route_pair(order)?;

		tracing::debug!(order = %order.id, service_code, "requesting quotation");

		let payload = serde_json::to_value(DeliveryRequest::from_order(order, pickup, dropoff))?;
		let url = self.client.endpoint(courier::QUOTES_PATH)?;
		let response = self.client.send(ApiRequest::post(url, payload)).await?;
		let quote: QuoteResponse = response.json()?;

		Ok(Quotation {
			price: Money { amount: quote.amount, currency: quote.currency.symbol },
		})
	}
}
