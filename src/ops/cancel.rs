//! Shipment cancellation operation.

// self
use crate::{
	_prelude::*,
	courier,
	http::{ApiRequest, CourierHttpClient},
	model::Cancellation,
	ops::Adapter,
};

impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Cancels a previously created delivery.
	pub async fn cancel(&self, consignment_no: &str) -> Result<Cancellation> {
		tracing::debug!(consignment_no, "canceling shipment");

		let url = self.client.endpoint(&courier::delivery_path(consignment_no))?;

		self.client.send(ApiRequest::delete(url)).await?;

		Ok(Cancellation { success: true })
	}
}
