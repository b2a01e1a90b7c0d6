//! Delivery-partner location/info operation.

// self
use crate::{
	_prelude::*,
	courier::{self, DriverResponse},
	http::{ApiRequest, CourierHttpClient},
	model::{Coord, Personnel},
	ops::Adapter,
};

impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Fetches the assigned delivery partner's details and last known position.
	///
	/// Serves both the `driver.location` and `driver.info` operations; the
	/// courier exposes a single endpoint for both. Optional courier fields are
	/// defaulted to empty strings in the canonical record.
	pub async fn driver(&self, consignment_no: &str, driver_id: Option<&str>) -> Result<Personnel> {
		tracing::debug!(consignment_no, driver_id, "fetching driver details");

		let url = self.client.endpoint(&courier::courier_path(consignment_no))?;
		let response = self.client.send(ApiRequest::get(url)).await?;
		let driver: DriverResponse = response.json()?;

		Ok(Personnel {
			id: String::new(),
			name: driver.name.unwrap_or_default(),
			phone: driver.phone.unwrap_or_default(),
			vehicle_reg_no: driver.plate_number.unwrap_or_default(),
			vehicle_type: driver.vehicle_type.unwrap_or_default(),
			vehicle_name: driver.vehicle_name.unwrap_or_default(),
			photo: driver.picture_url.unwrap_or_default(),
			coord: driver.coordinates.map(|c| Coord { lat: c.latitude, lon: c.longitude }),
		})
	}
}
