//! Tracking-webhook normalization with observable proof-image uploads.

// self
use crate::{
	_prelude::*,
	courier::{DeliveryStatus, TrackingEvent},
	error::ValidationError,
	http::{ApiRequest, CourierHttpClient},
	model::{CallbackAck, Coord, EventPersonnel, TimelineEntry, TrackingOutcome},
	ops::Adapter,
	storage::PodUpload,
};

const POD_CONTENT_TYPE: &str = "image/jpeg";

impl<C> Adapter<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Normalizes a courier tracking webhook into canonical timeline entries.
	///
	/// Statuses outside the closed table are reported through
	/// `unmapped_status` rather than silently dropped. Proof images are
	/// fetched and uploaded in the background: the storage path is attached to
	/// the timeline entry immediately, and the returned handles let callers
	/// await completion or drop it to keep the webhook response fast. Upload
	/// failures, including proof URLs that do not parse, fail only the upload
	/// task; they are logged and never surfaced to the webhook sender.
	pub async fn tracking_callback(&self, event: TrackingEvent) -> Result<TrackingOutcome> {
		let Some(status) = DeliveryStatus::parse(&event.status) else {
			tracing::warn!(status = %event.status, "unmapped courier status, emitting empty timeline");

			return Ok(TrackingOutcome {
				timeline: vec![],
				unmapped_status: Some(event.status),
				ack: CallbackAck::default(),
				uploads: vec![],
			});
		};
		let consignment_no = event.consignment_no();
		let date_time = OffsetDateTime::from_unix_timestamp(event.timestamp)
			.map_err(|_| ValidationError::InvalidTimestamp { value: event.timestamp })?;
		let (personnel, coord) = match &event.driver {
			Some(driver) => (
				EventPersonnel {
					name: driver.name.clone(),
					phone: driver.phone.clone(),
					vehicle_reg_no: driver.license_plate.clone(),
					photo: driver.photo_url.clone(),
				},
				match (driver.current_lat, driver.current_lng) {
					(Some(lat), Some(lon)) => Some(Coord { lat, lon }),
					_ => None,
				},
			),
			None => (EventPersonnel::default(), None),
		};
		let mut entry = TimelineEntry {
			consignment_no: consignment_no.clone(),
			status_code: status.canonical_code(),
			location: String::new(),
			date_time,
			personnel,
			coord,
			pod_picture: vec![],
		};
		let mut uploads = Vec::new();
		let proof = match status {
			DeliveryStatus::Completed => event.dropoff_proof_url.as_deref().map(|url| (url, 'd')),
			DeliveryStatus::InDelivery => event.pickup_proof_url.as_deref().map(|url| (url, 'p')),
			_ => None,
		};

		if let Some((proof_url, side)) = proof {
			let upload = self.spawn_pod_upload(proof_url, &consignment_no, side);

			entry.pod_picture.push(upload.path().to_owned());
			uploads.push(upload);
		}

		Ok(TrackingOutcome {
			timeline: vec![entry],
			unmapped_status: None,
			ack: CallbackAck::default(),
			uploads,
		})
	}

	fn spawn_pod_upload(&self, proof_url: &str, consignment_no: &str, side: char) -> PodUpload {
		// An unparseable URL fails the upload task, never the callback.
		let source = Url::parse(proof_url)
			.map_err(|_| ValidationError::InvalidProofUrl { url: proof_url.to_owned() });
		let path =
			format!("pod_img/{consignment_no}_{side}{}.jpeg", self.objects.random_name());
		let http = self.http.clone();
		let objects = self.objects.clone();
		let task_path = path.clone();

		tracing::debug!(path = %path, "scheduling proof image upload");

		PodUpload::spawn(path, async move {
			let outcome = match source {
				Ok(source) => fetch_and_upload(http, objects, source, &task_path).await,
				Err(e) => Err(e.into()),
			};

			match &outcome {
				Ok(()) => tracing::debug!(path = %task_path, "proof image upload finished"),
				Err(e) => {
					tracing::error!(path = %task_path, error = %e, "proof image upload failed")
				},
			}

			outcome
		})
	}
}

async fn fetch_and_upload<C>(
	http: Arc<C>,
	objects: Arc<dyn crate::storage::ObjectStore>,
	source: Url,
	path: &str,
) -> Result<()>
where
	C: ?Sized + CourierHttpClient,
{
	let response = http.execute(ApiRequest::get(source)).await?;

	if !response.is_success() {
		let body = response.body_text();

		return Err(Error::Upstream {
			status: response.status,
			body: if body.is_empty() { None } else { Some(body) },
		});
	}

	objects.upload(response.body, path, POD_CONTENT_TYPE).await?;

	Ok(())
}
