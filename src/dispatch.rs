//! Closed dispatch table bridging named platform operations onto the adapter.
//!
//! The table is tagged and closed: every operation name maps to an [`Operation`]
//! variant, unknown names are rejected when handlers are registered rather than
//! when a request arrives. [`Dispatcher::dispatch_to_wire`] is the single place
//! where the crate's tagged errors collapse into the one-string failure contract
//! the platform transport carries.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	courier::TrackingEvent,
	http::CourierHttpClient,
	model::{CallbackAck, Order, TimelineEntry},
	ops::Adapter,
	storage::PodUpload,
};

/// Operations the platform can invoke on this adapter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
	/// Rate quotation for an order.
	Quotation,
	/// Shipment creation.
	Create,
	/// Shipment cancellation.
	Cancel,
	/// Delivery-partner position lookup.
	DriverLocation,
	/// Delivery-partner details lookup.
	DriverInfo,
	/// Inbound tracking webhook normalization.
	TrackingCallback,
	/// Static capability descriptor; answered locally without a courier call.
	AvailableServices,
}
impl Operation {
	/// Every operation in the closed table, in registration order.
	pub const ALL: [Self; 7] = [
		Self::Quotation,
		Self::Create,
		Self::Cancel,
		Self::DriverLocation,
		Self::DriverInfo,
		Self::TrackingCallback,
		Self::AvailableServices,
	];

	/// Wire name the platform addresses this operation by.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Quotation => "quotation",
			Self::Create => "create",
			Self::Cancel => "cancel",
			Self::DriverLocation => "driver.location",
			Self::DriverInfo => "driver.info",
			Self::TrackingCallback => "tracking-callback",
			Self::AvailableServices => "available-services",
		}
	}

	/// Resolves a wire name against the closed table.
	pub fn parse(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|operation| operation.as_str() == name)
	}
}
impl Display for Operation {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Failures raised by the dispatch table itself.
#[derive(Debug, ThisError)]
pub enum DispatchError {
	/// Registration or call named an operation outside the closed table.
	#[error("Operation `{name}` is not in the dispatch table.")]
	UnknownOperation {
		/// The rejected operation name.
		name: String,
	},
	/// Call named an operation that was never registered.
	#[error("Operation `{operation}` is not registered.")]
	NotRegistered {
		/// The unregistered operation.
		operation: Operation,
	},
	/// Operation was registered twice.
	#[error("Operation `{operation}` is already registered.")]
	AlreadyRegistered {
		/// The doubly registered operation.
		operation: Operation,
	},
	/// Inbound payload did not match the operation's envelope shape.
	#[error("Envelope for operation `{operation}` is malformed: {source}.")]
	Envelope {
		/// The operation whose envelope failed to decode.
		operation: Operation,
		/// Structured decoding failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

/// Reply produced by one dispatched operation.
///
/// `uploads` is non-empty only for tracking callbacks that scheduled
/// proof-image uploads; callers may await the handles or drop them.
#[derive(Debug)]
pub struct DispatchOutcome {
	/// JSON reply body for the platform.
	pub reply: serde_json::Value,
	/// Handles to background uploads scheduled by the operation.
	pub uploads: Vec<PodUpload>,
}
impl DispatchOutcome {
	fn reply_only(reply: serde_json::Value) -> Self {
		Self { reply, uploads: vec![] }
	}
}

/// Dispatch table binding registered operation names to adapter handlers.
pub struct Dispatcher<C>
where
	C: ?Sized + CourierHttpClient,
{
	adapter: Adapter<C>,
	registered: Vec<Operation>,
}
impl<C> Dispatcher<C>
where
	C: ?Sized + CourierHttpClient,
{
	/// Builds an empty table over `adapter`; no operation is callable until
	/// registered.
	pub fn new(adapter: Adapter<C>) -> Self {
		Self { adapter, registered: Vec::new() }
	}

	/// Builds a table with every operation of the closed set registered.
	pub fn with_all_operations(adapter: Adapter<C>) -> Self {
		Self { adapter, registered: Operation::ALL.to_vec() }
	}

	/// Registers one operation by wire name.
	///
	/// Names outside the closed table and duplicate registrations are rejected
	/// here, so a misconfigured deployment fails at startup instead of on the
	/// first request.
	pub fn register(&mut self, name: &str) -> Result<Operation, DispatchError> {
		let operation =
			Operation::parse(name).ok_or_else(|| DispatchError::UnknownOperation {
				name: name.to_owned(),
			})?;

		if self.registered.contains(&operation) {
			return Err(DispatchError::AlreadyRegistered { operation });
		}

		self.registered.push(operation);

		Ok(operation)
	}

	/// Operations registered so far, in registration order.
	pub fn registered(&self) -> &[Operation] {
		&self.registered
	}

	/// Routes one named call to its handler.
	///
	/// The payload is the operation's JSON envelope; decoding failures report
	/// the offending JSON path.
	pub async fn dispatch(
		&self,
		name: &str,
		payload: serde_json::Value,
	) -> Result<DispatchOutcome> {
		let operation = Operation::parse(name)
			.ok_or_else(|| DispatchError::UnknownOperation { name: name.to_owned() })?;

		if !self.registered.contains(&operation) {
			return Err(DispatchError::NotRegistered { operation }.into());
		}

		tracing::debug!(operation = %operation, "dispatching operation");

		match operation {
			Operation::Quotation => {
				let envelope: OrderEnvelope = decode(operation, payload)?;
				let quotation =
					self.adapter.quotation(&envelope.order, &envelope.service_code).await?;

				Ok(DispatchOutcome::reply_only(serde_json::to_value(quotation)?))
			},
			Operation::Create => {
				let envelope: OrderEnvelope = decode(operation, payload)?;
				let receipt = self.adapter.create(&envelope.order, &envelope.service_code).await?;

				Ok(DispatchOutcome::reply_only(serde_json::to_value(receipt)?))
			},
			Operation::Cancel => {
				let envelope: ConsignmentEnvelope = decode(operation, payload)?;
				let cancellation = self.adapter.cancel(&envelope.consignment_no).await?;

				Ok(DispatchOutcome::reply_only(serde_json::to_value(cancellation)?))
			},
			Operation::DriverLocation | Operation::DriverInfo => {
				let envelope: DriverEnvelope = decode(operation, payload)?;
				let personnel = self
					.adapter
					.driver(&envelope.consignment_no, envelope.driver_id.as_deref())
					.await?;

				Ok(DispatchOutcome::reply_only(serde_json::to_value(personnel)?))
			},
			Operation::TrackingCallback => {
				let envelope: TrackingEnvelope = decode(operation, payload)?;
				let outcome = self.adapter.tracking_callback(envelope.body).await?;
				let reply = serde_json::to_value(TrackingReply {
					timeline: outcome.timeline,
					unmapped_status: outcome.unmapped_status,
					response: outcome.ack,
				})?;

				Ok(DispatchOutcome { reply, uploads: outcome.uploads })
			},
			Operation::AvailableServices =>
				Ok(DispatchOutcome::reply_only(serde_json::to_value(available_services())?)),
		}
	}

	/// Routes one named call and collapses any failure into the single string
	/// the platform transport carries.
	pub async fn dispatch_to_wire(
		&self,
		name: &str,
		payload: serde_json::Value,
	) -> Result<DispatchOutcome, String> {
		self.dispatch(name, payload).await.map_err(|e| {
			tracing::error!(operation = name, error = %e, "operation failed");

			e.normalized()
		})
	}
}
impl<C> Debug for Dispatcher<C>
where
	C: ?Sized + CourierHttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Dispatcher")
			.field("adapter", &self.adapter)
			.field("registered", &self.registered)
			.finish()
	}
}

/// Static capability descriptor answered without a courier call.
///
/// Advertises the supported service names plus the canonical fields each
/// operation requires from the platform.
pub fn available_services() -> ServiceCatalog {
	const ORDER_FIELDS: &[&str] = &["weight", "price", "id", "waypoint", "dimension", "note"];
	const CONSIGNMENT_FIELDS: &[&str] = &["consignmentNo"];

	ServiceCatalog {
		services: ["quotation", "create", "track", "cancel"],
		quotation: OperationRequirements { required: ORDER_FIELDS },
		create: OperationRequirements { required: ORDER_FIELDS },
		cancel: OperationRequirements { required: CONSIGNMENT_FIELDS },
		track: OperationRequirements { required: CONSIGNMENT_FIELDS },
	}
}

/// Capability descriptor listing supported services and their required fields.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ServiceCatalog {
	/// Supported service names.
	pub services: [&'static str; 4],
	/// Field requirements for quotations.
	pub quotation: OperationRequirements,
	/// Field requirements for shipment creation.
	pub create: OperationRequirements,
	/// Field requirements for cancellation.
	pub cancel: OperationRequirements,
	/// Field requirements for tracking lookups.
	pub track: OperationRequirements,
}

/// Canonical fields one operation requires from the platform.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct OperationRequirements {
	/// Names of the required canonical fields.
	pub required: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderEnvelope {
	order: Order,
	service_code: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ConsignmentEnvelope {
	consignment_no: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DriverEnvelope {
	consignment_no: String,
	#[serde(default)]
	driver_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TrackingEnvelope {
	body: TrackingEvent,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TrackingReply {
	timeline: Vec<TimelineEntry>,
	#[serde(skip_serializing_if = "Option::is_none")]
	unmapped_status: Option<String>,
	response: CallbackAck,
}

fn decode<T>(operation: Operation, payload: serde_json::Value) -> Result<T, DispatchError>
where
	T: DeserializeOwned,
{
	serde_path_to_error::deserialize(payload)
		.map_err(|source| DispatchError::Envelope { operation, source })
}
