mod common;

// crates.io
use httpmock::prelude::*;
// self
use grab_express_adapter::{
	dispatch::{DispatchError, Dispatcher, Operation},
	error::Error,
};

#[tokio::test]
async fn registration_rejects_names_outside_the_closed_table() {
	let server = MockServer::start_async().await;
	let mut dispatcher = Dispatcher::new(common::build_adapter(&server).adapter);

	dispatcher.register("quotation").expect("A table operation should register.");

	let err = dispatcher
		.register("teleport")
		.expect_err("A name outside the closed table should be rejected at registration.");

	assert!(matches!(err, DispatchError::UnknownOperation { .. }));
	assert_eq!(err.to_string(), "Operation `teleport` is not in the dispatch table.");

	let err = dispatcher
		.register("quotation")
		.expect_err("Registering the same operation twice should be rejected.");

	assert!(matches!(err, DispatchError::AlreadyRegistered { operation: Operation::Quotation }));
	assert_eq!(dispatcher.registered(), &[Operation::Quotation]);
}

#[tokio::test]
async fn unregistered_operations_are_not_callable() {
	let server = MockServer::start_async().await;
	let mut dispatcher = Dispatcher::new(common::build_adapter(&server).adapter);

	dispatcher.register("quotation").expect("A table operation should register.");

	let err = dispatcher
		.dispatch("cancel", serde_json::json!({ "consignmentNo": "GX-1" }))
		.await
		.expect_err("An unregistered operation should not be callable.");

	assert!(matches!(
		err,
		Error::Dispatch(DispatchError::NotRegistered { operation: Operation::Cancel }),
	));
}

#[tokio::test]
async fn malformed_envelopes_report_the_json_path() {
	let server = MockServer::start_async().await;
	let dispatcher = Dispatcher::with_all_operations(common::build_adapter(&server).adapter);
	let err = dispatcher
		.dispatch("cancel", serde_json::json!({ "consignment": "GX-1" }))
		.await
		.expect_err("An envelope missing consignmentNo should be rejected.");

	assert!(matches!(err, Error::Dispatch(DispatchError::Envelope { .. })));
	assert!(err.to_string().contains("cancel"));
}

#[tokio::test]
async fn quotation_dispatches_end_to_end() {
	let server = MockServer::start_async().await;
	let harness = common::build_adapter(&server);
	let dispatcher = Dispatcher::with_all_operations(harness.adapter);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"tok\",\"expires_in\":900}",
			);
		})
		.await;
	let _quote = server
		.mock_async(|when, then| {
			when.method(POST).path("/grab-express/v1/deliveries/quotes");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"amount\":8.9,\"currency\":{\"symbol\":\"MYR\"}}");
		})
		.await;
	let envelope = serde_json::json!({
		"order": serde_json::to_value(common::sample_order()).expect("Order should serialize."),
		"serviceCode": "GRAB-ED",
	});
	let outcome = dispatcher
		.dispatch("quotation", envelope)
		.await
		.expect("Dispatched quotation should succeed.");

	assert_eq!(outcome.reply["price"]["amount"], 8.9);
	assert_eq!(outcome.reply["price"]["currency"], "MYR");
	assert!(outcome.uploads.is_empty());
}

#[tokio::test]
async fn tracking_dispatch_carries_the_ack_and_unmapped_status() {
	let server = MockServer::start_async().await;
	let dispatcher = Dispatcher::with_all_operations(common::build_adapter(&server).adapter);
	let envelope = serde_json::json!({
		"body": {
			"status": "TELEPORTED",
			"deliveryID": "GX-9",
			"timestamp": 1_700_000_000,
		},
	});
	let outcome = dispatcher
		.dispatch("tracking-callback", envelope)
		.await
		.expect("Unmapped statuses should still produce a reply.");

	assert_eq!(outcome.reply["timeline"], serde_json::json!([]));
	assert_eq!(outcome.reply["unmappedStatus"], "TELEPORTED");
	assert_eq!(outcome.reply["response"]["body"], "OK");
	assert_eq!(outcome.reply["response"]["header"], "application/json");
}

#[tokio::test]
async fn available_services_answers_without_a_courier_call() {
	let server = MockServer::start_async().await;
	let dispatcher = Dispatcher::with_all_operations(common::build_adapter(&server).adapter);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200);
		})
		.await;
	let outcome = dispatcher
		.dispatch("available-services", serde_json::json!({}))
		.await
		.expect("The capability descriptor should always be available.");

	assert_eq!(
		outcome.reply["services"],
		serde_json::json!(["quotation", "create", "track", "cancel"]),
	);
	assert_eq!(
		outcome.reply["create"]["required"],
		serde_json::json!(["weight", "price", "id", "waypoint", "dimension", "note"]),
	);
	assert_eq!(outcome.reply["track"]["required"], serde_json::json!(["consignmentNo"]));

	token_mock.assert_calls_async(0).await;
}

#[tokio::test]
async fn wire_boundary_collapses_failures_into_one_string() {
	let server = MockServer::start_async().await;
	let dispatcher = Dispatcher::with_all_operations(common::build_adapter(&server).adapter);
	let _token = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"tok\",\"expires_in\":900}",
			);
		})
		.await;
	let _quote = server
		.mock_async(|when, then| {
			when.method(POST).path("/grab-express/v1/deliveries/quotes");
			then.status(404).body("{\"msg\":\"x\"}");
		})
		.await;
	let envelope = serde_json::json!({
		"order": serde_json::to_value(common::sample_order()).expect("Order should serialize."),
		"serviceCode": "GRAB-ED",
	});
	let message = dispatcher
		.dispatch_to_wire("quotation", envelope)
		.await
		.expect_err("The courier failure should collapse into a wire string.");

	assert_eq!(message, "[404] - {\"msg\":\"x\"}");
}
