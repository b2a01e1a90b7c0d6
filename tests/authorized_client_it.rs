mod common;

// crates.io
use httpmock::prelude::*;
// self
use grab_express_adapter::{error::Error, model::WaypointKind, store::TokenStore};
use time::Duration;

const QUOTE_PATH: &str = "/grab-express/v1/deliveries/quotes";
const QUOTE_BODY: &str = "{\"amount\":12.5,\"currency\":{\"symbol\":\"MYR\"}}";

/// Seeds the shared store with a bearer the courier will reject.
async fn seed_stale_bearer(harness: &common::Harness) {
	harness
		.store
		.put(&harness.config.cache_key(), "Bearer stale", Duration::hours(1))
		.await
		.expect("Seeding the stale bearer should succeed.");
}

#[tokio::test]
async fn rejected_token_is_refreshed_and_retried_once() {
	let server = MockServer::start_async().await;
	let harness = common::build_adapter(&server);

	seed_stale_bearer(&harness).await;

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"fresh\",\"expires_in\":900}",
			);
		})
		.await;
	let stale_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(QUOTE_PATH).header("authorization", "Bearer stale");
			then.status(401).body("{\"message\":\"token expired\"}");
		})
		.await;
	let fresh_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(QUOTE_PATH).header("authorization", "Bearer fresh");
			then.status(200).header("content-type", "application/json").body(QUOTE_BODY);
		})
		.await;
	let quotation = harness
		.adapter
		.quotation(&common::sample_order(), "GRAB-ED")
		.await
		.expect("Quotation should succeed on the retried attempt.");

	assert_eq!(quotation.price.amount, 12.5);
	assert_eq!(quotation.price.currency, "MYR");

	// Exactly two courier calls: one with the stale cached token, one with the
	// refreshed token. Exactly one identity call, from the forced refresh.
	stale_mock.assert_async().await;
	fresh_mock.assert_async().await;
	token_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn second_rejection_fails_without_a_third_attempt() {
	let server = MockServer::start_async().await;
	let harness = common::build_adapter(&server);

	seed_stale_bearer(&harness).await;

	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"fresh\",\"expires_in\":900}",
			);
		})
		.await;
	let quote_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(QUOTE_PATH);
			then.status(401).body("{\"message\":\"still expired\"}");
		})
		.await;
	let err = harness
		.adapter
		.quotation(&common::sample_order(), "GRAB-ED")
		.await
		.expect_err("Two rejections should surface the second 401.");

	assert!(matches!(err, Error::Upstream { status: 401, .. }));

	quote_mock.assert_calls_async(2).await;
	token_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn non_auth_failures_are_not_retried() {
	let server = MockServer::start_async().await;
	let harness = common::build_adapter(&server);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200).header("content-type", "application/json").body(
				"{\"token_type\":\"Bearer\",\"access_token\":\"fresh\",\"expires_in\":900}",
			);
		})
		.await;
	let quote_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(QUOTE_PATH);
			then.status(422).body("{\"message\":\"invalid destination\"}");
		})
		.await;
	let err = harness
		.adapter
		.quotation(&common::sample_order(), "GRAB-ED")
		.await
		.expect_err("A non-401 failure should surface immediately.");

	assert!(matches!(err, Error::Upstream { status: 422, .. }));
	assert_eq!(err.normalized(), "[422] - {\"message\":\"invalid destination\"}");

	quote_mock.assert_calls_async(1).await;
	token_mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn validation_failures_never_reach_the_network() {
	let server = MockServer::start_async().await;
	let harness = common::build_adapter(&server);
	let token_mock = server
		.mock_async(|when, then| {
			when.method(POST).path(common::TOKEN_PATH);
			then.status(200);
		})
		.await;
	let mut order = common::sample_order();

	order.waypoint = None;

	let err = harness
		.adapter
		.quotation(&order, "GRAB-ED")
		.await
		.expect_err("An order without waypoints should fail validation.");

	assert!(matches!(err, Error::Validation(_)));
	assert_eq!(err.normalized(), "Order has no waypoint, expecting exactly 2 waypoints.");

	let err = harness
		.adapter
		.create(&common::order_without_coord(WaypointKind::Pickup), "GRAB-ED")
		.await
		.expect_err("A pickup contact without coordinates should fail validation.");

	assert_eq!(err.normalized(), "Sender coordinate is required.");

	token_mock.assert_calls_async(0).await;
}
