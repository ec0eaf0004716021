//! Behaviour tests for the loading-status registry over HTTP.
//!
//! Each scenario drives a real `HttpNamedResourceSource` against a local
//! stub whose responses can be held back, so the loading flag can be
//! observed while requests are outstanding.

use std::cell::RefCell;
use std::sync::Arc;
use std::time::Duration;

use data_access::domain::ports::{ResourcePayload, ResourceSourceError};
use data_access::domain::{FetchOutcome, LoadingStatusRegistry, OperationName};
use data_access::outbound::http::HttpNamedResourceSource;
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::json;
use tokio::runtime::Runtime;
use tokio::task::JoinHandle;
use tokio::time::timeout;

mod support;

use support::{CannedResponse, StubServer};

const STREETS_PATH: &str = "/resource/6d9h-4u5v.json";
const STUBBED_STREETS: &str = r#"[{"street":"Market St"}]"#;

type LoadHandle = JoinHandle<Result<ResourcePayload, ResourceSourceError>>;

struct LoadingStatusWorld {
    server: RefCell<Option<StubServer>>,
    registry: RefCell<Option<Arc<LoadingStatusRegistry>>>,
    handles: RefCell<Vec<LoadHandle>>,
    results: RefCell<Vec<Result<ResourcePayload, ResourceSourceError>>>,
    // Must stay last: the adapters and stub tasks above drop before it.
    runtime: Runtime,
}

impl LoadingStatusWorld {
    fn new() -> Self {
        Self {
            server: RefCell::new(None),
            registry: RefCell::new(None),
            handles: RefCell::new(Vec::new()),
            results: RefCell::new(Vec::new()),
            runtime: Runtime::new().expect("create runtime"),
        }
    }

    fn install(&self, server: StubServer) {
        let source = HttpNamedResourceSource::new().expect("client builds");
        let registry = LoadingStatusRegistry::new(Arc::new(source));
        *self.registry.borrow_mut() = Some(Arc::new(registry));
        *self.server.borrow_mut() = Some(server);
    }

    fn registry(&self) -> Arc<LoadingStatusRegistry> {
        self.registry
            .borrow()
            .as_ref()
            .map(Arc::clone)
            .expect("registry should be configured")
    }

    fn with_server<T>(&self, f: impl FnOnce(&StubServer) -> T) -> T {
        let server = self.server.borrow();
        f(server.as_ref().expect("stub server should be running"))
    }

    fn wait_for_in_flight(&self, count: u32) {
        let registry = self.registry();
        let name = OperationName::sf_street_names();
        self.runtime
            .block_on(async {
                timeout(Duration::from_secs(5), async {
                    while registry.in_flight(&name) != count {
                        tokio::time::sleep(Duration::from_millis(5)).await;
                    }
                })
                .await
            })
            .expect("in-flight count should settle");
    }
}

#[fixture]
fn world() -> LoadingStatusWorld {
    LoadingStatusWorld::new()
}

#[given("a registry fetching from a held street names stub")]
fn a_registry_fetching_from_a_held_street_names_stub(world: &LoadingStatusWorld) {
    let server = world
        .runtime
        .block_on(StubServer::gated(CannedResponse::ok_json(STUBBED_STREETS)));
    world.install(server);
}

#[given("a registry fetching from a failing street names stub")]
fn a_registry_fetching_from_a_failing_street_names_stub(world: &LoadingStatusWorld) {
    let server = world
        .runtime
        .block_on(StubServer::start(CannedResponse::server_error()));
    world.install(server);
}

#[when("the street names load is started")]
fn the_street_names_load_is_started(world: &LoadingStatusWorld) {
    let uri = world.with_server(|server| server.url(STREETS_PATH));
    let _entered = world.runtime.enter();
    let handle = world
        .registry()
        .spawn_named_resource(OperationName::sf_street_names(), uri);
    world.handles.borrow_mut().push(handle);
}

#[when("the stub releases {count} response")]
fn the_stub_releases_responses(world: &LoadingStatusWorld, count: usize) {
    world.with_server(|server| server.release(count));
}

#[when("the started loads finish")]
fn the_started_loads_finish(world: &LoadingStatusWorld) {
    let handles = world.handles.take();
    for handle in handles {
        let result = world
            .runtime
            .block_on(async { timeout(Duration::from_secs(5), handle).await })
            .expect("load should finish")
            .expect("load task should join");
        world.results.borrow_mut().push(result);
    }
}

#[then("the street names operation is loading")]
fn the_street_names_operation_is_loading(world: &LoadingStatusWorld) {
    assert!(
        world
            .registry()
            .is_loading(&OperationName::sf_street_names()),
        "street names should be loading"
    );
}

#[then("the street names operation is not loading")]
fn the_street_names_operation_is_not_loading(world: &LoadingStatusWorld) {
    assert!(
        !world
            .registry()
            .is_loading(&OperationName::sf_street_names()),
        "street names should not be loading"
    );
}

#[then("an operation that was never loaded is not loading")]
fn an_operation_that_was_never_loaded_is_not_loading(world: &LoadingStatusWorld) {
    let name = OperationName::new("ParkingPermits").expect("valid name");
    assert!(!world.registry().is_loading(&name));
}

#[then("exactly {count} load remains in flight")]
fn exactly_loads_remain_in_flight(world: &LoadingStatusWorld, count: u32) {
    world.wait_for_in_flight(count);
    assert_eq!(
        world
            .registry()
            .in_flight(&OperationName::sf_street_names()),
        count
    );
}

#[then("the stored street names equal the stubbed record")]
fn the_stored_street_names_equal_the_stubbed_record(world: &LoadingStatusWorld) {
    let payload = world
        .registry()
        .payload(&OperationName::sf_street_names())
        .expect("payload should be stored");
    assert_eq!(payload.records(), [json!({"street": "Market St"})]);
    let results = world.results.borrow();
    assert!(
        results.iter().all(Result::is_ok),
        "every load should succeed: {results:?}"
    );
}

#[then("the stored outcome is a status {status} failure")]
fn the_stored_outcome_is_a_status_failure(world: &LoadingStatusWorld, status: u16) {
    let outcome = world
        .registry()
        .outcome(&OperationName::sf_street_names())
        .expect("outcome should be stored");
    match outcome {
        FetchOutcome::Failed(ResourceSourceError::Status { status: actual, .. }) => {
            assert_eq!(actual, status);
        }
        other => panic!("expected a status failure, got {other:?}"),
    }
    assert!(world.results.borrow().iter().all(Result::is_err));
}

#[then("the stub received {count} requests")]
fn the_stub_received_requests(world: &LoadingStatusWorld, count: usize) {
    assert_eq!(world.with_server(StubServer::request_count), count);
}

#[scenario(
    path = "tests/features/loading_status.feature",
    name = "Street names load raises and clears the loading flag"
)]
fn street_names_load_raises_and_clears_the_loading_flag(world: LoadingStatusWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/loading_status.feature",
    name = "A server error still clears the loading flag"
)]
fn a_server_error_still_clears_the_loading_flag(world: LoadingStatusWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/loading_status.feature",
    name = "Overlapping loads keep the flag raised until both finish"
)]
fn overlapping_loads_keep_the_flag_raised_until_both_finish(world: LoadingStatusWorld) {
    drop(world);
}

#[scenario(
    path = "tests/features/loading_status.feature",
    name = "Operations that were never loaded report idle"
)]
fn operations_that_were_never_loaded_report_idle(world: LoadingStatusWorld) {
    drop(world);
}
