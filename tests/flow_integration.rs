//! Integration tests for the screen flow.
//!
//! Catalog tests spin up an Axum server on a random port serving canned
//! product JSON, and drive the real `HttpCatalog` against it.

use std::sync::Arc;
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tokio::time::timeout;

use flitzy::catalog::{Catalog, HomeFeed, HttpCatalog};
use flitzy::config::FlowConfig;
use flitzy::geo::{Coordinate, DeniedPermission, FixedPosition, GeolocationProvider};
use flitzy::location::{AddressField, CapturePhase, LocationEvent};
use flitzy::navigation::{Route, RouteName, UserType};
use flitzy::screens::{ScreenFlow, SignInOutcome};

/// Maximum time any test is allowed to run before we consider it hung.
const TEST_TIMEOUT: Duration = Duration::from_secs(5);

fn products() -> Value {
    json!([
        {"id": 1, "title": "Backpack", "price": 109.95, "category": "men's clothing",
         "image": "https://img.test/1.jpg", "rating": {"rate": 3.9, "count": 120}},
        {"id": 2, "title": "Bracelet", "price": 695.0, "category": "jewelery",
         "image": "https://img.test/2.jpg", "rating": {"rate": 4.6, "count": 400}},
        {"id": 3, "title": "SSD", "price": 109.0, "category": "electronics",
         "image": "https://img.test/3.jpg", "rating": {"rate": 4.8, "count": 319}},
        {"id": 4, "title": "Jacket", "price": 56.99, "category": "men's clothing",
         "image": "https://img.test/4.jpg", "rating": {"rate": 4.1, "count": 259}}
    ])
}

/// Start a fake catalog server, return its base URL.
async fn start_catalog(healthy: bool) -> String {
    let app = if healthy {
        Router::new().route("/products", get(|| async { Json(products()) }))
    } else {
        Router::new().route(
            "/products",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
    };

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give the server a moment to start accepting connections.
    tokio::time::sleep(Duration::from_millis(50)).await;

    format!("http://127.0.0.1:{port}")
}

fn flow_at(geo: Arc<dyn GeolocationProvider>, catalog_url: &str) -> ScreenFlow {
    let config = FlowConfig {
        catalog_base_url: catalog_url.to_string(),
        ..FlowConfig::default()
    };
    let catalog = Arc::new(HttpCatalog::new(config.catalog_base_url.clone()));
    ScreenFlow::new(config, geo, catalog)
}

fn bangalore() -> Arc<dyn GeolocationProvider> {
    Arc::new(FixedPosition::new(Coordinate::new(12.90, 77.60)))
}

#[tokio::test]
async fn http_catalog_parses_products() {
    timeout(TEST_TIMEOUT, async {
        let url = start_catalog(true).await;
        let products = HttpCatalog::new(&url).fetch_products().await.unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[1].category, "jewelery");
        assert_eq!(products[2].rate(), Some(4.8));
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn http_catalog_error_degrades_feed() {
    timeout(TEST_TIMEOUT, async {
        let url = start_catalog(false).await;
        let catalog = HttpCatalog::new(&url);
        assert!(catalog.fetch_products().await.is_err());

        let feed = HomeFeed::load(&catalog).await;
        assert!(feed.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn unreachable_catalog_degrades_feed() {
    timeout(TEST_TIMEOUT, async {
        // Bind and drop to get a port nothing listens on
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let mut flow = flow_at(bangalore(), &format!("http://127.0.0.1:{port}"));
        flow.onboarding_get_started().unwrap();
        let feed = flow.home_load_feed().await.unwrap();
        assert!(feed.is_empty());
    })
    .await
    .expect("test timed out");
}

#[tokio::test]
async fn new_customer_reaches_home_with_address() {
    timeout(TEST_TIMEOUT, async {
        let url = start_catalog(true).await;
        let mut flow = flow_at(bangalore(), &url);

        flow.onboarding_sign_in().unwrap();
        flow.sign_in_form().unwrap().phone_number = "9800000000".into();
        flow.sign_in_form().unwrap().request_otp();
        flow.sign_in_proceed(SignInOutcome::NewUser).unwrap();

        let details = flow.new_user_details().unwrap();
        details.name = "Asha".into();
        details.email = "asha@example.com".into();
        flow.new_user_save_details().unwrap();
        assert_eq!(flow.current_name(), RouteName::LocationScreen);

        let mut events = flow.location().unwrap().subscribe();
        let origin = flow.location_start().await.unwrap().unwrap();
        assert_eq!(flow.location().unwrap().phase(), CapturePhase::Resolved);
        assert_eq!(events.recv().await.unwrap(), LocationEvent::Resolved { region: origin });

        let ctl = flow.location_mut().unwrap();
        ctl.tap(Coordinate::new(12.91, 77.61));
        ctl.tap(Coordinate::new(12.92, 77.62));
        ctl.set_field(AddressField::FlatNo, "12B");
        ctl.set_field(AddressField::Landmark, "Near metro");
        assert_eq!(ctl.origin(), Some(origin));

        let commit = flow.save_location().unwrap();
        assert_eq!(commit.selection, Some(Coordinate::new(12.92, 77.62)));
        assert_eq!(commit.address.summary(), "12B, Near metro");
        assert_eq!(flow.current_name(), RouteName::Home);
        assert_eq!(flow.delivery(), Some(&commit));

        let feed = flow.home_load_feed().await.unwrap();
        assert_eq!(feed.products.len(), 4);
        let recommended: Vec<u64> = feed.recommended().iter().map(|p| p.id).collect();
        assert_eq!(recommended, vec![2, 3, 4]);
        assert_eq!(feed.categories(), vec!["men's clothing", "jewelery", "electronics"]);

        flow.open_category("jewelery").unwrap();
        assert_eq!(
            flow.current().route,
            Route::Menulist {
                category: "jewelery".into()
            }
        );

        // Back from the category list lands on the same Home frame, delivery intact
        assert!(flow.back());
        assert_eq!(flow.delivery(), Some(&commit));
    })
    .await
    .expect("test timed out");
}

#[test]
fn vendor_sign_up_to_account_created() {
    let mut flow = flow_at(bangalore(), "http://127.0.0.1:9");
    flow.onboarding_sign_in().unwrap();
    flow.sign_in_sign_up().unwrap();

    let form = flow.sign_up_form().unwrap();
    form.select_tab(UserType::Vendor);
    form.set_business_name("Fresh Farms");
    form.email = "owner@freshfarms.in".into();
    assert!(form.email_looks_valid());

    let frame = flow.sign_up_submit().unwrap();
    let params = serde_json::to_value(frame).unwrap()["params"].clone();
    assert_eq!(params, json!({"userType": "Vendor"}));

    flow.verify_phone_confirm("0000").unwrap();
    flow.account_created_continue().unwrap();
    assert_eq!(flow.current_name(), RouteName::Home);
    assert_eq!(flow.navigator().depth(), 6);
}

#[test]
fn switching_to_sign_in_drops_sign_up_from_history() {
    let mut flow = flow_at(bangalore(), "http://127.0.0.1:9");
    flow.onboarding_sign_in().unwrap();
    let first_sign_in = flow.current().id;
    flow.sign_in_sign_up().unwrap();
    let depth = flow.navigator().depth();

    flow.sign_up_switch_to_sign_in().unwrap();
    assert_eq!(flow.current_name(), RouteName::SignIn);
    assert_eq!(flow.navigator().depth(), depth);
    assert!(flow.navigator().frames().all(|f| f.name() != RouteName::SignUp));

    assert!(flow.back());
    assert_eq!(flow.current().id, first_sign_in);
    assert!(flow.back());
    assert_eq!(flow.current_name(), RouteName::Onboarding);
    assert!(!flow.back());
}

#[tokio::test]
async fn denied_permission_keeps_address_form_usable() {
    let mut flow = flow_at(Arc::new(DeniedPermission), "http://127.0.0.1:9");
    flow.open(Route::LocationScreen);

    assert!(flow.location_start().await.is_err());
    let view = flow.location().unwrap().projection();
    assert_eq!(view.phase, CapturePhase::Unresolved);
    assert!(view.selection.is_none());
    assert!(view.markers.is_empty());

    let ctl = flow.location_mut().unwrap();
    assert!(!ctl.recenter());
    ctl.set_field_by_name("street", "Church Street").unwrap();
    ctl.set_field_by_name("area", "Ashok Nagar").unwrap();
    assert_eq!(ctl.draft().street, "Church Street");
    assert_eq!(ctl.draft().area, "Ashok Nagar");
}
