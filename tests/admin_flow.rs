use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use axum::extract::Path;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde_json::{json, Value};

use vehicle_rental::client::ApiClient;
use vehicle_rental::models::user::{Role, Session};
use vehicle_rental::screens::admin::VehicleForm;
use vehicle_rental::screens::AdminScreen;
use vehicle_rental::services::{UserService, VehicleService};
use vehicle_rental::session::SessionStore;

static SESSION_COUNTER: AtomicU32 = AtomicU32::new(0);

fn temp_session_path() -> PathBuf {
    std::env::temp_dir().join(format!(
        "admin_flow_test_{}_{}.json",
        std::process::id(),
        SESSION_COUNTER.fetch_add(1, Ordering::SeqCst)
    ))
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

fn admin_session() -> Session {
    Session {
        id: "adm-1".to_string(),
        name: "Root".to_string(),
        email: "admin@example.com".to_string(),
        role: Role::Admin,
        token: "admin-tok".to_string(),
    }
}

fn vehicle_json(id: &str) -> Value {
    json!({
        "_id": id,
        "make": "Toyota",
        "model": "Corolla",
        "year": 2022,
        "pricePerDay": 55.0,
        "location": "Madrid",
        "description": "Compact sedan",
        "seats": 5,
        "fuelType": "petrol",
        "transmission": "automatic",
        "availability": true,
        "images": "https://cdn.example.com/corolla.jpg"
    })
}

async fn admin_screen(client: &ApiClient) -> (AdminScreen, SessionStore) {
    let store = SessionStore::new(temp_session_path());
    store.login(admin_session()).await.unwrap();
    let screen = AdminScreen::new(
        VehicleService::new(client.clone()),
        UserService::new(client.clone()),
        store.clone(),
    );
    (screen, store)
}

#[tokio::test]
async fn test_update_resends_the_full_payload_on_the_wire() {
    let captured = Arc::new(Mutex::new(None::<Value>));
    let captured_handler = captured.clone();

    let app = Router::new()
        .route(
            "/api/vehicle/getAllVehicles",
            get(|| async { Json(json!({"success": true, "data": [vehicle_json("veh-1")]})) }),
        )
        .route(
            "/api/vehicle/update/:id",
            put(move |Path(_id): Path<String>, Json(body): Json<Value>| {
                let captured = captured_handler.clone();
                async move {
                    *captured.lock().unwrap() = Some(body.clone());
                    let mut data = body;
                    data["_id"] = json!("veh-1");
                    Json(json!({"success": true, "data": data}))
                }
            }),
        );

    let base = serve(app).await;
    let client = ApiClient::new(base, 5).unwrap();
    let (mut screen, store) = admin_screen(&client).await;

    screen.load_vehicles().await;
    screen.start_edit("veh-1").unwrap();

    // Solo cambia el precio, pero el body viaja con todos los campos
    screen.form.price_per_day = 60.0;
    screen.submit_form().await.unwrap();

    let body = captured.lock().unwrap().clone().unwrap();
    for key in [
        "make",
        "model",
        "year",
        "pricePerDay",
        "location",
        "description",
        "seats",
        "fuelType",
        "transmission",
        "availability",
        "images",
    ] {
        assert!(body.get(key).is_some(), "missing field {}", key);
    }
    assert_eq!(body["pricePerDay"], 60.0);
    assert_eq!(body["make"], "Toyota");

    // La lista local quedó parcheada y el formulario salió del modo edición
    assert_eq!(screen.vehicles().data[0].price_per_day, 60.0);
    assert!(!screen.is_editing());
    assert_eq!(screen.form, VehicleForm::default());

    store.logout().await;
}

#[tokio::test]
async fn test_delete_hits_backend_only_after_confirmation() {
    let delete_calls = Arc::new(AtomicU32::new(0));
    let delete_calls_handler = delete_calls.clone();

    let app = Router::new()
        .route(
            "/api/vehicle/getAllVehicles",
            get(|| async {
                Json(json!({
                    "success": true,
                    "data": [vehicle_json("veh-1"), vehicle_json("veh-2")]
                }))
            }),
        )
        .route(
            "/api/vehicle/delete/:id",
            delete(move |Path(_id): Path<String>| {
                let calls = delete_calls_handler.clone();
                async move {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Json(json!({"success": true, "message": "deleted"}))
                }
            }),
        );

    let base = serve(app).await;
    let client = ApiClient::new(base, 5).unwrap();
    let (mut screen, store) = admin_screen(&client).await;

    screen.load_vehicles().await;
    assert_eq!(screen.vehicles().data.len(), 2);

    // Marcar no dispara nada
    screen.request_delete("veh-1");
    assert_eq!(delete_calls.load(Ordering::SeqCst), 0);

    // Descartar tampoco, y además invalida la confirmación posterior
    screen.dismiss_delete();
    assert!(screen.confirm_delete().await.is_err());
    assert_eq!(delete_calls.load(Ordering::SeqCst), 0);

    // Solo la confirmación explícita llega al backend
    screen.request_delete("veh-1");
    screen.confirm_delete().await.unwrap();
    assert_eq!(delete_calls.load(Ordering::SeqCst), 1);
    assert_eq!(screen.vehicles().data.len(), 1);
    assert_eq!(screen.vehicles().data[0].id, "veh-2");

    store.logout().await;
}

#[tokio::test]
async fn test_create_appends_to_list_and_resets_form() {
    let app = Router::new().route(
        "/api/vehicle/create",
        post(|Json(body): Json<Value>| async move {
            let mut data = body;
            data["_id"] = json!("veh-new");
            Json(json!({"success": true, "data": data}))
        }),
    );

    let base = serve(app).await;
    let client = ApiClient::new(base, 5).unwrap();
    let (mut screen, store) = admin_screen(&client).await;

    screen.form.make = "Kia".to_string();
    screen.form.model = "Rio".to_string();
    screen.form.price_per_day = 40.0;
    screen.form.location = "Valencia".to_string();
    screen.submit_form().await.unwrap();

    assert_eq!(screen.vehicles().data.len(), 1);
    assert_eq!(screen.vehicles().data[0].id, "veh-new");
    assert_eq!(screen.vehicles().data[0].make, "Kia");
    assert_eq!(screen.form, VehicleForm::default());

    store.logout().await;
}

#[tokio::test]
async fn test_payments_panel_lists_only_completed_payments_with_user_names() {
    let app = Router::new().route(
        "/api/user/users&bookings&payments",
        get(|| async {
            Json(json!({"success": true, "data": [
                {
                    "_id": "u-1",
                    "name": "Priya",
                    "email": "priya@example.com",
                    "bookings": [],
                    "payments": [
                        {"_id": "pay-1", "booking": "bk-1", "amount": 110.0, "status": "paid"},
                        {"_id": "pay-2", "booking": "bk-2", "amount": 80.0, "status": "pending"}
                    ]
                },
                {
                    "_id": "u-2",
                    "name": "Marco",
                    "email": "marco@example.com",
                    "bookings": [],
                    "payments": [
                        {"_id": "pay-3", "booking": "bk-3", "amount": 200.0, "status": "paid"}
                    ]
                }
            ]}))
        }),
    );

    let base = serve(app).await;
    let client = ApiClient::new(base, 5).unwrap();
    let (mut screen, store) = admin_screen(&client).await;

    screen.load_payments().await;
    let rows = &screen.payments().data;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].user_name, "Priya");
    assert_eq!(rows[0].payment.amount, 110.0);
    assert_eq!(rows[1].user_name, "Marco");
    assert_eq!(rows[1].payment.amount, 200.0);

    store.logout().await;
}

#[tokio::test]
async fn test_profiles_panel_is_read_only_listing() {
    let app = Router::new().route(
        "/api/user/getAllProfile",
        get(|| async {
            Json(json!({"success": true, "data": [
                {"_id": "u-1", "name": "Priya", "email": "priya@example.com", "phone": "600111222"},
                {"_id": "u-2", "name": "Marco", "email": "marco@example.com"}
            ]}))
        }),
    );

    let base = serve(app).await;
    let client = ApiClient::new(base, 5).unwrap();
    let (mut screen, store) = admin_screen(&client).await;

    screen.load_profiles().await;
    let profiles = &screen.profiles().data;
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].name, "Priya");
    assert_eq!(profiles[0].phone.as_deref(), Some("600111222"));
    assert!(profiles[1].phone.is_none());

    store.logout().await;
}
