//! End-to-end tests for the REST cart store and catalog against a
//! json-server-like axum backend bound to a random local port.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use grocer_commerce::cart::{quantity_of, CartReconciler, CartStore};
use grocer_commerce::storefront::{BrowseState, Storefront};
use grocer_commerce::{CommerceError, LineId, ProductId, StoreError};
use grocer_data::{FetchClient, RestCartStore, RestCatalog};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::{json, Value};
use tokio::net::TcpListener;

#[derive(Default)]
struct Backend {
    products: Vec<Value>,
    cart: Vec<Value>,
    next_id: u64,
    fail_delete: Option<String>,
}

type Shared = Arc<Mutex<Backend>>;

fn id_matches(entry: &Value, id: &str) -> bool {
    match &entry["id"] {
        Value::Number(n) => n.to_string() == id,
        Value::String(s) => s == id,
        _ => false,
    }
}

async fn list_products(State(db): State<Shared>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().products.clone()))
}

async fn list_cart(State(db): State<Shared>) -> Json<Value> {
    Json(Value::Array(db.lock().unwrap().cart.clone()))
}

async fn create_line(
    State(db): State<Shared>,
    Json(mut line): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    db.next_id += 1;
    line["id"] = json!(db.next_id);
    db.cart.push(line.clone());
    (StatusCode::CREATED, Json(line))
}

async fn update_line(
    State(db): State<Shared>,
    Path(id): Path<String>,
    Json(mut line): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    match db.cart.iter_mut().find(|entry| id_matches(entry, &id)) {
        Some(entry) => {
            line["id"] = entry["id"].clone();
            *entry = line.clone();
            (StatusCode::OK, Json(line))
        }
        None => (StatusCode::NOT_FOUND, Json(json!({}))),
    }
}

async fn delete_line(State(db): State<Shared>, Path(id): Path<String>) -> (StatusCode, Json<Value>) {
    let mut db = db.lock().unwrap();
    if db.fail_delete.as_deref() == Some(id.as_str()) {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }
    let before = db.cart.len();
    db.cart.retain(|entry| !id_matches(entry, &id));
    if db.cart.len() == before {
        (StatusCode::NOT_FOUND, Json(json!({})))
    } else {
        (StatusCode::OK, Json(json!({})))
    }
}

fn seeded() -> Shared {
    Arc::new(Mutex::new(Backend {
        products: vec![
            json!({"id": 1, "name": "Organic Milk", "category": "Dairy", "price": 60, "stock": 12, "image": "milk.jpg"}),
            json!({"id": 2, "name": "Brown Bread", "category": "Bakery", "price": 45, "stock": "7"}),
            json!({"id": 3, "name": "Shimla Apple", "category": "Fruits", "price": 120.5, "description": null}),
        ],
        ..Backend::default()
    }))
}

async fn serve(db: Shared) -> FetchClient {
    let app = Router::new()
        .route("/products", get(list_products))
        .route("/cart", get(list_cart).post(create_line))
        .route("/cart/:id", put(update_line).delete(delete_line))
        .with_state(db);

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FetchClient::new(format!("http://{}", addr))
}

#[tokio::test]
async fn storefront_loads_and_filters_over_http() {
    let client = serve(seeded()).await;
    let shop = Storefront::new(RestCatalog::new(client.clone()), RestCartStore::new(client));

    let view = shop.load().await.unwrap();
    assert_eq!(view.products.len(), 3);
    assert!(view.cart.is_empty());
    assert_eq!(view.products[1].stock, 7);
    assert_eq!(view.products[2].description, "");

    let state = BrowseState::new("Dairy & Bakery", "");
    let names: Vec<&str> = view
        .browse(&state, &mut StdRng::seed_from_u64(0))
        .iter()
        .map(|item| item.product.name.as_str())
        .collect();
    assert_eq!(names, vec!["Organic Milk", "Brown Bread"]);
}

#[tokio::test]
async fn reconciler_round_trips_through_rest_store() {
    let db = seeded();
    let client = serve(db.clone()).await;
    let shop = Storefront::new(RestCatalog::new(client.clone()), RestCartStore::new(client));

    let view = shop.load().await.unwrap();
    let milk = view.product("1").unwrap().clone();

    let cart = shop.cart().increment(&milk, &view.cart).await.unwrap();
    let cart = shop.cart().increment(&milk, &cart).await.unwrap();
    assert_eq!(cart.len(), 1);
    assert_eq!(quantity_of(&cart, &ProductId::new("1")), 2);
    assert_eq!(cart[0].image.as_deref(), Some("milk.jpg"));
    assert_eq!(db.lock().unwrap().cart[0]["productId"], json!(1));

    let cart = shop.cart().decrement(&milk, &cart).await.unwrap();
    assert_eq!(quantity_of(&cart, &milk.id), 1);

    let cart = shop.cart().decrement(&milk, &cart).await.unwrap();
    assert!(cart.is_empty());
    assert!(db.lock().unwrap().cart.is_empty());
}

#[tokio::test]
async fn checkout_stops_at_first_failed_delete() {
    let db = seeded();
    let client = serve(db.clone()).await;
    let shop = Storefront::new(RestCatalog::new(client.clone()), RestCartStore::new(client));

    let view = shop.load().await.unwrap();
    let milk = view.product("1").unwrap().clone();
    let bread = view.product("2").unwrap().clone();
    let cart = shop.cart().increment(&milk, &[]).await.unwrap();
    let cart = shop.cart().increment(&bread, &cart).await.unwrap();

    db.lock().unwrap().fail_delete = Some(cart[1].id.to_string());
    let err = shop.cart().checkout(&cart).await.unwrap_err();
    match err {
        CommerceError::CheckoutInterrupted {
            deleted,
            total,
            source,
        } => {
            assert_eq!((deleted, total), (1, 2));
            assert!(matches!(source, StoreError::Http { status: 500, .. }));
        }
        other => panic!("unexpected error: {other:?}"),
    }

    let remaining = shop.cart().load().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].product_id, bread.id);

    db.lock().unwrap().fail_delete = None;
    let outcome = shop.cart().checkout(&remaining).await.unwrap();
    assert!(outcome.cart.is_empty());
    assert_eq!(outcome.message, "Order placed successfully!");
}

#[tokio::test]
async fn missing_line_is_not_found() {
    let client = serve(seeded()).await;
    let store = RestCartStore::new(client);

    let err = store.delete(&LineId::new("99")).await.unwrap_err();
    assert_eq!(err, StoreError::NotFound("99".to_string()));
}

#[tokio::test]
async fn unreachable_backend_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let cart = CartReconciler::new(RestCartStore::new(FetchClient::new(format!("http://{}", addr))));
    let err = cart.load().await.unwrap_err();
    assert!(matches!(err, CommerceError::Store(StoreError::Transport(_))));
}
