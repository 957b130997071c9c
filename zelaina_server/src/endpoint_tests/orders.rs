use actix_web::{http::StatusCode, web, web::ServiceConfig};
use chrono::Utc;
use serde_json::json;
use zelaina_engine::{
    db_types::{NewOrder, Order, OrderStatusType},
    traits::OrderApiError,
    OrderApi,
};
use zsf_common::Price;

use super::{helpers::{get_request, post_request}, mocks::MockOrderManager};
use crate::routes::{OrdersForUserRoute, SubmitOrderRoute};

fn stored_order(order: &NewOrder) -> Order {
    Order {
        id: 7,
        user_id: order.user_id,
        customer_name: order.customer_name.clone(),
        customer_phone: order.customer_phone.clone(),
        customer_note: order.customer_note.clone(),
        product_name: order.product_name.clone(),
        product_price: order.product_price,
        quantity: order.quantity,
        total_amount: order.total_amount,
        status: OrderStatusType::Pending,
        created_at: Utc::now(),
    }
}

fn configure(order_manager: MockOrderManager) -> impl FnOnce(&mut ServiceConfig) {
    move |cfg| {
        cfg.service(SubmitOrderRoute::<MockOrderManager>::new())
            .service(OrdersForUserRoute::<MockOrderManager>::new())
            .app_data(web::Data::new(OrderApi::new(order_manager)));
    }
}

fn expect_line(orders: &mut MockOrderManager, check: fn(&NewOrder) -> bool) {
    orders.expect_insert_order().withf(move |o| check(o)).returning(|o| Ok(stored_order(&o)));
}

#[actix_web::test]
async fn submit_order_missing_fields() {
    let _ = env_logger::try_init().ok();
    let orders = MockOrderManager::new();
    let body = json!({ "customer_name": "Анна", "customer_phone": "  " });
    let (status, body) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Customer name, phone and products are required" }).to_string());
}

#[actix_web::test]
async fn submit_order_with_product_list() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    // Only the first line of the list is recorded.
    expect_line(&mut orders, |o| {
        o.product_name == "алоэ вера" &&
            o.product_price == Price::from(600) &&
            o.quantity == 2 &&
            o.total_amount == Price::from(1650) &&
            o.user_id == Some(3)
    });
    let body = json!({
        "user_id": 3,
        "customer_name": "Анна",
        "customer_phone": "+7 900 000-00-00",
        "products": [
            { "name": "алоэ вера", "price": 600, "quantity": 2 },
            { "name": "хлорофитум", "price": 450, "quantity": 1 }
        ],
        "total_amount": 1650
    });
    let (status, body) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
    let res: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(res["success"], json!(true));
    assert_eq!(res["message"], json!("Order placed successfully! We will contact you shortly."));
    assert_eq!(res["order"], json!({ "id": 7 }));
}

#[actix_web::test]
async fn submit_order_with_single_product_object() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    expect_line(&mut orders, |o| {
        o.product_name == "фикус лирата" && o.product_price == Price::from(1100) && o.quantity == 1
    });
    let body = json!({
        "customer_name": "Анна",
        "customer_phone": "+7 900 000-00-00",
        "products": { "name": "фикус лирата", "price": 1100, "quantity": 1 },
        "total_amount": 1100
    });
    let (status, _) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn submit_order_with_bare_product_name() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    // A bare string implies price 0 and quantity 1.
    expect_line(&mut orders, |o| {
        o.product_name == "монстера" && o.product_price == Price::ZERO && o.quantity == 1 && o.user_id.is_none()
    });
    let body = json!({
        "customer_name": "Анна",
        "customer_phone": "+7 900 000-00-00",
        "products": "монстера",
        "total_amount": 0
    });
    let (status, _) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn submit_order_coerces_numeric_strings() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    // "600" parses; "banana" falls back to quantity 1; the garbage total falls back to zero.
    expect_line(&mut orders, |o| {
        o.product_price == Price::from(600) && o.quantity == 1 && o.total_amount == Price::ZERO
    });
    let body = json!({
        "customer_name": "Анна",
        "customer_phone": "+7 900 000-00-00",
        "products": [{ "name": "алоэ вера", "price": "600", "quantity": "banana" }],
        "total_amount": "banana"
    });
    let (status, _) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
}

#[actix_web::test]
async fn submit_order_persistence_failure() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    orders
        .expect_insert_order()
        .returning(|_| Err(OrderApiError::DatabaseError("database is locked".to_string())));
    let body = json!({
        "customer_name": "Анна",
        "customer_phone": "+7 900 000-00-00",
        "products": "монстера"
    });
    let (status, body) = post_request("/api/orders", &body, configure(orders)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Database error: database is locked" }).to_string());
}

#[actix_web::test]
async fn fetch_orders_for_user() {
    let _ = env_logger::try_init().ok();
    let mut orders = MockOrderManager::new();
    orders.expect_fetch_orders_for_user().withf(|&id| id == 42).returning(|_| {
        let order = NewOrder::new("Анна", "+7 900 000-00-00").with_product("алоэ вера", Price::from(600), 2);
        Ok(vec![stored_order(&order)])
    });
    let (status, body) = get_request("/api/orders/42", configure(orders)).await;
    assert_eq!(status, StatusCode::OK);
    let res: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(res.as_array().map(Vec::len), Some(1));
    assert_eq!(res[0]["product_name"], json!("алоэ вера"));
    assert_eq!(res[0]["status"], json!("pending"));
}
