//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! Handlers are generic over the backend traits so that the endpoint tests can swap the SQLite
//! backend for mocks. actix-web cannot route generic handlers through its attribute macros, so
//! registration goes through the `route!` macro below instead.
use std::env;

use actix_web::{get, web, HttpResponse, Responder};
use log::*;
use serde_json::json;
use zelaina_engine::{
    db_types::{NewOrder, NewUser},
    traits::{AuthManagement, OrderManagement},
    AuthApi,
    OrderApi,
};
use zsf_common::coerce::price_or_zero;

use crate::{
    data_objects::{AuthResponse, LoginRequest, OrderHandle, OrderRequest, OrderResponse, RegisterRequest, UserHandle},
    errors::ServerError,
};

#[macro_export]
macro_rules! route {
    ($name:ident => $method:ident $path:literal impl $($bounds:ty),+) => {
        paste::paste! { pub struct [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ >( $( core::marker::PhantomData<fn() -> [< T $bounds:camel> ] >,)+ );}
        paste::paste! { impl< $( [< T $bounds:camel> ],)+ > [<$name:camel Route>]< $( [< T $bounds:camel> ],)+ > {
            #[allow(clippy::new_without_default)]
            pub fn new() -> Self {
                Self($( core::marker::PhantomData::<fn() -> [< T $bounds:camel> ] >,)+)
            }
        }}
        paste::paste! { impl<$( [< T $bounds:camel >] , )+> actix_web::dev::HttpServiceFactory for [<$name:camel Route>]<$([<T $bounds:camel>],)+>
        where
            $([<T $bounds:camel>]: $bounds + 'static,)+
        {
            fn register(self, config: &mut actix_web::dev::AppService) {
                let res = actix_web::Resource::new($path)
                    .name(stringify!($name))
                    .guard(actix_web::guard::$method())
                    .to($name::< $( [< T $bounds:camel >], )+>);
                actix_web::dev::HttpServiceFactory::register(res, config);
            }
        }}
    };
}

// ----------------------------------------------   Health  ----------------------------------------------------
#[get("/health")]
pub async fn health() -> impl Responder {
    trace!("💻️ Received health check request");
    HttpResponse::Ok().body("👍️\n")
}

//----------------------------------------------   Auth  ----------------------------------------------------
route!(register => Post "/api/auth/register" impl AuthManagement);
/// Route handler for user registration.
///
/// The only server-side email validation is the presence of an `@`; anything stricter lives in
/// the client. A duplicate email is rejected with a 400 before the insert, and the unique
/// constraint on the email column backs that check up under concurrency.
pub async fn register<A: AuthManagement>(
    api: web::Data<AuthApi<A>>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    if !req.email.contains('@') {
        debug!("💻️ Registration rejected. {} is not a valid email address.", req.email);
        return Err(ServerError::InvalidRequestBody("Please provide a valid email address".to_string()));
    }
    let user = api.register(NewUser::new(req.name, req.email, req.password)).await?;
    let response = AuthResponse {
        success: true,
        message: "Registration successful!".to_string(),
        user: UserHandle { id: user.id, name: user.name },
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(login => Post "/api/auth/login" impl AuthManagement);
pub async fn login<A: AuthManagement>(
    api: web::Data<AuthApi<A>>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let user = api.login(&req.email, &req.password).await?;
    let response = AuthResponse {
        success: true,
        message: "Login successful!".to_string(),
        user: UserHandle { id: user.id, name: user.name },
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(users => Get "/api/users" impl AuthManagement);
pub async fn users<A: AuthManagement>(api: web::Data<AuthApi<A>>) -> Result<HttpResponse, ServerError> {
    let users = api.users().await?;
    Ok(HttpResponse::Ok().json(users))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(submit_order => Post "/api/orders" impl OrderManagement);
/// Route handler for order submission.
///
/// Required fields are checked before anything touches the database. The `products` payload is
/// normalized to a single line (see [`crate::data_objects::ProductsPayload`]); numeric fields are
/// re-coerced server-side with the same fallback rules the client applies, so a hand-rolled or
/// stale client cannot produce a total the server reads differently.
pub async fn submit_order<B: OrderManagement>(
    api: web::Data<OrderApi<B>>,
    body: web::Json<OrderRequest>,
) -> Result<HttpResponse, ServerError> {
    let req = body.into_inner();
    let customer_name = req.customer_name.as_deref().map(str::trim).unwrap_or_default();
    let customer_phone = req.customer_phone.as_deref().map(str::trim).unwrap_or_default();
    let products = match (customer_name.is_empty(), customer_phone.is_empty(), req.products) {
        (false, false, Some(products)) => products,
        _ => {
            debug!("💻️ Order submission rejected. Required fields are missing.");
            return Err(ServerError::InvalidRequestBody(
                "Customer name, phone and products are required".to_string(),
            ));
        },
    };
    let line = products.normalize();
    let order = NewOrder::new(customer_name, customer_phone)
        .for_user(req.user_id)
        .with_note(req.customer_note.unwrap_or_default())
        .with_product(line.name, line.price, line.quantity)
        .with_total(price_or_zero(&req.total_amount));
    let order = api.process_new_order(order).await?;
    let response = OrderResponse {
        success: true,
        message: "Order placed successfully! We will contact you shortly.".to_string(),
        order: OrderHandle { id: order.id },
    };
    Ok(HttpResponse::Ok().json(response))
}

route!(orders_for_user => Get "/api/orders/{user_id}" impl OrderManagement);
pub async fn orders_for_user<B: OrderManagement>(
    path: web::Path<i64>,
    api: web::Data<OrderApi<B>>,
) -> Result<HttpResponse, ServerError> {
    let user_id = path.into_inner();
    debug!("💻️ GET orders for user #{user_id}");
    let orders = api.orders_for_user(user_id).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(all_orders => Get "/api/all-orders" impl OrderManagement);
pub async fn all_orders<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    let orders = api.all_orders().await?;
    Ok(HttpResponse::Ok().json(orders))
}

//----------------------------------------------   Diagnostics  ----------------------------------------------------
#[get("/api/test")]
pub async fn api_test() -> impl Responder {
    let environment = env::var("ZSF_ENV").unwrap_or_else(|_| "development".to_string());
    HttpResponse::Ok().json(json!({
        "message": "Server is up and running!",
        "tables": ["users", "orders"],
        "status": "OK",
        "database": "SQLite",
        "environment": environment,
    }))
}

route!(check_db => Get "/api/check-db" impl OrderManagement);
pub async fn check_db<B: OrderManagement>(api: web::Data<OrderApi<B>>) -> Result<HttpResponse, ServerError> {
    let test = api.check_db().await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Database connection OK",
        "test": test,
        "status": "OK",
    })))
}
