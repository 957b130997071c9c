use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use log::*;
use tokio::time::sleep;
use zelaina_engine::{AuthApi, OrderApi, SqliteDatabase};

use crate::{
    config::ServerConfig,
    errors::ServerError,
    routes::{
        api_test,
        health,
        AllOrdersRoute,
        CheckDbRoute,
        LoginRoute,
        OrdersForUserRoute,
        RegisterRoute,
        SubmitOrderRoute,
        UsersRoute,
    },
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = connect_with_retry(&config).await;
    let srv = create_server_instance(config, db)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

/// Connects to the database, retrying indefinitely. The server refuses to start serving requests
/// until the database is reachable and the schema is in place, so a slow database start (or a
/// restart) only delays boot rather than failing it.
pub async fn connect_with_retry(config: &ServerConfig) -> SqliteDatabase {
    loop {
        match SqliteDatabase::new_with_url(&config.database_url, 25).await {
            Ok(db) => {
                info!("🗃️ Database connection established ({})", config.database_url);
                return db;
            },
            Err(e) => {
                error!(
                    "🗃️ Could not connect to the database. {e} Retrying in {}s.",
                    config.db_reconnect_delay.as_secs()
                );
                sleep(config.db_reconnect_delay).await;
            },
        }
    }
}

pub fn create_server_instance(config: ServerConfig, db: SqliteDatabase) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let auth_api = AuthApi::new(db.clone());
        let orders_api = OrderApi::new(db.clone());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("zsf::access_log"))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(orders_api))
            .service(health)
            .service(api_test)
            .service(RegisterRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(UsersRoute::<SqliteDatabase>::new())
            .service(SubmitOrderRoute::<SqliteDatabase>::new())
            .service(OrdersForUserRoute::<SqliteDatabase>::new())
            .service(AllOrdersRoute::<SqliteDatabase>::new())
            .service(CheckDbRoute::<SqliteDatabase>::new())
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
