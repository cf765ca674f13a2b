use std::time::Duration;

use actix_web::{dev::Server, http::KeepAlive, middleware::Logger, web, App, HttpServer};
use gigmart_engine::{locks::ProcessingLocks, AuthApi, ChatApi, GigApi, OrderFlowApi, SqliteDatabase};

use crate::{
    auth::TokenIssuer,
    config::ServerConfig,
    errors::ServerError,
    integrations::razorpay::RazorpayGateway,
    routes::{
        health,
        ConfirmPaymentRoute,
        CreateCheckoutRoute,
        CreateGigRoute,
        DeleteGigRoute,
        GetConversationRoute,
        GetGigRoute,
        GetMessagesRoute,
        LoginRoute,
        MarkConversationReadRoute,
        MyConversationsRoute,
        MyOrdersRoute,
        RegisterRoute,
        SearchGigsRoute,
        SendMessageRoute,
        StartConversationRoute,
        UpdateGigRoute,
    },
    sweeper::start_lock_sweeper,
};

pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let db = SqliteDatabase::new_with_url(&config.database_url, 25)
        .await
        .map_err(|e| ServerError::InitializeError(e.to_string()))?;
    let gateway = RazorpayGateway::new(config.razorpay.clone());
    gateway.preflight().await;
    let locks = ProcessingLocks::new();
    // Keeps the lock table from leaking entries; runs for the life of the server.
    let _sweeper = start_lock_sweeper(locks.clone());
    let srv = create_server_instance(config, db, gateway, locks)?;
    srv.await.map_err(|e| ServerError::Unspecified(e.to_string()))
}

pub fn create_server_instance(
    config: ServerConfig,
    db: SqliteDatabase,
    gateway: RazorpayGateway,
    locks: ProcessingLocks,
) -> Result<Server, ServerError> {
    let srv = HttpServer::new(move || {
        let orders_api = OrderFlowApi::new(db.clone(), gateway.clone(), locks.clone());
        let gig_api = GigApi::new(db.clone());
        let chat_api = ChatApi::new(db.clone());
        let auth_api = AuthApi::new(db.clone());
        let jwt_signer = TokenIssuer::new(&config.auth);
        let api_scope = web::scope("/api")
            .service(RegisterRoute::<SqliteDatabase>::new())
            .service(LoginRoute::<SqliteDatabase>::new())
            .service(CreateCheckoutRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(MyOrdersRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(ConfirmPaymentRoute::<SqliteDatabase, RazorpayGateway>::new())
            .service(SearchGigsRoute::<SqliteDatabase>::new())
            .service(CreateGigRoute::<SqliteDatabase>::new())
            .service(GetGigRoute::<SqliteDatabase>::new())
            .service(UpdateGigRoute::<SqliteDatabase>::new())
            .service(DeleteGigRoute::<SqliteDatabase>::new())
            .service(StartConversationRoute::<SqliteDatabase>::new())
            .service(MyConversationsRoute::<SqliteDatabase>::new())
            .service(GetConversationRoute::<SqliteDatabase>::new())
            .service(MarkConversationReadRoute::<SqliteDatabase>::new())
            .service(SendMessageRoute::<SqliteDatabase>::new())
            .service(GetMessagesRoute::<SqliteDatabase>::new());
        App::new()
            .wrap(Logger::new("%t (%D ms) %s %a %{Host}i %U").log_target("gms::access_log"))
            .app_data(web::Data::new(orders_api))
            .app_data(web::Data::new(gig_api))
            .app_data(web::Data::new(chat_api))
            .app_data(web::Data::new(auth_api))
            .app_data(web::Data::new(jwt_signer))
            .service(health)
            .service(api_scope)
    })
    .keep_alive(KeepAlive::Timeout(Duration::from_secs(600)))
    .bind((config.host.as_str(), config.port))?
    .run();
    Ok(srv)
}
