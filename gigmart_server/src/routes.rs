//! Request handler definitions
//!
//! Define each route and its handler here.
//! Handlers that are more than a line or two MUST go into a separate module. Keep this module neat and tidy 🙏
//!
//! A note about performance:
//! Since each worker thread processes its requests sequentially, handlers which block the current thread will cause the
//! current worker to stop processing new requests. Any long, non-cpu-bound operation (I/O, database queries, gateway
//! calls) must therefore be expressed as futures or asynchronous functions, which get executed concurrently by worker
//! threads.

use actix_web::{get, web, HttpResponse, Responder};
use gigmart_engine::{
    traits::{AuthManagement, ChatManagement, GigManagement, MarketplaceDatabase, PaymentGateway},
    AuthApi,
    ChatApi,
    GigApi,
    OrderFlowApi,
    RegisterUser,
};
use log::*;

use crate::{
    auth::{JwtClaims, TokenIssuer},
    data_objects::{
        CheckoutResponse,
        ConfirmResponse,
        GigSearchParams,
        JsonResponse,
        LoginRequest,
        NewConversationRequest,
        NewGigRequest,
        NewMessageRequest,
        PaymentConfirmationPayload,
        TokenResponse,
        UpdateGigRequest,
    },
    errors::ServerError,
};

// Actix cannot handle generics in handlers, so routes are registered manually via the `route!` macro.
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
route!(register => Post "/auth/register" impl AuthManagement);
/// Creates an account and immediately issues a session token for it.
pub async fn register<A>(
    body: web::Json<RegisterUser>,
    api: web::Data<AuthApi<A>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError>
where
    A: AuthManagement,
{
    let user = api.register(body.into_inner()).await?;
    let token = signer.issue_token(&user)?;
    debug!("💻️ Registered account #{} and issued a token", user.id);
    Ok(HttpResponse::Created().json(TokenResponse::for_user(&user, token)))
}

route!(login => Post "/auth/login" impl AuthManagement);
/// Verifies credentials and issues a session token carrying the user id and seller flag.
pub async fn login<A>(
    body: web::Json<LoginRequest>,
    api: web::Data<AuthApi<A>>,
    signer: web::Data<TokenIssuer>,
) -> Result<HttpResponse, ServerError>
where
    A: AuthManagement,
{
    let LoginRequest { username, password } = body.into_inner();
    let user = api.login(&username, &password).await?;
    let token = signer.issue_token(&user)?;
    debug!("💻️ Issued access token for account #{}", user.id);
    Ok(HttpResponse::Ok().json(TokenResponse::for_user(&user, token)))
}

//----------------------------------------------   Orders  ----------------------------------------------------
route!(create_checkout => Post "/orders/create-payment-intent/{gig_id}" impl MarketplaceDatabase, PaymentGateway);
/// Starts a checkout for the gig in the path. Retried requests get the existing pending
/// intent back; a concurrent duplicate gets a 409.
pub async fn create_checkout<B, G>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: MarketplaceDatabase,
    G: PaymentGateway,
{
    let gig_id = path.into_inner();
    debug!("💻️ POST checkout for gig #{gig_id} by user #{}", claims.user_id);
    let intent = api.create_checkout(claims.user_id, gig_id).await?;
    Ok(HttpResponse::Ok().json(CheckoutResponse::from(intent)))
}

route!(my_orders => Get "/orders" impl MarketplaceDatabase, PaymentGateway);
/// Buyers see all of their orders; sellers see completed orders only.
pub async fn my_orders<B, G>(
    claims: JwtClaims,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: MarketplaceDatabase,
    G: PaymentGateway,
{
    debug!("💻️ GET orders for user #{}", claims.user_id);
    let orders = api.orders_for_user(claims.user_id, claims.is_seller).await?;
    Ok(HttpResponse::Ok().json(orders))
}

route!(confirm_payment => Put "/orders" impl MarketplaceDatabase, PaymentGateway);
/// Applies a signed payment callback. All three gateway fields are required.
pub async fn confirm_payment<B, G>(
    claims: JwtClaims,
    body: web::Json<PaymentConfirmationPayload>,
    api: web::Data<OrderFlowApi<B, G>>,
) -> Result<HttpResponse, ServerError>
where
    B: MarketplaceDatabase,
    G: PaymentGateway,
{
    debug!("💻️ PUT payment confirmation from user #{}", claims.user_id);
    let confirmation = body.into_inner().into_confirmation()?;
    let order = api.confirm_payment(confirmation).await?;
    Ok(HttpResponse::Ok()
        .json(ConfirmResponse { message: "Order has been confirmed and the sales count updated".to_string(), order }))
}

//----------------------------------------------   Gigs  ----------------------------------------------------
route!(create_gig => Post "/gigs" impl GigManagement);
pub async fn create_gig<B>(
    claims: JwtClaims,
    body: web::Json<NewGigRequest>,
    api: web::Data<GigApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: GigManagement,
{
    let gig = api.create_gig(claims.is_seller, body.into_inner().into_new_gig(claims.user_id)).await?;
    Ok(HttpResponse::Created().json(gig))
}

route!(search_gigs => Get "/gigs" impl GigManagement);
/// Public catalog browsing; no session required.
pub async fn search_gigs<B>(
    query: web::Query<GigSearchParams>,
    api: web::Data<GigApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: GigManagement,
{
    let gigs = api.search(query.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(gigs))
}

route!(get_gig => Get "/gigs/{id}" impl GigManagement);
pub async fn get_gig<B>(path: web::Path<i64>, api: web::Data<GigApi<B>>) -> Result<HttpResponse, ServerError>
where B: GigManagement {
    let gig = api.fetch_gig(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(gig))
}

route!(update_gig => Put "/gigs/{id}" impl GigManagement);
pub async fn update_gig<B>(
    claims: JwtClaims,
    path: web::Path<i64>,
    body: web::Json<UpdateGigRequest>,
    api: web::Data<GigApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: GigManagement,
{
    let gig = api.update_gig(claims.user_id, path.into_inner(), body.into_inner().into()).await?;
    Ok(HttpResponse::Ok().json(gig))
}

route!(delete_gig => Delete "/gigs/{id}" impl GigManagement);
pub async fn delete_gig<B>(
    claims: JwtClaims,
    path: web::Path<i64>,
    api: web::Data<GigApi<B>>,
) -> Result<HttpResponse, ServerError>
where
    B: GigManagement,
{
    api.delete_gig(claims.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(JsonResponse::success("Gig has been deleted")))
}

//----------------------------------------------   Conversations  ----------------------------------------------------
route!(start_conversation => Post "/conversations" impl ChatManagement);
pub async fn start_conversation<C>(
    claims: JwtClaims,
    body: web::Json<NewConversationRequest>,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let conversation = api.start_conversation(claims.user_id, claims.is_seller, body.to).await?;
    Ok(HttpResponse::Created().json(conversation))
}

route!(my_conversations => Get "/conversations" impl ChatManagement);
pub async fn my_conversations<C>(
    claims: JwtClaims,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let conversations = api.conversations_for_user(claims.user_id, claims.is_seller).await?;
    Ok(HttpResponse::Ok().json(conversations))
}

route!(get_conversation => Get "/conversations/{key}" impl ChatManagement);
pub async fn get_conversation<C>(
    _claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let conversation = api.conversation(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(conversation))
}

route!(mark_conversation_read => Put "/conversations/{key}" impl ChatManagement);
pub async fn mark_conversation_read<C>(
    claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let conversation = api.mark_read(&path.into_inner(), claims.is_seller).await?;
    Ok(HttpResponse::Ok().json(conversation))
}

//----------------------------------------------   Messages  ----------------------------------------------------
route!(send_message => Post "/messages" impl ChatManagement);
pub async fn send_message<C>(
    claims: JwtClaims,
    body: web::Json<NewMessageRequest>,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let NewMessageRequest { conversation_key, body } = body.into_inner();
    let message = api.send_message(claims.user_id, &conversation_key, body).await?;
    Ok(HttpResponse::Created().json(message))
}

route!(get_messages => Get "/messages/{key}" impl ChatManagement);
pub async fn get_messages<C>(
    _claims: JwtClaims,
    path: web::Path<String>,
    api: web::Data<ChatApi<C>>,
) -> Result<HttpResponse, ServerError>
where
    C: ChatManagement,
{
    let messages = api.messages(&path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(messages))
}
