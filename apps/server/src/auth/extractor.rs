//! Actix-web extractor resolving the acting user from the query string.

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::LocalBoxFuture;

use super::ActingUser;
use crate::db::ProcedureGateway;
use crate::error::AppError;
use crate::models::{require_user_id, ActorBody, ActorParams};

/// Acting user taken from `?userId=` and resolved through the gateway.
///
/// ```ignore
/// async fn list(actor: QueryActor, gateway: web::Data<dyn ProcedureGateway>) -> AppResult<HttpResponse> {
///     let QueryActor(actor) = actor;
///     // actor.organization_id is now known
/// }
/// ```
pub struct QueryActor(pub ActingUser);

fn query_params(req: &HttpRequest) -> Result<ActorParams, AppError> {
    web::Query::<ActorParams>::from_query(req.query_string())
        .map(web::Query::into_inner)
        .map_err(|e| AppError::InvalidInput(format!("Invalid query string: {}", e)))
}

impl FromRequest for QueryActor {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let gateway = req.app_data::<web::Data<dyn ProcedureGateway>>().cloned();
        let params = query_params(req);

        Box::pin(async move {
            // Validation happens before the store is touched
            let user_id = require_user_id(params?.user_id)?;
            let gateway = gateway.ok_or_else(|| {
                AppError::Connectivity("Procedure gateway not configured".to_string())
            })?;
            let actor = ActingUser::resolve(gateway.get_ref(), user_id).await?;
            Ok(QueryActor(actor))
        })
    }
}

/// Acting user id for DELETE requests: JSON body first, then query string.
pub fn delete_actor_id(query: &ActorParams, body: Option<&ActorBody>) -> Result<i64, AppError> {
    require_user_id(body.and_then(|b| b.user_id).or(query.user_id))
}
