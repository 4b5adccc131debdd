use crate::server::controller::error::CustomError;
use crate::server::controller::STORAGE_TIMEOUT_SECONDS;
use crate::server::model::order::{next_id, OrderPayload};
use crate::server::model::MessageResponse;
use crate::server::state::AppState;
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use log::{error, info};

#[get("/orders")]
/// list every stored order, in stored order
pub(crate) async fn get_orders(data: web::Data<AppState>) -> Result<impl Responder, CustomError> {
    let file = data
        .get_order_book()
        .acquire(STORAGE_TIMEOUT_SECONDS)
        .await
        .ok_or(CustomError::ServerIsBusy)?;
    Ok(web::Json(file.load().await))
}

#[post("/orders")]
/// create an order, the id is assigned here
pub(crate) async fn post_orders(
    body: Option<web::Json<OrderPayload>>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let new_order = body
        .and_then(|payload| payload.into_inner().into_new_order())
        .ok_or(CustomError::MissingOrderData)?;

    let file = data
        .get_order_book()
        .acquire(STORAGE_TIMEOUT_SECONDS)
        .await
        .ok_or(CustomError::ServerIsBusy)?;
    let mut orders = file.load().await;
    let order_id = next_id(&orders);
    let order = new_order.with_id(order_id);
    orders.push(order.clone());
    if let Err(e) = file.save(&orders).await {
        error!("post_orders failed, {}", e);
        return Err(CustomError::StorageError);
    }
    info!("created order id={}", order_id);
    Ok(HttpResponse::Created().json(order))
}

#[put("/orders/{order_id}")]
/// update `udid`, `status` and `date` of one order
pub(crate) async fn put_order(
    order_id: web::Path<i64>,
    body: Option<web::Json<OrderPayload>>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let patch = body
        .map(web::Json::into_inner)
        .filter(|payload| !payload.is_empty())
        .ok_or(CustomError::MissingRequestData)?;
    let order_id = order_id.into_inner();

    let file = data
        .get_order_book()
        .acquire(STORAGE_TIMEOUT_SECONDS)
        .await
        .ok_or(CustomError::ServerIsBusy)?;
    let mut orders = file.load().await;
    // first match wins
    let Some(order) = orders.iter_mut().find(|o| o.id() == Some(order_id)) else {
        return Err(CustomError::OrderNotFound);
    };
    order.apply(&patch);
    let updated = order.clone();
    if let Err(e) = file.save(&orders).await {
        error!("put_order failed, {}", e);
        return Err(CustomError::StorageError);
    }
    info!("updated order id={}", order_id);
    Ok(web::Json(updated))
}

#[delete("/orders/{order_id}")]
/// remove every order carrying the id
pub(crate) async fn delete_order(
    order_id: web::Path<i64>,
    data: web::Data<AppState>,
) -> Result<impl Responder, CustomError> {
    let order_id = order_id.into_inner();
    let file = data
        .get_order_book()
        .acquire(STORAGE_TIMEOUT_SECONDS)
        .await
        .ok_or(CustomError::ServerIsBusy)?;
    let mut orders = file.load().await;
    let before = orders.len();
    orders.retain(|o| o.id() != Some(order_id));
    if orders.len() == before {
        return Err(CustomError::OrderNotFound);
    }
    if let Err(e) = file.save(&orders).await {
        error!("delete_order failed, {}", e);
        return Err(CustomError::StorageError);
    }
    info!("deleted order id={}", order_id);
    Ok(web::Json(MessageResponse {
        message: format!("Order with ID {order_id} deleted"),
    }))
}
