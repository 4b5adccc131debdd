use crate::server::model::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::{error, HttpResponse};
use derive_more::{Display, Error};

#[derive(Debug, Display, Error)]
pub(crate) enum CustomError {
    #[display("Missing required order data")]
    MissingOrderData,
    #[display("Missing data in request")]
    MissingRequestData,
    #[display("Order not found")]
    OrderNotFound,
    #[display("server is busy")]
    ServerIsBusy,
    #[display("storage error")]
    StorageError,
}

impl error::ResponseError for CustomError {
    fn status_code(&self) -> StatusCode {
        match *self {
            CustomError::MissingOrderData | CustomError::MissingRequestData => StatusCode::BAD_REQUEST,
            CustomError::OrderNotFound => StatusCode::NOT_FOUND,
            CustomError::ServerIsBusy => StatusCode::SERVICE_UNAVAILABLE,
            CustomError::StorageError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
        })
    }
}
