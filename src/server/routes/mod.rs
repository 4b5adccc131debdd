use crate::server::controller::index::get_index;
use crate::server::controller::orders::{delete_order, get_orders, post_orders, put_order};
use actix_web::web;

/// Register every endpoint of the service
pub(crate) fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_index)
        .service(get_orders)
        .service(post_orders)
        .service(put_order)
        .service(delete_order);
}
