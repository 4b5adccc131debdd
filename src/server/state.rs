use crate::server::storage::OrderBook;
use std::path::{Path, PathBuf};

#[derive(Clone)]
pub(crate) struct AppState {
    order_book: OrderBook,
    index_path: PathBuf,
}

impl AppState {
    pub fn new(order_book: OrderBook, index_path: PathBuf) -> Self {
        Self {
            order_book,
            index_path,
        }
    }

    pub fn get_order_book(&self) -> &OrderBook {
        &self.order_book
    }

    pub fn get_index_path(&self) -> &Path {
        &self.index_path
    }
}
