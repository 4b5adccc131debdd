use std::net::SocketAddrV4;
use std::path::PathBuf;

/// Server configs
#[derive(Debug)]
pub(crate) struct ServerConfig {
    pub addr: SocketAddrV4,
    /// backing document of the order collection
    pub orders_path: PathBuf,
    /// static asset served at `/`
    pub index_path: PathBuf,
}

impl ServerConfig {
    pub fn new(addr: SocketAddrV4, orders_path: PathBuf, index_path: PathBuf) -> Self {
        Self {
            addr,
            orders_path,
            index_path,
        }
    }
}
