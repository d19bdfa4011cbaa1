pub mod dealer;
pub mod server;
