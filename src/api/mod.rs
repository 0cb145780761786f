pub mod block_handlers;
pub mod district_handlers;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
