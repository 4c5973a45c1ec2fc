pub mod job;
pub mod lifo;
pub mod server;
