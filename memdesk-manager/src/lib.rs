pub mod handlers;
pub mod pages;
pub mod server;
pub mod state;

pub use server::{router, run_server, serve};
pub use state::AppState;
