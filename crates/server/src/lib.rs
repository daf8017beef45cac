//! VGreen Server - HTTP REST API for ingredient instructions and contact
//! notifications
//!
//! # Features
//!
//! - **Instruction lookups**: list, search by ingredient, fetch by id, and
//!   match product names against ingredient tags
//! - **Contact form**: validated submissions delivered to the support inbox
//!   with a confirmation to the customer
//! - **Middleware**: Compression, CORS, request ID tracking, structured logging
//! - **Configuration**: Environment variable and file-based configuration
//! - **Graceful Shutdown**: Proper signal handling for production deployments
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use server::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::load()?;
//!     server::start_server(config).await?;
//!     Ok(())
//! }
//! ```
//!
//! # API Endpoints
//!
//! - `GET /` - API information
//! - `GET /health` - Liveness probe
//! - `GET /ready` - Readiness probe (queries the instruction store)
//! - `GET /metadata` - Server version and uptime
//! - `GET /api/instructions?ingredient=` - Active instructions, newest first
//! - `GET /api/instructions/search?productName=` - Instructions matching a product
//! - `GET /api/instructions/match-product?productName=` - Same as `search`
//! - `GET /api/instructions/by-ingredient/{ingredient}` - Ingredient substring search
//! - `GET /api/instructions/{id}` - Single instruction
//! - `POST /api/contact/send` - Contact-form notification

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod server;
pub mod state;

pub use config::{ContactConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::{build_router, start_server};
pub use state::ServerState;
