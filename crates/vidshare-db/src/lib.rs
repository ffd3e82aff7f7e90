//! # vidshare-db
//!
//! Persistence layer implementing the repository traits from `vidshare-core`.
//!
//! Two backends are provided:
//!
//! - PostgreSQL via SQLx (`repositories`), with models, mappers and migrations
//! - an in-process store (`memory`) used for `PERSISTENCE=memory` and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vidshare_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use vidshare_db::repositories::PgVideoRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::from_env()).await?;
//!     run_migrations(&pool, "crates/vidshare-db/migrations").await?;
//!     let videos = PgVideoRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::{
    MemoryCommentRepository, MemoryDatabase, MemoryRefreshTokenRepository, MemoryUserRepository,
    MemoryVideoRepository,
};
pub use pool::{create_pool, ping, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgRefreshTokenRepository, PgUserRepository, PgVideoRepository,
};
