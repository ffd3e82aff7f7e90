//! Database connection pool management

mod postgres;

pub use postgres::{create_pool, ping, run_migrations, DatabaseConfig};

pub use sqlx::postgres::PgPool;
