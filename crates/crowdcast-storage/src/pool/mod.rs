//! Connection management: one SQLite connection behind a mutex.

pub mod pragmas;
pub mod write_connection;

pub use write_connection::WriteConnection;
