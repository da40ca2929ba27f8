pub mod auth;
pub mod events;
pub mod master;
pub mod notify;
pub mod persistence;
pub mod shutdown;
pub mod system;
