pub mod cell;
pub mod config;
pub mod header;
pub mod memory;
pub mod range;
pub mod record;
pub mod store;
pub mod table;
