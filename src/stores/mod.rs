//! Contains the trait and implementations for objects that store
//! [balance records](crate::BalanceRecord).

mod balance;
mod memory;

pub mod sqlite;

pub use balance::BalanceStore;
pub use memory::InMemoryBalanceStore;
