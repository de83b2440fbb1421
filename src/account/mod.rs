//! Live account reads, never cached

mod balance;

pub use balance::BalanceAccessor;
