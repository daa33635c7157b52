//! Back-office workflows served behind the access gate.

pub mod careers;
pub mod contact;
pub mod directory;
pub mod inquiries;
pub mod properties;
