//! sea-orm entities for the mailing list schema.
//!
//! Each entity module also carries its field validation and a `create` helper
//! that works on any connection or open transaction.
pub mod errors;
pub mod db;
pub mod country;
pub mod city;
pub mod section;
pub mod customer;
pub mod promotion;
pub mod customer_section;

#[cfg(test)]
mod tests;
