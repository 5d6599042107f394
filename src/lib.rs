//! Checkout
//!
//! Campaign-based checkout pricing. A cart is priced against up to one campaign from each of
//! three categories, applied in a fixed order (coupon, then on-top, then seasonal), with each
//! discount computed against the total left by the ones before it.

pub mod basket;
pub mod campaigns;
pub mod config;
pub mod discounts;
pub mod fixtures;
pub mod items;
pub mod pipeline;
pub mod prelude;
pub mod pricing;
pub mod receipt;
pub mod requests;
pub mod responses;
