//! Directory Site - backend for a curated directory of tools and products.
//!
//! Visitors browse published items; signed-in users submit items and pay
//! for Pro or Sponsor listings through Creem or Stripe. Content lives in a
//! Sanity dataset, email goes through Resend.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
