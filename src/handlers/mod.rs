// handlers/mod.rs - Two handler tiers
//
// Public (no session) serves storefront pages, crawler files and login.
// Admin (session required) serves back-office views and write actions.

pub mod admin;
pub mod public;
