// handlers/admin/mod.rs - Admin back-office handlers (session required)
//
// Every route here sits behind `require_admin`, which puts the signed-in
// user into the request extensions. Reads return admin view models; writes
// return `{ ok, message, postId? }`.

pub mod about;
pub mod blog;
pub mod dashboard;
pub mod faq;
pub mod gallery;
pub mod hero;
pub mod services;

pub use dashboard::dashboard;
