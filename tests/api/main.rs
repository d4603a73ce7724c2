//! tests/api/main.rs

mod answers;
mod followers;
mod health_check;
