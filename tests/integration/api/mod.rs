//! REST routes through an in-process `axum-test` server

mod auth_test;
mod users_test;
