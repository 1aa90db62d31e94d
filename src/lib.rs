// Library target shared by the binary, integration tests and benchmarks.
pub mod app;
pub mod config;
pub mod event;
pub mod lesson;
pub mod logging;
pub mod session;
pub mod speech;
pub mod ui;
