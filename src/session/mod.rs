pub mod exercise;
pub mod navigation;
