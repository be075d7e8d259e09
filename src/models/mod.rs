pub mod event;
pub mod rat;
