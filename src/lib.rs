pub mod collision;
pub mod compute;
pub mod config;
pub mod enemy;
pub mod entities;
pub mod level;
pub mod physics;
pub mod view;
