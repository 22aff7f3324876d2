pub mod activate;
pub mod manage;
