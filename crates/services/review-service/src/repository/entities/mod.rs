//! SeaORM entity definitions

pub mod review;
