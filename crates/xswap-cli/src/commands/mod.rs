pub mod map;
pub mod permute;
pub mod prior;
