pub mod mode;
pub mod surface;
