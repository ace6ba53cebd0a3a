pub mod points;
pub mod rotate;
