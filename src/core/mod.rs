pub mod building;
pub mod load_shapes;
pub mod systems;
pub mod units;
