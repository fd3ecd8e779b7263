pub mod load_shift;
pub mod parallel_loop_tank;
pub mod schematic;
pub mod simulation;
pub mod sizing;
pub mod swing_tank;
pub mod system_config;
