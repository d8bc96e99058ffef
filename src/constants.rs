// Constants shared by the playback controller, the demo inputs and the viewer

/// Slowest playback speed
pub const MIN_SPEED: u32 = 1;

/// Fastest playback speed
pub const MAX_SPEED: u32 = 100;

/// Speed a fresh controller starts at (500 ms between ticks)
pub const DEFAULT_SPEED: u32 = 50;

/// Tick delay at speed 0; each speed unit removes `DELAY_PER_SPEED_MS`
/// Speed 1 is 991 ms per step, speed 100 is 100 ms per step
pub const BASE_DELAY_MS: u64 = 1000;
pub const DELAY_PER_SPEED_MS: u64 = 9;

/// Default number of values in a random demo array
pub const DEFAULT_ARRAY_SIZE: usize = 10;

/// Default number of vertices in a random demo graph
pub const DEFAULT_GRAPH_SIZE: usize = 6;

/// Default number of nodes in a random demo tree
pub const DEFAULT_TREE_SIZE: usize = 7;

/// Largest size accepted for any random demo input
pub const MAX_DEMO_SIZE: usize = 26;

/// Event-loop poll interval of the terminal viewer
pub const POLL_INTERVAL_MS: u64 = 50;
