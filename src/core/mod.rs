//! Platform-agnostic core module - shared between the server and the browser client

pub mod data;
pub mod generator;
pub mod parser;
pub mod scene;

pub use data::{Point, Proximity, Sweep};
#[cfg(not(target_arch = "wasm32"))]
pub use generator::ThreadRandom;
pub use generator::{generate_sweep, Clock, MonotonicClock, RandomSource, Sensor, SystemClock};
pub use parser::{parse_sweep, FetchError};
pub use scene::{Scene, ScreenPoint, UPDATE_PERIOD_MS};
