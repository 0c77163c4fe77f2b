//! Hardware-style variable layouts

mod tile;

pub use tile::{FullyConnectedTile, Slot};
