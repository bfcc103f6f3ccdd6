pub mod buffer2;
pub mod log_setup;
pub mod test_utils;

pub use buffer2::{Buffer2, NEIGHBORS_4, NEIGHBORS_8};
