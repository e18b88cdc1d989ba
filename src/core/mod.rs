//! Core data structures for tabular retail data.

mod frame;

pub use frame::{Column, Frame, FrameBuilder};
