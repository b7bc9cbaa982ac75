//! Render module - device abstraction and GPU resource wrappers

// Module declarations
pub mod device;
pub mod error_channel;
pub mod buffer;
pub mod layout;
pub mod vertex_array;
pub mod frame;

// Re-export everything from device.rs
pub use device::*;

// Re-export from other modules
pub use error_channel::*;
pub use buffer::*;
pub use layout::*;
pub use vertex_array::*;
pub use frame::*;

// Mock device for tests (no GPU required)
#[cfg(test)]
pub mod mock_device;
