//! GPU buffers - vertex and index storage
//!
//! Each buffer owns exactly one device object, uploads its payload once as a
//! static store at construction and deletes the object when dropped. There is
//! no update-in-place.

use bytemuck::Pod;

use crate::device_call;
use crate::engine_debug;
use crate::error::{Error, Result};
use crate::render::{BufferHandle, BufferTarget, DeviceRef, IndexType};

/// Creates a buffer object on `target` and uploads `data` into it
fn upload(device: &DeviceRef, target: BufferTarget, data: &[u8]) -> Result<BufferHandle> {
    let dev = &**device;
    let handle = device_call!(dev, dev.create_buffer())?;
    device_call!(dev, dev.bind_buffer(target, handle));
    device_call!(dev, dev.buffer_data_static(target, data));
    Ok(handle)
}

// ============================================================================
// Vertex buffer
// ============================================================================

/// Immutable vertex attribute storage
pub struct VertexBuffer {
    device: DeviceRef,
    handle: BufferHandle,
    size: usize,
}

impl VertexBuffer {
    /// Upload raw bytes as a static vertex store
    pub fn new(device: DeviceRef, data: &[u8]) -> Result<Self> {
        let handle = upload(&device, BufferTarget::Array, data)?;
        engine_debug!("prism::buffer", "Vertex buffer {} uploaded ({} bytes)", handle.0, data.len());
        Ok(Self { device, handle, size: data.len() })
    }

    /// Upload a slice of plain-old-data vertices
    pub fn from_slice<T: Pod>(device: DeviceRef, vertices: &[T]) -> Result<Self> {
        Self::new(device, bytemuck::cast_slice(vertices))
    }

    pub fn bind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_buffer(BufferTarget::Array, self.handle));
    }

    pub fn unbind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_buffer(BufferTarget::Array, BufferHandle::INVALID));
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Size of the uploaded store in bytes
    pub fn size(&self) -> usize {
        self.size
    }
}

impl Drop for VertexBuffer {
    fn drop(&mut self) {
        let dev = &*self.device;
        device_call!(dev, dev.delete_buffer(self.handle));
    }
}

// ============================================================================
// Index buffer
// ============================================================================

/// Immutable 32-bit index storage
pub struct IndexBuffer {
    device: DeviceRef,
    handle: BufferHandle,
    count: usize,
}

impl IndexBuffer {
    /// Upload indices as a static element store
    ///
    /// # Errors
    ///
    /// `InvalidResource` for an empty index list (nothing could ever be drawn).
    pub fn new(device: DeviceRef, indices: &[u32]) -> Result<Self> {
        if indices.is_empty() {
            return Err(Error::InvalidResource("index buffer needs at least one index".to_string()));
        }
        let handle = upload(&device, BufferTarget::ElementArray, bytemuck::cast_slice(indices))?;
        engine_debug!("prism::buffer", "Index buffer {} uploaded ({} indices)", handle.0, indices.len());
        Ok(Self { device, handle, count: indices.len() })
    }

    pub fn bind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_buffer(BufferTarget::ElementArray, self.handle));
    }

    pub fn unbind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_buffer(BufferTarget::ElementArray, BufferHandle::INVALID));
    }

    pub fn handle(&self) -> BufferHandle {
        self.handle
    }

    /// Number of indices
    pub fn count(&self) -> usize {
        self.count
    }

    /// Element type used when drawing from this buffer
    pub fn index_type(&self) -> IndexType {
        IndexType::U32
    }
}

impl Drop for IndexBuffer {
    fn drop(&mut self) {
        let dev = &*self.device;
        device_call!(dev, dev.delete_buffer(self.handle));
    }
}

#[cfg(test)]
#[path = "buffer_tests.rs"]
mod tests;
