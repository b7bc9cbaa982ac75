/// Vertex array - input-assembly configuration for draw calls
///
/// Associates vertex buffers with layouts. The array references buffers, it
/// does not own them: dropping the array only deletes the array object.

use crate::device_call;
use crate::engine_trace;
use crate::error::Result;
use crate::render::{DeviceRef, VertexArrayHandle, VertexBuffer, VertexBufferLayout};

pub struct VertexArray {
    device: DeviceRef,
    handle: VertexArrayHandle,
}

impl VertexArray {
    pub fn new(device: DeviceRef) -> Result<Self> {
        let dev = &*device;
        let handle = device_call!(dev, dev.create_vertex_array())?;
        Ok(Self { device, handle })
    }

    /// Describe `buffer` to the device using `layout`
    ///
    /// Attribute indices start at 0 for every call, one per layout element in
    /// declaration order. Two calls with separate layouts therefore target the
    /// same indices; combine attributes into one layout instead.
    pub fn add_buffer(&self, buffer: &VertexBuffer, layout: &VertexBufferLayout) {
        self.bind();
        buffer.bind();

        let dev = &*self.device;
        let stride = layout.stride() as i32;
        let mut offset = 0u32;
        for (index, element) in layout.elements().iter().enumerate() {
            let index = index as u32;
            device_call!(dev, dev.enable_vertex_attrib_array(index));
            device_call!(dev, dev.vertex_attrib_pointer(
                index,
                element.count as i32,
                element.component_type,
                element.normalized,
                stride,
                offset as i32,
            ));
            engine_trace!("prism::vertex_array",
                "Attribute {}: {} x {:?} at offset {} (stride {})",
                index, element.count, element.component_type, offset, stride);
            offset += element.size_bytes();
        }
    }

    pub fn bind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_vertex_array(self.handle));
    }

    pub fn unbind(&self) {
        let dev = &*self.device;
        device_call!(dev, dev.bind_vertex_array(VertexArrayHandle::INVALID));
    }

    pub fn handle(&self) -> VertexArrayHandle {
        self.handle
    }
}

impl Drop for VertexArray {
    fn drop(&mut self) {
        let dev = &*self.device;
        device_call!(dev, dev.delete_vertex_array(self.handle));
    }
}

#[cfg(test)]
#[path = "vertex_array_tests.rs"]
mod tests;
