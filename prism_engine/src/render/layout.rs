/// Vertex buffer layout - how bytes in a vertex buffer map to shader inputs

use crate::render::ComponentType;

/// One attribute inside a vertex record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexBufferElement {
    /// Scalar component type
    pub component_type: ComponentType,
    /// Number of components (1..=4)
    pub count: u32,
    /// Integer components are normalized to [0, 1] when read as floats
    pub normalized: bool,
}

impl VertexBufferElement {
    /// Bytes occupied by this attribute in one vertex record
    pub fn size_bytes(&self) -> u32 {
        self.count * self.component_type.size_bytes()
    }
}

/// Rust scalar types usable as vertex attribute components
pub trait VertexAttribute {
    const COMPONENT_TYPE: ComponentType;
    const NORMALIZED: bool;
}

impl VertexAttribute for f32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float;
    const NORMALIZED: bool = false;
}

impl VertexAttribute for u32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedInt;
    const NORMALIZED: bool = false;
}

impl VertexAttribute for u8 {
    const COMPONENT_TYPE: ComponentType = ComponentType::UnsignedByte;
    const NORMALIZED: bool = true;
}

/// Ordered attribute list plus accumulated stride
///
/// Built once with `push`, then read-only.
///
/// # Example
///
/// ```
/// use prism_engine::prism::render::VertexBufferLayout;
///
/// let mut layout = VertexBufferLayout::new();
/// layout.push::<f32>(2);
/// layout.push::<f32>(3);
/// assert_eq!(layout.stride(), 20);
/// ```
#[derive(Debug, Clone, Default)]
pub struct VertexBufferLayout {
    elements: Vec<VertexBufferElement>,
    stride: u32,
}

impl VertexBufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one attribute of `count` components of type `T`
    pub fn push<T: VertexAttribute>(&mut self, count: u32) -> &mut Self {
        let element = VertexBufferElement {
            component_type: T::COMPONENT_TYPE,
            count,
            normalized: T::NORMALIZED,
        };
        self.stride += element.size_bytes();
        self.elements.push(element);
        self
    }

    pub fn elements(&self) -> &[VertexBufferElement] {
        &self.elements
    }

    /// Byte distance between consecutive vertex records
    pub fn stride(&self) -> u32 {
        self.stride
    }
}

#[cfg(test)]
#[path = "layout_tests.rs"]
mod tests;
