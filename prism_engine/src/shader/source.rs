//! Dual-stage shader asset parsing
//!
//! An asset is plain text with inline stage markers:
//!
//! ```text
//! #shader vertex
//! ...vertex source...
//! #shader fragment
//! ...fragment source...
//! ```
//!
//! A line is a marker iff it contains `#shader`. A marker containing `vertex`
//! selects the vertex stage, otherwise one containing `fragment` selects the
//! fragment stage; any other marker keeps the current selection. Every other
//! line is appended, plus `\n`, to the selected stage. Lines before the first
//! recognized marker are dropped.

use std::fs;
use std::path::Path;

use crate::engine_debug;
use crate::engine_error;
use crate::error::{Error, Result};
use crate::shader::ShaderStage;

const MARKER: &str = "#shader";

/// Vertex and fragment sources extracted from one asset
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShaderProgramSource {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderProgramSource {
    pub fn stage(&self, stage: ShaderStage) -> &str {
        match stage {
            ShaderStage::Vertex => &self.vertex,
            ShaderStage::Fragment => &self.fragment,
        }
    }
}

/// Stage selected by the most recent marker line
fn marker_stage(line: &str) -> Option<ShaderStage> {
    if line.contains("vertex") {
        Some(ShaderStage::Vertex)
    } else if line.contains("fragment") {
        Some(ShaderStage::Fragment)
    } else {
        None
    }
}

/// Split asset text into stage sources
pub fn parse_shader_source(text: &str) -> ShaderProgramSource {
    let mut source = ShaderProgramSource::default();
    let mut current: Option<ShaderStage> = None;

    for line in text.lines() {
        if line.contains(MARKER) {
            if let Some(stage) = marker_stage(line) {
                current = Some(stage);
            }
            continue;
        }

        let target = match current {
            Some(ShaderStage::Vertex) => &mut source.vertex,
            Some(ShaderStage::Fragment) => &mut source.fragment,
            None => continue,
        };
        target.push_str(line);
        target.push('\n');
    }

    source
}

/// Read and split a shader asset from disk
///
/// # Errors
///
/// `AssetRead` if the file cannot be opened or is not valid UTF-8.
pub fn parse_shader_file(path: impl AsRef<Path>) -> Result<ShaderProgramSource> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| {
        engine_error!("prism::shader", "Failed to read shader asset {}: {}", path.display(), e);
        Error::AssetRead {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
    })?;

    let source = parse_shader_source(&text);
    engine_debug!("prism::shader",
        "Parsed {}: {} vertex lines, {} fragment lines",
        path.display(), source.vertex.lines().count(), source.fragment.lines().count());
    Ok(source)
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
