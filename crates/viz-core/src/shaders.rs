use crate::error::{Error, Result};

// Shaders bundled as string constants
pub static SCENE_VERTEX_WGSL: &str = include_str!("../shaders/scene_vertex.wgsl");
pub static SCENE_FRAGMENT_WGSL: &str = include_str!("../shaders/scene_fragment.wgsl");
pub static POST_WGSL: &str = include_str!("../shaders/post.wgsl");

/// Vertex and fragment programs for the icosahedron material.
#[derive(Clone, Debug)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn bundled() -> Self {
        Self {
            vertex: SCENE_VERTEX_WGSL.to_string(),
            fragment: SCENE_FRAGMENT_WGSL.to_string(),
        }
    }

    /// Page-supplied overrides. `None` keeps the bundled stage; an override
    /// that is present but blank means the material cannot be built.
    pub fn with_overrides(vertex: Option<String>, fragment: Option<String>) -> Result<Self> {
        let bundled = Self::bundled();
        let vertex = match vertex {
            Some(src) if src.trim().is_empty() => return Err(Error::MissingShader("vertex")),
            Some(src) => src,
            None => bundled.vertex,
        };
        let fragment = match fragment {
            Some(src) if src.trim().is_empty() => return Err(Error::MissingShader("fragment")),
            Some(src) => src,
            None => bundled.fragment,
        };
        Ok(Self { vertex, fragment })
    }
}
