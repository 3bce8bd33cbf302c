use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShaderStage::Vertex => write!(f, "vertex"),
            ShaderStage::Fragment => write!(f, "fragment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BubblesError {
    #[error("Usage: {program} <number of circles>")]
    Usage { program: String },
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible graphics adapter found")]
    NoAdapter,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("{stage} shader compilation failed:\n{log}")]
    ShaderCompile { stage: ShaderStage, log: String },
    #[error("shader program linking failed:\n{0}")]
    ShaderLink(String),
    #[error("{count} circles are too many to draw")]
    TooManyCircles { count: usize },
    #[error("vertex buffer of {bytes} bytes exceeds the device limit of {limit} bytes")]
    VertexBufferTooLarge { bytes: u64, limit: u64 },
}

impl BubblesError {
    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            BubblesError::Usage { .. } => 255,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, BubblesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usage_message() {
        let err = BubblesError::Usage { program: "bubbles".into() };
        assert_eq!(err.to_string(), "Usage: bubbles <number of circles>");
        assert_eq!(err.exit_code(), 255);
    }

    #[test]
    fn shader_errors_carry_log() {
        let err = BubblesError::ShaderCompile {
            stage: ShaderStage::Fragment,
            log: "expected ';'".into(),
        };
        assert_eq!(err.to_string(), "fragment shader compilation failed:\nexpected ';'");
        assert_eq!(err.exit_code(), 1);
    }

    #[test]
    fn oversized_buffer_is_not_a_usage_error() {
        let err = BubblesError::VertexBufferTooLarge { bytes: 434_400_000, limit: 268_435_456 };
        assert_eq!(
            err.to_string(),
            "vertex buffer of 434400000 bytes exceeds the device limit of 268435456 bytes"
        );
        assert_eq!(err.exit_code(), 1);
        assert_eq!(BubblesError::TooManyCircles { count: 5 }.exit_code(), 1);
    }
}
