/// Failures surfaced by the scene runtime.
///
/// Construction errors are fatal to `initScene`; nothing here is retried
/// in-core.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("graphics context unavailable: {0}")]
    ContextUnavailable(String),
    #[error("shader compilation failed: {0}")]
    ShaderCompile(String),
    #[error("graphics context lost")]
    ContextLost,
    #[error("scene controller already disposed")]
    Disposed,
    #[error("surface error: {0}")]
    Surface(String),
}
