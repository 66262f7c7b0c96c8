//! Error types for driftlight.
//!
//! The animation engine itself never fails: a missing drawing surface simply
//! means no backdrop. These errors come from the host layer (window, GPU
//! presentation) and from configuration I/O.

use thiserror::Error;

/// Errors that can occur during GPU initialization.
#[derive(Debug, Error)]
pub enum GpuError {
    /// Failed to create a surface for rendering.
    #[error("Failed to create GPU surface: {0}")]
    SurfaceCreation(#[from] wgpu::CreateSurfaceError),
    /// No compatible GPU adapter found.
    #[error("No compatible GPU adapter found. Ensure your system has a GPU with WebGPU/Vulkan/Metal/DX12 support.")]
    NoAdapter,
    /// Failed to create GPU device.
    #[error("Failed to create GPU device: {0}")]
    DeviceCreation(#[from] wgpu::RequestDeviceError),
    /// The surface reported no usable texture formats.
    #[error("GPU surface has no supported texture formats")]
    NoSurfaceFormat,
}

/// Errors that can occur while loading or saving a [`BackdropConfig`](crate::BackdropConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or write the config file.
    #[error("Failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for a backdrop.
    #[error("Invalid backdrop config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors that can occur when running a backdrop.
#[derive(Debug, Error)]
pub enum BackdropError {
    /// Failed to create event loop.
    #[error("Failed to create event loop: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    /// Failed to create window.
    #[error("Failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    /// GPU initialization failed.
    #[error("GPU error: {0}")]
    Gpu(#[from] GpuError),
    /// Loading or saving configuration failed.
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    /// Encoding or writing a snapshot image failed.
    #[error("Failed to write snapshot: {0}")]
    Image(#[from] image::ImageError),
}
