//! Compute device selection for embedding backends.

use std::fmt;

use candle_core::Device;

use crate::error::{RagError, Result};

/// The compute device a backend binds its weights to at construction.
///
/// Defaults to [`Cpu`](ComputeDevice::Cpu). Accelerator variants fail
/// with [`RagError::LoadError`] when the requested device is unavailable,
/// rather than falling back silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComputeDevice {
    /// CPU inference.
    #[default]
    Cpu,
    /// NVIDIA GPU with the given ordinal.
    Cuda(usize),
    /// Apple Silicon GPU with the given ordinal.
    Metal(usize),
}

impl ComputeDevice {
    /// Resolve to a candle [`Device`], erroring if the device cannot be
    /// initialized.
    pub(crate) fn to_candle(self, model: &str) -> Result<Device> {
        let unavailable = |device: &str, message: String| RagError::LoadError {
            model: model.to_string(),
            message: format!("device {device} unavailable: {message}"),
        };

        match self {
            Self::Cpu => Ok(Device::Cpu),
            Self::Cuda(ordinal) => {
                if !candle_core::utils::cuda_is_available() {
                    return Err(unavailable("cuda", "not compiled in or no driver".to_string()));
                }
                Device::new_cuda(ordinal).map_err(|e| unavailable("cuda", e.to_string()))
            }
            Self::Metal(ordinal) => {
                if !candle_core::utils::metal_is_available() {
                    return Err(unavailable("metal", "not compiled in".to_string()));
                }
                Device::new_metal(ordinal).map_err(|e| unavailable("metal", e.to_string()))
            }
        }
    }
}

impl fmt::Display for ComputeDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpu => write!(f, "cpu"),
            Self::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
            Self::Metal(ordinal) => write!(f, "metal:{ordinal}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cpu_is_the_default_and_always_resolves() {
        assert_eq!(ComputeDevice::default(), ComputeDevice::Cpu);
        assert!(ComputeDevice::Cpu.to_candle("test-model").is_ok());
    }

    #[test]
    fn display_includes_ordinal() {
        assert_eq!(ComputeDevice::Cuda(1).to_string(), "cuda:1");
        assert_eq!(ComputeDevice::Cpu.to_string(), "cpu");
    }
}
