use candle_core::Device;
use tracing::{debug, info, warn};

use super::error::EmbeddingError;

/// GPU backends compiled into this build, in preference order.
fn gpu_backends() -> Vec<(&'static str, fn() -> candle_core::Result<Device>)> {
    #[allow(unused_mut)]
    let mut backends: Vec<(&'static str, fn() -> candle_core::Result<Device>)> = Vec::new();

    #[cfg(feature = "metal")]
    backends.push(("metal", || Device::new_metal(0)));

    #[cfg(feature = "cuda")]
    backends.push(("cuda", || Device::new_cuda(0)));

    backends
}

/// Picks the first GPU backend that initializes, otherwise the CPU.
///
/// Inference batches are sized by the candidate pool, so a GPU is preferred whenever one is
/// compiled in and reachable.
pub fn select_device() -> Result<Device, EmbeddingError> {
    let backends = gpu_backends();
    if backends.is_empty() {
        debug!("No GPU features enabled");
    }

    let mut failures: Vec<String> = Vec::new();
    for (name, open) in backends {
        match open() {
            Ok(device) => {
                info!(backend = name, "Using GPU acceleration");
                return Ok(device);
            }
            Err(e) => {
                let msg = e.to_string();
                warn!(backend = name, error = %msg, "GPU device unavailable");
                failures.push(format!("{name} failed: {msg}"));
            }
        }
    }

    let reason = if !cfg!(any(feature = "metal", feature = "cuda")) {
        "no GPU backend compiled".to_string()
    } else {
        failures.join("; ")
    };

    warn!(reason = %reason, "Falling back to CPU device");
    Ok(Device::Cpu)
}
