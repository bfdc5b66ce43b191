//! Backend selection for the TerraNet demos.
//!
//! The backend is fixed at compile time by the `cuda`, `wgpu` or `ndarray`
//! (default) feature. [`create_device`] also seeds the backend's generator, which
//! drives both weight initialization and the random input raster of a run.

use burn::prelude::Backend;
use cfg_if::cfg_if;

cfg_if! {
    if #[cfg(feature = "cuda")] {
        use burn::backend::cuda::{Cuda, CudaDevice};

        /// Backend the demos run on.
        pub type SelectedBackend = Cuda;
        /// Device of [`SelectedBackend`].
        pub type SelectedDevice = CudaDevice;

        const BACKEND_NAME: &str = "CUDA (NVIDIA GPU)";
    } else if #[cfg(feature = "wgpu")] {
        use burn::backend::wgpu::{Wgpu, WgpuDevice};

        /// Backend the demos run on.
        pub type SelectedBackend = Wgpu;
        /// Device of [`SelectedBackend`].
        pub type SelectedDevice = WgpuDevice;

        const BACKEND_NAME: &str = "WGPU (GPU)";
    } else {
        use burn::backend::ndarray::{NdArray, NdArrayDevice};

        /// Backend the demos run on.
        pub type SelectedBackend = NdArray;
        /// Device of [`SelectedBackend`].
        pub type SelectedDevice = NdArrayDevice;

        const BACKEND_NAME: &str = "NdArray (CPU)";
    }
}

/// Returns the default device, seeding the backend first when a seed is given.
pub fn create_device(seed: Option<u64>) -> SelectedDevice {
    if let Some(seed) = seed {
        SelectedBackend::seed(seed);
        tracing::debug!(seed, backend = BACKEND_NAME, "seeded backend");
    }
    SelectedDevice::default()
}

/// Human readable backend name for logs.
pub const fn get_backend_name() -> &'static str {
    BACKEND_NAME
}

#[cfg(test)]
mod tests {
    use super::*;
    use burn::tensor::{Distribution, Tensor};

    #[test]
    fn seeded_devices_draw_identical_rasters() {
        let draw = |device: &SelectedDevice| {
            Tensor::<SelectedBackend, 4>::random([1, 2, 4, 4], Distribution::Default, device)
                .into_data()
        };

        let first = draw(&create_device(Some(7)));
        let second = draw(&create_device(Some(7)));

        first.assert_eq(&second, true);
    }
}
