//! # Stage Pipelines
//!
//! Encoders and decoders are flat, ordered lists of stages. Each stage maps one
//! `[B, C, H, W]` tensor to another; a `Pipeline` folds its input through them.

use burn::{nn::conv::ConvTranspose2d, prelude::*};

use super::{BasicBlock, DownSample, UpSample};

/// A single tensor-to-tensor step of a pipeline.
#[derive(Module, Debug)]
pub enum Stage<B: Backend> {
    /// Size-preserving convolution block.
    Basic(BasicBlock<B>),
    /// 4x spatial reduction.
    Down(DownSample<B>),
    /// 4x spatial expansion.
    Up(UpSample<B>),
    /// Size-preserving transposed convolution, used to project onto the output channel.
    Project(ConvTranspose2d<B>),
}

impl<B: Backend> Stage<B> {
    /// Applies the wrapped layer.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        match self {
            Self::Basic(block) => block.forward(x),
            Self::Down(block) => block.forward(x),
            Self::Up(block) => block.forward(x),
            Self::Project(deconv) => deconv.forward(x),
        }
    }
}

/// An ordered sequence of stages.
#[derive(Module, Debug)]
pub struct Pipeline<B: Backend> {
    stages: Vec<Stage<B>>,
}

impl<B: Backend> Pipeline<B> {
    /// Builds a pipeline that runs `stages` in order.
    pub fn new(stages: Vec<Stage<B>>) -> Self {
        Self { stages }
    }

    /// Number of stages.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the pipeline has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Folds `x` through every stage.
    pub fn forward(&self, x: Tensor<B, 4>) -> Tensor<B, 4> {
        self.stages.iter().fold(x, |x, stage| stage.forward(x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::modules::{same_size_deconv, BasicBlockConfig, UpSampleConfig};
    use crate::tests::TestBackend;
    use burn::tensor::Distribution;

    #[test]
    fn empty_pipeline_is_identity() {
        let device = Default::default();
        let pipeline = Pipeline::<TestBackend>::new(Vec::new());
        let x = Tensor::<TestBackend, 4>::random([1, 2, 3, 4], Distribution::Default, &device);

        assert!(pipeline.is_empty());
        pipeline
            .forward(x.clone())
            .into_data()
            .assert_eq(&x.into_data(), true);
    }

    #[test]
    fn pipeline_applies_stages_in_order() {
        let device = Default::default();
        let pipeline = Pipeline::new(vec![
            Stage::Basic(BasicBlockConfig::new(3, 4).init::<TestBackend>(&device)),
            Stage::Up(UpSampleConfig::new(4, 2).init(&device)),
            Stage::Project(same_size_deconv(2, 1, &device)),
        ]);
        let x = Tensor::<TestBackend, 4>::random([2, 3, 5, 6], Distribution::Default, &device);

        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.forward(x).dims(), [2, 1, 20, 24]);
    }
}
