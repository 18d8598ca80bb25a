use anyhow::{anyhow, Result};
use image::imageops::FilterType;
use image::RgbImage;
use std::path::Path;
use tracing::info;
use tract_onnx::prelude::*;

/// Single classification decision for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub label_id: usize,
    pub confidence: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum InputLayout {
    Nhwc,
    Nchw,
}

pub struct ImageClassifier {
    plan: SimplePlan<TypedFact, Box<dyn TypedOp>, TypedModel>,
    layout: InputLayout,
    width: usize,
    height: usize,
    input_type: DatumType,
}

impl ImageClassifier {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let plan = tract_onnx::onnx()
            .model_for_path(path)?
            .into_optimized()?
            .into_runnable()?;

        let fact = plan.model().input_fact(0)?;
        let dims = fact
            .shape
            .as_concrete()
            .ok_or_else(|| anyhow!("Model input shape is not fully specified"))?;
        if dims.len() != 4 {
            return Err(anyhow!(
                "Expected a 4-dimensional image input, got {:?}",
                dims
            ));
        }

        let (layout, height, width) = if dims[1] == 3 {
            (InputLayout::Nchw, dims[2], dims[3])
        } else if dims[3] == 3 {
            (InputLayout::Nhwc, dims[1], dims[2])
        } else {
            return Err(anyhow!(
                "Could not locate the channel axis in input shape {:?}",
                dims
            ));
        };
        let input_type = fact.datum_type;

        info!(
            "Loaded model {} (input {}x{}, {:?})",
            path.display(),
            width,
            height,
            layout
        );

        Ok(Self {
            plan,
            layout,
            width,
            height,
            input_type,
        })
    }

    /// Input geometry declared by the model, (width, height).
    pub fn input_size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Classify one RGB frame, returning the top_k highest-scoring labels,
    /// best first.
    pub fn classify(&self, frame: &RgbImage, top_k: usize) -> Result<Vec<Classification>> {
        let resized = image::imageops::resize(
            frame,
            self.width as u32,
            self.height as u32,
            FilterType::Triangle,
        );

        let input = self.image_to_tensor(&resized)?;
        let outputs = self.plan.run(tvec!(input.into_tvalue()))?;
        let scores = Self::scores_from_output(&outputs[0])?;

        let mut ranked: Vec<Classification> = scores
            .into_iter()
            .enumerate()
            .map(|(label_id, confidence)| Classification {
                label_id,
                confidence,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(top_k);

        Ok(ranked)
    }

    /// Quantized models take raw RGB bytes, float models take [0,1] values.
    fn image_to_tensor(&self, rgb: &RgbImage) -> Result<Tensor> {
        let (w, h) = (self.width, self.height);

        let tensor = if self.input_type.unquantized() == u8::datum_type() {
            match self.layout {
                InputLayout::Nhwc => tract_ndarray::Array4::from_shape_fn(
                    (1, h, w, 3),
                    |(_, y, x, c)| rgb.get_pixel(x as u32, y as u32)[c],
                )
                .into_tensor(),
                InputLayout::Nchw => tract_ndarray::Array4::from_shape_fn(
                    (1, 3, h, w),
                    |(_, c, y, x)| rgb.get_pixel(x as u32, y as u32)[c],
                )
                .into_tensor(),
            }
        } else {
            match self.layout {
                InputLayout::Nhwc => tract_ndarray::Array4::from_shape_fn(
                    (1, h, w, 3),
                    |(_, y, x, c)| rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
                )
                .into_tensor(),
                InputLayout::Nchw => tract_ndarray::Array4::from_shape_fn(
                    (1, 3, h, w),
                    |(_, c, y, x)| rgb.get_pixel(x as u32, y as u32)[c] as f32 / 255.0,
                )
                .into_tensor(),
            }
        };

        Ok(tensor.cast_to_dt(self.input_type)?.into_owned())
    }

    /// Flatten the output tensor into per-label scores. 8-bit quantized
    /// outputs are dequantized with the tensor's scale and zero point.
    fn scores_from_output(output: &Tensor) -> Result<Vec<f32>> {
        let datum_type = output.datum_type();

        if datum_type.unquantized() == u8::datum_type() {
            let (zero_point, scale) = datum_type.zp_scale();
            Ok(output
                .to_array_view::<u8>()?
                .iter()
                .map(|&raw| scale * (raw as i32 - zero_point) as f32)
                .collect())
        } else {
            Ok(output
                .cast_to::<f32>()?
                .to_array_view::<f32>()?
                .iter()
                .copied()
                .collect())
        }
    }
}
