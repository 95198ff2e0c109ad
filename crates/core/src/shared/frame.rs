use serde::{Deserialize, Serialize};

use crate::shared::error::EngineError;
use crate::shared::geometry::Size;

/// Sensor rotation reported by the camera for a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// Quarter turns leave the detector's box coordinates expressed against
    /// the rotated (transposed) buffer.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

impl TryFrom<u32> for Rotation {
    type Error = EngineError;

    fn try_from(degrees: u32) -> Result<Self, Self::Error> {
        match degrees {
            0 => Ok(Rotation::Deg0),
            90 => Ok(Rotation::Deg90),
            180 => Ok(Rotation::Deg180),
            270 => Ok(Rotation::Deg270),
            other => Err(EngineError::InvalidRotation(other)),
        }
    }
}

impl From<Rotation> for u32 {
    fn from(rotation: Rotation) -> Self {
        rotation.degrees()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LensFacing {
    Front,
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PixelFormat {
    Nv21,
    Yv12,
    Yuv420,
    Rgb8,
}

/// The part of a frame the engine still needs after detection: enough to
/// map detector boxes into overlay space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameGeometry {
    pub width: u32,
    pub height: u32,
    pub rotation: Rotation,
    pub lens_facing: LensFacing,
}

impl FrameGeometry {
    /// Dimensions in the coordinate system the detector reports boxes in.
    pub fn effective_size(&self) -> (u32, u32) {
        if self.rotation.swaps_axes() {
            (self.height, self.width)
        } else {
            (self.width, self.height)
        }
    }

    pub fn effective_size_f32(&self) -> Size {
        let (w, h) = self.effective_size();
        Size::new(w as f32, h as f32)
    }
}

/// One camera frame handed to the detection pipeline.
///
/// Pixel data is opaque to the engine; only the detector reads it. Width
/// and height are reported before rotation is applied.
#[derive(Clone, Debug)]
pub struct Frame {
    data: Vec<u8>,
    width: u32,
    height: u32,
    rotation: Rotation,
    format: PixelFormat,
    lens_facing: LensFacing,
}

impl Frame {
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        rotation: Rotation,
        format: PixelFormat,
        lens_facing: LensFacing,
    ) -> Self {
        Self {
            data,
            width,
            height,
            rotation,
            format,
            lens_facing,
        }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn lens_facing(&self) -> LensFacing {
        self.lens_facing
    }

    pub fn geometry(&self) -> FrameGeometry {
        FrameGeometry {
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            lens_facing: self.lens_facing,
        }
    }
}
