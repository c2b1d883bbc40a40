//! Simulated device size of the preview frame.

use std::ops::RangeInclusive;

pub const WIDTH_RANGE: RangeInclusive<u32> = 375..=640;
pub const HEIGHT_RANGE: RangeInclusive<u32> = 600..=926;

/// Named device sizes offered in the preset selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ViewportPreset {
    #[default]
    Responsive,
    GalaxyS20Plus,
    GalaxyFold,
    Pixel5,
    Iphone12,
    Iphone11,
}

impl ViewportPreset {
    pub const ALL: [ViewportPreset; 6] = [
        ViewportPreset::Responsive,
        ViewportPreset::GalaxyS20Plus,
        ViewportPreset::GalaxyFold,
        ViewportPreset::Pixel5,
        ViewportPreset::Iphone12,
        ViewportPreset::Iphone11,
    ];

    pub fn key(self) -> &'static str {
        match self {
            ViewportPreset::Responsive => "responsive",
            ViewportPreset::GalaxyS20Plus => "galaxy-s20+",
            ViewportPreset::GalaxyFold => "galaxy-fold",
            ViewportPreset::Pixel5 => "pixel-5",
            ViewportPreset::Iphone12 => "iphone-12",
            ViewportPreset::Iphone11 => "iphone-11",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ViewportPreset::Responsive => "Responsive",
            ViewportPreset::GalaxyS20Plus => "Galaxy S20+",
            ViewportPreset::GalaxyFold => "Galaxy Fold",
            ViewportPreset::Pixel5 => "Pixel 5",
            ViewportPreset::Iphone12 => "Iphone 12 Pro",
            ViewportPreset::Iphone11 => "Iphone 11 Pro",
        }
    }

    /// (width, height) in logical pixels.
    pub fn size(self) -> (u32, u32) {
        match self {
            ViewportPreset::Responsive => (*WIDTH_RANGE.start(), *HEIGHT_RANGE.start()),
            ViewportPreset::GalaxyS20Plus => (384, 854),
            ViewportPreset::GalaxyFold => (280, 653),
            ViewportPreset::Pixel5 => (393, 851),
            ViewportPreset::Iphone12 => (390, 844),
            ViewportPreset::Iphone11 => (375, 812),
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Width,
    Height,
}

impl Axis {
    pub fn bounds(self) -> RangeInclusive<u32> {
        match self {
            Axis::Width => WIDTH_RANGE,
            Axis::Height => HEIGHT_RANGE,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
    preset: ViewportPreset,
}

impl Default for Viewport {
    fn default() -> Self {
        let preset = ViewportPreset::Responsive;
        let (width, height) = preset.size();
        Self {
            width,
            height,
            preset,
        }
    }
}

impl Viewport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn preset(&self) -> ViewportPreset {
        self.preset
    }

    pub fn is_responsive(&self) -> bool {
        self.preset == ViewportPreset::Responsive
    }

    /// Width/height inputs are only editable in responsive mode.
    pub fn dimension_inputs_enabled(&self) -> bool {
        self.is_responsive()
    }

    pub fn select_preset(&mut self, preset: ViewportPreset) {
        let (width, height) = preset.size();
        self.width = width;
        self.height = height;
        self.preset = preset;
    }

    /// Select by wire key; unknown keys are ignored.
    pub fn select_preset_key(&mut self, key: &str) -> bool {
        match ViewportPreset::from_key(key) {
            Some(preset) => {
                self.select_preset(preset);
                true
            }
            None => false,
        }
    }

    /// Set one dimension from the numeric inputs. Values outside the axis
    /// bounds are ignored and `false` is returned.
    pub fn set_dimension(&mut self, axis: Axis, value: u32) -> bool {
        if !axis.bounds().contains(&value) {
            return false;
        }
        match axis {
            Axis::Width => self.width = value,
            Axis::Height => self.height = value,
        }
        true
    }

    /// Adopt the size observed after a drag-resize of the frame. Not bounds-checked.
    pub fn resize_to(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}
