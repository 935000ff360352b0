use std::collections::BTreeMap;

use crate::math::Color;

/// A loosely typed material property.
#[derive(Debug, Clone, PartialEq)]
pub enum MaterialValue {
    Number(f32),
    Color(Color),
    Bool(bool),
    Text(String),
}

impl From<f32> for MaterialValue {
    fn from(v: f32) -> Self {
        MaterialValue::Number(v)
    }
}

impl From<Color> for MaterialValue {
    fn from(v: Color) -> Self {
        MaterialValue::Color(v)
    }
}

impl From<bool> for MaterialValue {
    fn from(v: bool) -> Self {
        MaterialValue::Bool(v)
    }
}

impl From<&str> for MaterialValue {
    /// Hex colours become `Color`, anything else stays text.
    fn from(v: &str) -> Self {
        match Color::parse_hex(v) {
            Some(c) => MaterialValue::Color(c),
            None => MaterialValue::Text(v.to_string()),
        }
    }
}

impl MaterialValue {
    pub fn as_number(&self) -> Option<f32> {
        match self {
            MaterialValue::Number(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            MaterialValue::Color(c) => Some(*c),
            _ => None,
        }
    }
}

/// Refractive transmission material for the glass mesh.
///
/// The recognized keys have typed fields with defaults; every other key is
/// forwarded untouched to the rendering engine through `extra`.
#[derive(Debug, Clone, PartialEq)]
pub struct GlassMaterial {
    pub ior: f32,
    pub thickness: f32,
    pub anisotropy: f32,
    pub chromatic_aberration: f32,
    /// Fixed mesh scale. `None` lets the compositor fit the mesh to the
    /// viewport every frame.
    pub scale: Option<f32>,
    pub extra: BTreeMap<String, MaterialValue>,
}

impl Default for GlassMaterial {
    fn default() -> Self {
        Self {
            ior: 1.15,
            thickness: 5.0,
            anisotropy: 0.01,
            chromatic_aberration: 0.1,
            scale: None,
            extra: BTreeMap::new(),
        }
    }
}

impl GlassMaterial {
    /// Set one property by name. Recognized keys only accept numbers; a
    /// mistyped value for them is ignored with a warning.
    pub fn set(&mut self, key: &str, value: impl Into<MaterialValue>) -> &mut Self {
        let value = value.into();
        let slot = match key {
            "ior" => Some(&mut self.ior),
            "thickness" => Some(&mut self.thickness),
            "anisotropy" => Some(&mut self.anisotropy),
            "chromaticAberration" => Some(&mut self.chromatic_aberration),
            "scale" => {
                match value.as_number() {
                    Some(v) => self.scale = Some(v),
                    None => log::warn!("glass material: ignoring non-numeric scale {:?}", value),
                }
                return self;
            }
            _ => None,
        };
        match slot {
            Some(field) => match value.as_number() {
                Some(v) => *field = v,
                None => log::warn!("glass material: ignoring non-numeric {} {:?}", key, value),
            },
            None => {
                self.extra.insert(key.to_string(), value);
            }
        }
        self
    }

    pub fn with(mut self, key: &str, value: impl Into<MaterialValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Apply `overrides` in order; later entries win.
    pub fn merge<I, K, V>(mut self, overrides: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<MaterialValue>,
    {
        for (key, value) in overrides {
            self.set(key.as_ref(), value);
        }
        self
    }

    pub fn extra(&self, key: &str) -> Option<&MaterialValue> {
        self.extra.get(key)
    }

    fn extra_number(&self, key: &str, default: f32) -> f32 {
        self.extra(key).and_then(MaterialValue::as_number).unwrap_or(default)
    }

    fn extra_color(&self, key: &str, default: Color) -> Color {
        self.extra(key).and_then(MaterialValue::as_color).unwrap_or(default)
    }

    /// GPU-side parameter block for this material.
    pub fn uniforms(&self, viewport_size: [f32; 2]) -> GlassUniforms {
        let color = self.extra_color("color", Color::WHITE);
        let attenuation = self.extra_color("attenuationColor", Color::WHITE);
        GlassUniforms {
            viewport_size,
            ior: self.ior,
            thickness: self.thickness,
            anisotropy: self.anisotropy,
            chromatic_aberration: self.chromatic_aberration,
            transmission: self.extra_number("transmission", 1.0),
            roughness: self.extra_number("roughness", 0.0),
            color: [color.r, color.g, color.b, color.a],
            attenuation_color: [attenuation.r, attenuation.g, attenuation.b, attenuation.a],
            attenuation_distance: self.extra_number("attenuationDistance", f32::MAX),
            _pad: [0.0; 3],
        }
    }
}

/// Uniform block consumed by the transmission shader.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlassUniforms {
    /// Buffer size in physical pixels (width, height)
    pub viewport_size: [f32; 2],
    pub ior: f32,
    pub thickness: f32,
    pub anisotropy: f32,
    pub chromatic_aberration: f32,
    pub transmission: f32,
    pub roughness: f32,
    pub color: [f32; 4],
    pub attenuation_color: [f32; 4],
    pub attenuation_distance: f32,
    /// Padding for 16-byte alignment
    pub _pad: [f32; 3],
}
