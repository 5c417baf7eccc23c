use archscape_common::Color;
use archscape_scene::{MaterialId, Scene, UniformValue};

/// Uniform receiving an object's base color.
pub const OBJECT_COLOR: &str = "_ObjectColor";

/// Keeps one material's `_ObjectColor` in sync with a configured color.
#[derive(Debug, Clone)]
pub struct ColorController {
    label: &'static str,
    material: Option<MaterialId>,
    color: Color,
}

impl ColorController {
    pub fn new(label: &'static str, material: Option<MaterialId>, color: Color) -> Self {
        Self {
            label,
            material,
            color,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Write the initial color. A missing material is recorded and skipped.
    pub fn start(&self, scene: &mut Scene) {
        match self.material {
            Some(_) => self.write(scene),
            None => scene
                .diagnostics_mut()
                .record(self.label, "material not assigned"),
        }
    }

    pub fn set_color(&mut self, scene: &mut Scene, color: Color) {
        self.color = color;
        self.write(scene);
    }

    fn write(&self, scene: &mut Scene) {
        let Some(material) = self.material else {
            return;
        };
        if let Err(e) = scene.set_uniform(material, OBJECT_COLOR, UniformValue::Color(self.color)) {
            scene.diagnostics_mut().record(self.label, e.to_string());
        }
    }
}
