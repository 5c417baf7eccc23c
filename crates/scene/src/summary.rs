/// Read-only snapshot of scene statistics for logs and the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneSummary {
    pub frame: u64,
    pub elapsed: f64,
    pub objects: usize,
    pub active_objects: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub colliders: usize,
    pub materials: usize,
    pub diagnostics: usize,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: frame={} elapsed={:.2}s objects={} (active={}) vertices={} triangles={} colliders={} materials={} diagnostics={}",
            self.frame,
            self.elapsed,
            self.objects,
            self.active_objects,
            self.vertices,
            self.triangles,
            self.colliders,
            self.materials,
            self.diagnostics,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_counts() {
        let s = SceneSummary {
            frame: 3,
            elapsed: 0.05,
            objects: 2,
            active_objects: 2,
            vertices: 10,
            triangles: 4,
            colliders: 1,
            materials: 2,
            diagnostics: 0,
        };
        let text = s.to_string();
        assert!(text.contains("frame=3"));
        assert!(text.contains("triangles=4"));
    }
}
