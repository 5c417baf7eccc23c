/// A non-fatal problem noticed while running a frame.
///
/// Produced when an optional collaborator (material, target, collider) is
/// absent. The affected feature is skipped; the frame continues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub source: &'static str,
    pub message: String,
}

/// Append-only diagnostic log. Every entry is also emitted as a `tracing` warning.
#[derive(Debug, Clone, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, source: &'static str, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(source, "{message}");
        self.entries.push(Diagnostic { source, message });
    }

    pub fn entries(&self) -> &[Diagnostic] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drain and return all recorded diagnostics.
    pub fn drain(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_and_drain() {
        let mut d = Diagnostics::new();
        d.record("light", "no materials assigned");
        d.record("camera", "orbit target missing");
        assert_eq!(d.len(), 2);
        assert_eq!(d.entries()[0].source, "light");

        let drained = d.drain();
        assert_eq!(drained.len(), 2);
        assert!(d.is_empty());
    }
}
