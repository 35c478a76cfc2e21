use super::ManifestText;

/// Placed between every pair of adjacent manifests in the output.
pub const SEPARATOR: &str = "\n---\n\n";

/// The combined setup document, fully materialized before it is written.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputDocument {
    pub manifests: Vec<ManifestText>,
}

impl OutputDocument {
    pub fn new(manifests: Vec<ManifestText>) -> Self {
        Self { manifests }
    }

    /// Total namespace lines injected across all manifests.
    pub fn injected_lines(&self) -> usize {
        self.manifests.iter().map(|m| m.injected).sum()
    }

    /// Join every manifest with [`SEPARATOR`].
    pub fn render(&self) -> String {
        let texts: Vec<&str> = self.manifests.iter().map(|m| m.text.as_str()).collect();
        texts.join(SEPARATOR)
    }
}
