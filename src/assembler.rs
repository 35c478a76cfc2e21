use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::config::AssemblerConfig;
use crate::discovery::discover_manifests;
use crate::error::{AssembleError, Result};
use crate::inject::{inject_namespace, is_eligible};
use crate::models::{ManifestRef, ManifestText, OutputDocument};

/// What a completed run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblySummary {
    pub output_file: PathBuf,
    pub manifests: usize,
    pub injected_lines: usize,
    pub bytes: usize,
    /// False for dry runs.
    pub written: bool,
}

/// Builds the combined setup document from a deploy directory.
#[derive(Debug, Clone)]
pub struct Assembler {
    config: AssemblerConfig,
}

impl Assembler {
    pub fn new(config: AssemblerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AssemblerConfig {
        &self.config
    }

    /// Namespace manifest first, then everything under the deploy directory.
    pub fn manifest_sequence(&self) -> Result<Vec<ManifestRef>> {
        let discovered =
            discover_manifests(&self.config.deploy_dir, self.config.sort_discovered)?;

        let mut sequence = Vec::with_capacity(discovered.len() + 1);
        sequence.push(ManifestRef::namespace(self.config.namespace_file.clone()));
        sequence.extend(discovered);
        Ok(sequence)
    }

    /// Read and inject every manifest. Nothing is written.
    pub fn assemble(&self) -> Result<OutputDocument> {
        let sequence = self.manifest_sequence()?;
        let manifests = sequence
            .into_iter()
            .map(|manifest| self.process(manifest))
            .collect::<Result<Vec<_>>>()?;

        Ok(OutputDocument::new(manifests))
    }

    /// Assemble and write the document in a single write.
    pub fn run(&self) -> Result<AssemblySummary> {
        self.execute(false)
    }

    /// Assemble without touching the output file.
    pub fn dry_run(&self) -> Result<AssemblySummary> {
        self.execute(true)
    }

    fn execute(&self, dry_run: bool) -> Result<AssemblySummary> {
        let document = self.assemble()?;
        let output = document.render();
        let output_file = self.config.output_file.clone();

        if dry_run {
            info!(
                "Dry run: would write {} bytes to {:?}",
                output.len(),
                output_file
            );
        } else {
            fs::write(&output_file, &output).map_err(|source| AssembleError::WriteOutput {
                path: output_file.clone(),
                source,
            })?;
            info!("Wrote {} bytes to {:?}", output.len(), output_file);
        }

        Ok(AssemblySummary {
            output_file,
            manifests: document.manifests.len(),
            injected_lines: document.injected_lines(),
            bytes: output.len(),
            written: !dry_run,
        })
    }

    fn process(&self, manifest: ManifestRef) -> Result<ManifestText> {
        let text = read_manifest(&manifest)?;

        if !is_eligible(&manifest, &self.config.cluster_prefix) {
            debug!("Leaving {:?} unchanged", manifest.path);
            return Ok(ManifestText {
                source: manifest,
                text,
                injected: 0,
            });
        }

        let (text, injected) = inject_namespace(&text, &self.config.namespace);
        debug!(
            "Injected {} namespace lines into {:?}",
            injected, manifest.path
        );
        Ok(ManifestText {
            source: manifest,
            text,
            injected,
        })
    }
}

fn read_manifest(manifest: &ManifestRef) -> Result<String> {
    fs::read_to_string(&manifest.path).map_err(|source| {
        if manifest.is_namespace() && source.kind() == ErrorKind::NotFound {
            AssembleError::NamespaceManifestNotFound(manifest.path.clone())
        } else {
            AssembleError::ReadManifest {
                path: manifest.path.clone(),
                source,
            }
        }
    })
}
