//! Generation run orchestration.
//! Discovers modules, renders every bound hook for every module into a fresh
//! registry, splices the host files and copies the remaining sources.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::generator::generate;
use crate::registry::HookRegistry;
use crate::signature::{HeaderPatternExtractor, Module, SignatureExtractor};
use crate::sources::{discover_modules, passthrough_sources};
use crate::splicer::HookSplicer;
use crate::template::Template;
use log::{debug, info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of one generation run.
#[derive(Debug, Default)]
pub struct RunReport {
    /// Modules that contributed code, in processing order
    pub modules: Vec<Module>,
    /// Module files without a recognizable function header
    pub skipped: Vec<PathBuf>,
    /// Spliced host files
    pub written: Vec<PathBuf>,
    /// Source files copied unchanged
    pub copied: Vec<PathBuf>,
}

pub struct Preprocessor<'a> {
    config: &'a Config,
    source_root: PathBuf,
    extractor: Box<dyn SignatureExtractor>,
}

impl<'a> Preprocessor<'a> {
    /// Creates a preprocessor for the tree at `source_root` using the
    /// regex header extractor for the configured return types.
    pub fn new<P: AsRef<Path>>(config: &'a Config, source_root: P) -> Result<Self> {
        let extractor = HeaderPatternExtractor::new(config.return_types.as_slice())?;
        Ok(Self::with_extractor(config, source_root, Box::new(extractor)))
    }

    pub fn with_extractor<P: AsRef<Path>>(
        config: &'a Config,
        source_root: P,
        extractor: Box<dyn SignatureExtractor>,
    ) -> Self {
        Self { config, source_root: source_root.as_ref().to_path_buf(), extractor }
    }

    pub fn template_root(&self) -> PathBuf {
        self.source_root.join(&self.config.template_root)
    }

    pub fn output_root(&self) -> PathBuf {
        self.source_root.join(&self.config.output_dir)
    }

    /// Loads every discovered module, separating those without a signature.
    pub fn load_modules(&self) -> Result<(Vec<Module>, Vec<PathBuf>)> {
        let paths = discover_modules(
            &self.source_root,
            &self.config.module_pattern,
            &self.output_root(),
        )?;

        let mut modules = Vec::with_capacity(paths.len());
        let mut skipped = Vec::new();
        for path in paths {
            let module = Module::load(&path, self.extractor.as_ref())?;
            if module.signature().is_valid() {
                modules.push(module);
            } else {
                warn!("{}", Error::SignatureNotFound { module: path.display().to_string() });
                skipped.push(path);
            }
        }
        Ok((modules, skipped))
    }

    /// Renders all bound hooks for `modules` into a new registry.
    ///
    /// Contributions are appended in module order, then host binding order,
    /// then hook order within a binding.
    pub fn generate(&self, modules: &[Module]) -> Result<HookRegistry> {
        let template_root = self.template_root();
        let mut registry = HookRegistry::new();

        for module in modules {
            for (host, hooks) in &self.config.hooks {
                for kind in hooks {
                    info!("{} -> {} -> {}", module.file_name(), host, kind);
                    let template = Template::new(&template_root, kind.name());
                    generate(
                        *kind,
                        &template,
                        module,
                        &self.config.conventions,
                        self.config.strict_placeholders,
                        &mut registry,
                    )?;
                }
            }
        }

        registry.dump();
        Ok(registry)
    }

    /// Splices every bound host file into the output directory.
    pub fn splice(&self, registry: &HookRegistry) -> Result<Vec<PathBuf>> {
        let output_root = self.output_root();
        self.config
            .hooks
            .keys()
            .map(|host| {
                HookSplicer::mirrored(&self.source_root, host, &output_root).write(registry)
            })
            .collect()
    }

    /// Copies the unbound source files into the output directory.
    pub fn copy_sources(&self) -> Result<Vec<PathBuf>> {
        let output_root = self.output_root();
        let hosts: Vec<&str> = self.config.hooks.keys().map(String::as_str).collect();
        let sources =
            passthrough_sources(&self.source_root, self.config.copy_patterns.as_slice(), &hosts)?;

        fs::create_dir_all(&output_root).map_err(|e| Error::FileIo {
            path: output_root.display().to_string(),
            source: e,
        })?;

        let mut copied = Vec::with_capacity(sources.len());
        for source in sources {
            let target = output_root.join(&source);
            debug!("Copying '{}' to '{}'", source.display(), target.display());
            fs::copy(self.source_root.join(&source), &target).map_err(|e| Error::FileIo {
                path: target.display().to_string(),
                source: e,
            })?;
            copied.push(target);
        }
        Ok(copied)
    }

    /// Performs one full generation run.
    ///
    /// # Flow
    /// 1. Discovers and loads modules, skipping those without a signature
    /// 2. Renders every bound hook for every module into a fresh registry
    /// 3. Splices the host files
    /// 4. Copies the remaining source files
    pub fn run(&self) -> Result<RunReport> {
        let (modules, skipped) = self.load_modules()?;
        let registry = self.generate(&modules)?;
        let written = self.splice(&registry)?;
        let copied = self.copy_sources()?;
        Ok(RunReport { modules, skipped, written, copied })
    }
}
