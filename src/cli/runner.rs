use crate::{
    catalog::Catalog,
    cli::Args,
    config::GeneratorConfig,
    error::Result,
    generator::{GeneratedFiles, GenerationRequest, Generator},
    ioutils::{get_output_dir, output_path, read_version_map, write_file},
    loader::{ensure_template_root, load_fragments, load_template_tree},
};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

/// Main CLI runner that orchestrates the project generation workflow
pub struct Runner {
    args: Args,
}

impl Runner {
    pub fn new(args: Args) -> Self {
        Self { args }
    }

    /// Executes the complete generation workflow
    pub fn run(self) -> Result<()> {
        let template_root = self.args.template_dir.as_path();
        ensure_template_root(template_root)?;

        let output_root = get_output_dir(&self.args.output_dir, self.args.force)?;

        let config = GeneratorConfig::load(template_root)?;
        let catalog = self.load_catalog()?;
        let request = self.build_request()?;

        let template_tree = load_template_tree(template_root, &config)?;
        let fragments = load_fragments(template_root, &config)?;

        let generator = Generator::new(config, catalog)?;
        let files = generator.generate(&request, &template_tree, &fragments)?;

        self.write_files(&output_root, &files)?;

        if self.args.dry_run {
            println!("[DRY RUN] {} files would be generated in {}.", files.len(), output_root.display());
        } else {
            println!("Project generation completed successfully in {}.", output_root.display());
        }
        Ok(())
    }

    /// Loads the library catalog, or an empty one when none was given
    fn load_catalog(&self) -> Result<Catalog> {
        let Some(path) = &self.args.catalog else {
            if !self.args.libraries.is_empty() {
                warn!("No catalog given, every selected library will be ignored");
            }
            return Ok(Catalog::default());
        };

        let catalog = Catalog::from_json(&std::fs::read_to_string(path)?)?;
        catalog.validate()?;
        debug!("Loaded {} libraries from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Assembles the generation request from the arguments
    fn build_request(&self) -> Result<GenerationRequest> {
        let library_versions = match &self.args.versions {
            Some(path) => read_version_map(path)?,
            None => HashMap::new(),
        };

        let mut request = GenerationRequest::new(&self.args.name, &self.args.package)
            .with_libraries(self.args.libraries.iter().cloned())
            .with_profiles(self.args.profiles.iter().cloned())
            .with_library_versions(library_versions);
        if let Some(version) = &self.args.jme_version {
            request = request.with_jme_version(version);
        }
        Ok(request)
    }

    /// Writes generated files below the output root
    fn write_files(&self, output_root: &Path, files: &GeneratedFiles) -> Result<()> {
        for (path, content) in files {
            let target = output_path(output_root, path)?;
            if self.args.dry_run {
                info!("[DRY RUN] Writing '{}'", target.display());
                continue;
            }
            info!("Writing '{}'", target.display());
            write_file(content, &target)?;
        }
        Ok(())
    }
}

/// Main entry point for CLI execution
pub fn run(args: Args) -> Result<()> {
    let runner = Runner::new(args);
    runner.run()
}
