use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to parse glob pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Failed to walk the template directory. Original error: {0}")]
    WalkdirError(#[from] walkdir::Error),

    /// A `[FRAGMENT=name]` directive names a fragment the lookup cannot supply.
    #[error("Missing fragment '{name}'.")]
    FragmentNotFound { name: String },

    /// A fragment (directly or transitively) references itself.
    #[error("Fragment cycle detected: {chain}.")]
    FragmentCycle { chain: String },

    /// An exclusive category declares more than one default library.
    #[error("Category '{category}' has more than one default library.")]
    MultipleDefaults { category: String },

    #[error("Configuration error: {0}.")]
    ConfigValidation(String),

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Cannot process the source path: '{source_path}'. Original error: {e}")]
    ProcessError { source_path: String, e: String },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
