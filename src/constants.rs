//! Constants used throughout the initializer

/// Configuration file names in order of preference
pub const CONFIG_FILENAMES: &[&str] =
    &["initializer.json", "initializer.yaml", "initializer.yml"];

/// Default template file suffix, stripped from output paths
pub const DEFAULT_TEMPLATE_SUFFIX: &str = ".jmetemplate";

/// Default glob patterns for files copied without any merging
pub const DEFAULT_BLOB_PATTERNS: &[&str] = &["**/*.jar"];

/// Default core platform version
pub const DEFAULT_JME_VERSION: &str = "3.6.1-stable";

/// Default directory (relative to the bundle root) holding fragment files
pub const DEFAULT_FRAGMENTS_DIR: &str = "fragments";

/// Class name used when the game name has no usable characters
pub const FALLBACK_CLASS_NAME: &str = "MyGame";

/// Repositories every generated build declares
pub const DEFAULT_REPOSITORIES: &[&str] = &["mavenCentral()", "mavenLocal()"];

/// Gradle property holding the pinned core platform version
pub const JME_VERSION_PROPERTY: &str = "jmonkeyengineVersion";

/// Directive syntax embedded in template paths and contents
pub mod directives {
    /// Path token that becomes a literal `.` in output paths
    pub const DOT: &str = "[DOT]";
    /// Alternate spelling of the OR operator, usable in file paths
    pub const OR_ALIAS: &str = "_OR_";
    pub const OR: char = '|';
}

/// Deployment platform keys used as specialization tags
pub mod platforms {
    pub const JME_DESKTOP: &str = "JME_DESKTOP";
    pub const JME_VR: &str = "JME_VR";
    pub const JME_ANDROID: &str = "JME_ANDROID";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
