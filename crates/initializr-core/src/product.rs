//! Product configuration trait for CLI binaries
//!
//! A binary implements this trait to point the generator at a service and
//! to name the files it leaves behind.

/// Configuration trait for a project generator CLI
///
/// Each implementation defines:
/// - Product identity (name, display name)
/// - Initializr service URL and its override variable
/// - Where answers are persisted
/// - Documentation links
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Default root URL of the Initializr service
    fn default_service_url(&self) -> &'static str;

    /// Environment variable name for overriding the service URL
    fn service_url_env(&self) -> &'static str;

    /// File (relative to the project directory) holding previous answers
    fn settings_file(&self) -> &'static str;

    /// URL for product documentation
    fn docs_url(&self) -> &'static str;

    /// CLI description shown in help text
    fn cli_description(&self) -> &'static str;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
