//! Download request derived from the collected answers

use crate::answers::Answers;
use crate::prompts::{EXTRACT_KEY, FORMAT_BUILD, FORMAT_KEY, FORMAT_PROJECT, TOOLCHAIN_KEY};
use std::fmt;
use std::str::FromStr;

/// Build tool of the generated project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Toolchain {
    Gradle,
    Maven,
}

impl Toolchain {
    pub fn display_name(&self) -> &'static str {
        match self {
            Toolchain::Gradle => "Gradle",
            Toolchain::Maven => "Maven",
        }
    }

    /// Wrapper script shipped in generated projects
    pub fn wrapper(&self) -> &'static str {
        match self {
            Toolchain::Gradle => "gradlew",
            Toolchain::Maven => "mvnw",
        }
    }

    /// Goal run after extraction
    pub fn build_goal(&self) -> &'static str {
        match self {
            Toolchain::Gradle => "build",
            Toolchain::Maven => "package",
        }
    }

    /// Goal that starts the application
    pub fn run_goal(&self) -> &'static str {
        match self {
            Toolchain::Gradle => "bootRun",
            Toolchain::Maven => "spring-boot:run",
        }
    }
}

impl fmt::Display for Toolchain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Toolchain {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gradle" => Ok(Toolchain::Gradle),
            "maven" => Ok(Toolchain::Maven),
            other => Err(RequestError::Invalid {
                key: TOOLCHAIN_KEY,
                value: other.to_string(),
            }),
        }
    }
}

/// What the service should produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Complete project archive
    Project,
    /// Only the build descriptor
    Build,
}

impl FromStr for Format {
    type Err = RequestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            FORMAT_PROJECT => Ok(Format::Project),
            FORMAT_BUILD => Ok(Format::Build),
            other => Err(RequestError::Invalid {
                key: FORMAT_KEY,
                value: other.to_string(),
            }),
        }
    }
}

/// One of the four download endpoints of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    /// Path segment below the service root
    pub path: &'static str,
    /// Value of the `type` query parameter
    pub project_type: &'static str,
}

impl Endpoint {
    pub fn select(toolchain: Toolchain, format: Format) -> Self {
        match (toolchain, format) {
            (Toolchain::Gradle, Format::Build) => Self {
                path: "build.gradle",
                project_type: "gradle-build",
            },
            (Toolchain::Gradle, Format::Project) => Self {
                path: "starter.zip",
                project_type: "gradle-project",
            },
            (Toolchain::Maven, Format::Build) => Self {
                path: "pom.xml",
                project_type: "maven-build",
            },
            (Toolchain::Maven, Format::Project) => Self {
                path: "starter.zip",
                project_type: "maven-project",
            },
        }
    }
}

/// Where the response body goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    /// Save the archive as a file
    Archive { file_name: String },
    /// Unpack the archive into the project directory
    Extract,
    /// Save the build descriptor as a file
    Descriptor { file_name: String },
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("no `{0}` answer was given")]
    Missing(&'static str),

    #[error("`{value}` is not a valid {key}")]
    Invalid { key: &'static str, value: String },
}

/// Everything needed to download one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectRequest {
    pub toolchain: Toolchain,
    pub format: Format,
    pub extract: bool,
    /// Project name, used for the archive file name
    pub name: String,
    /// Query parameters forwarded to the service
    pub params: Vec<(String, String)>,
}

impl ProjectRequest {
    pub fn from_answers(answers: &Answers) -> Result<Self, RequestError> {
        let toolchain: Toolchain = answers
            .text(TOOLCHAIN_KEY)
            .ok_or(RequestError::Missing(TOOLCHAIN_KEY))?
            .parse()?;
        let format: Format = answers
            .text(FORMAT_KEY)
            .ok_or(RequestError::Missing(FORMAT_KEY))?
            .parse()?;
        let extract = format == Format::Project && answers.flag(EXTRACT_KEY).unwrap_or(false);

        let name = answers
            .text("name")
            .or_else(|| answers.text("artifactId"))
            .unwrap_or("demo")
            .replace(['/', '\\'], "-");

        let params = answers
            .iter()
            .filter(|(key, _)| ![TOOLCHAIN_KEY, FORMAT_KEY, EXTRACT_KEY].contains(key))
            .map(|(key, value)| (key.to_string(), value.to_param()))
            .collect();

        Ok(Self {
            toolchain,
            format,
            extract,
            name,
            params,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        Endpoint::select(self.toolchain, self.format)
    }

    pub fn output(&self) -> Output {
        match self.format {
            Format::Project if self.extract => Output::Extract,
            Format::Project => Output::Archive {
                file_name: format!("{}.zip", self.name),
            },
            Format::Build => Output::Descriptor {
                file_name: self.endpoint().path.to_string(),
            },
        }
    }
}
