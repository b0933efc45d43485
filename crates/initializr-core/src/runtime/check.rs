//! Java runtime detection

use std::process::Command;

/// Runtime detection result
#[derive(Debug, Clone)]
pub struct RuntimeInfo {
    pub name: &'static str,
    pub version: Option<String>,
    pub available: bool,
}

/// Check if a Java runtime is available
pub fn check_java() -> RuntimeInfo {
    // `java -version` reports on stderr
    let output = Command::new("java").arg("-version").output();

    match output {
        Ok(out) if out.status.success() => {
            let text = String::from_utf8_lossy(&out.stderr);
            RuntimeInfo {
                name: "Java",
                version: parse_java_version(&text),
                available: true,
            }
        }
        _ => RuntimeInfo {
            name: "Java",
            version: None,
            available: false,
        },
    }
}

/// Extract the quoted version from `java -version` output
pub fn parse_java_version(output: &str) -> Option<String> {
    let first = output.lines().next()?;
    let start = first.find('"')? + 1;
    let end = start + first[start..].find('"')?;
    Some(first[start..end].to_string())
}
