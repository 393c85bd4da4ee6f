//! Isolated project directory for running the compdoc binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Result of running a compdoc command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: tempfile::tempdir().expect("Failed to create temp dir"),
        }
    }

    /// Get path relative to project root
    pub fn path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    /// Write a file relative to the project root, creating parents
    pub fn write(&self, relative: &str, content: &str) {
        let path = self.path(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent dir");
        }
        fs::write(path, content).expect("Failed to write file");
    }

    /// `src/components/<name>/<name>.js`
    pub fn add_component(&self, name: &str, source: &str) {
        self.write(&format!("src/components/{name}/{name}.js"), source);
    }

    /// `src/docs/examples/<component>/<example>.js`
    pub fn add_example(&self, component: &str, example: &str, source: &str) {
        self.write(
            &format!("src/docs/examples/{component}/{example}.js"),
            source,
        );
    }

    /// Run compdoc from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_with_env(args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = compdoc_command(self.project_root.path());
        cmd.args(args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }
        let output = cmd.output().expect("Failed to execute compdoc");
        to_result(output)
    }

    pub fn read(&self, relative: &str) -> Option<String> {
        fs::read_to_string(self.path(relative)).ok()
    }

    /// Parse the generated module at `relative` into JSON
    pub fn read_module(&self, relative: &str) -> serde_json::Value {
        let content = self.read(relative).expect("output file missing");
        parse_module(&content)
    }
}

/// Command for the compdoc binary with a clean environment
pub fn compdoc_command(cwd: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_compdoc"));
    cmd.current_dir(cwd)
        .env("NO_COLOR", "1")
        .env_remove("COMPDOC_COMPONENTS")
        .env_remove("COMPDOC_EXAMPLES")
        .env_remove("COMPDOC_OUTPUT")
        .env_remove("COMPDOC_EXTENSION");
    cmd
}

/// Strip the `module.exports = ` prefix and parse the JSON document
pub fn parse_module(content: &str) -> serde_json::Value {
    let json = content
        .strip_prefix("module.exports = ")
        .expect("missing module.exports prefix");
    serde_json::from_str(json).expect("output is not valid JSON")
}

fn to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}
