#![allow(dead_code)]

pub mod fixtures;

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use blog_content::{ContentRenderer, RenderConfig};
use fixtures::{CDN_URL, LEGACY_HOSTS, RENDER_CONFIG};

pub fn test_config() -> RenderConfig {
    let mut config = RenderConfig::default();
    config.cdn.url = Some(CDN_URL.to_string());
    config.cdn.legacy_hosts = LEGACY_HOSTS.iter().map(|host| host.to_string()).collect();
    config
}

pub fn test_renderer() -> ContentRenderer {
    ContentRenderer::new(&test_config())
}

pub struct TestEnvironment {
    pub temp_dir: TempDir,
    pub root: PathBuf,
}

impl TestEnvironment {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root = temp_dir.path().to_path_buf();

        let env = Self { temp_dir, root };
        env.write_file("render.yaml", RENDER_CONFIG);
        env
    }

    pub fn write_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(full_path, content).expect("Failed to write file");
    }

    pub fn path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }

    pub fn run(&self, args: &[&str]) -> std::process::Output {
        Command::cargo_bin("blog-content")
            .expect("Failed to find blog-content binary")
            .current_dir(&self.root)
            .args(args)
            .output()
            .expect("Failed to execute blog-content")
    }
}

pub fn assert_success(output: &std::process::Output) {
    if !output.status.success() {
        eprintln!("STDOUT: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("STDERR: {}", String::from_utf8_lossy(&output.stderr));
        panic!("Command failed with status: {:?}", output.status);
    }
}

pub fn assert_failure(output: &std::process::Output) {
    assert!(
        !output.status.success(),
        "Expected command to fail but it succeeded"
    );
}

pub fn stdout_contains(output: &std::process::Output, text: &str) -> bool {
    String::from_utf8_lossy(&output.stdout).contains(text)
}

pub fn stderr_contains(output: &std::process::Output, text: &str) -> bool {
    String::from_utf8_lossy(&output.stderr).contains(text)
}

pub fn stdout_json(output: &std::process::Output) -> serde_json::Value {
    serde_json::from_slice(&output.stdout).expect("Failed to parse stdout as JSON")
}
