//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

/// Variables the binary reads that must not leak in from the test runner.
const SCRUBBED_VARS: &[&str] = &[
    "CONFIG_ENCRYPTION_KEY",
    "CONFIG_DECRYPTION_KEY",
    "APP_ENV",
    "NODE_ENV",
    "DOTSEAL_LOG",
];

impl Test {
    /// Create a dotseal command running in the project directory.
    ///
    /// Key and environment-name variables from the parent are removed and
    /// colors are disabled.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("dotseal").expect("failed to find dotseal binary");
        for var in SCRUBBED_VARS {
            cmd.env_remove(var);
        }
        cmd.env("NO_COLOR", "1");
        cmd.current_dir(self.dir.path());
        cmd
    }

    /// Shortcut for `dotseal encrypt -k <key> [args]`.
    pub fn encrypt(&self, key: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["encrypt", "-k", key])
            .args(args)
            .output()
            .expect("failed to run dotseal encrypt")
    }

    /// Shortcut for `dotseal decrypt -k <key> [args]`.
    pub fn decrypt(&self, key: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["decrypt", "-k", key])
            .args(args)
            .output()
            .expect("failed to run dotseal decrypt")
    }

    /// Shortcut for `dotseal sh -k <key> [args]`.
    pub fn sh(&self, key: &str, args: &[&str]) -> Output {
        self.cmd()
            .args(["sh", "-k", key])
            .args(args)
            .output()
            .expect("failed to run dotseal sh")
    }

    /// Shortcut for `dotseal check [args]`.
    pub fn check(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("check")
            .args(args)
            .output()
            .expect("failed to run dotseal check")
    }

    /// Shortcut for `dotseal generate-keys [args]`.
    pub fn generate_keys(&self, args: &[&str]) -> Output {
        self.cmd()
            .arg("generate-keys")
            .args(args)
            .output()
            .expect("failed to run dotseal generate-keys")
    }
}
