//! Check command.
//!
//! Lists selected keys whose values are still plaintext. Exits non-zero
//! when any are found, for use as a pre-commit hook.

use serde::Serialize;

use crate::cli::{existing_files, output};
use crate::core::config::Config;
use crate::core::files::plaintext_secrets;
use crate::core::store::Filesystem;
use crate::error::{Error, Result};

#[derive(Serialize)]
struct FileFindings {
    path: String,
    keys: Vec<String>,
}

/// Check files for unencrypted secrets.
pub fn execute(files: Vec<String>, encrypt_keys: &[String], json: bool) -> Result<()> {
    let config = Config::load()?;
    let selector = config.encrypt_selector(encrypt_keys)?;
    let store = Filesystem;

    let mut findings = Vec::new();
    for path in existing_files(&store, &config.files_or(files)) {
        let keys = plaintext_secrets(&store, &path, &selector)?;
        if !keys.is_empty() {
            findings.push(FileFindings {
                path: path.display().to_string(),
                keys,
            });
        }
    }
    let count: usize = findings.iter().map(|f| f.keys.len()).sum();

    if json {
        let out =
            serde_json::to_string_pretty(&findings).map_err(|e| Error::Other(e.to_string()))?;
        println!("{}", out);
    } else if findings.is_empty() {
        output::success("all secrets encrypted");
    } else {
        for finding in &findings {
            println!("{}", output::path(&finding.path));
            for key in &finding.keys {
                output::list_item(&output::key(key));
            }
        }
    }

    if count > 0 {
        return Err(Error::Other(format!(
            "{} unencrypted secret{} found",
            count,
            if count == 1 { "" } else { "s" }
        )));
    }
    Ok(())
}
