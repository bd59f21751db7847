//! Where image bytes come from and where they go.
//!
//! The `--in` argument accepts:
//!
//! | Form | Source |
//! |---|---|
//! | `-` | standard input |
//! | `http://…`, `https://…` | fetched with a blocking HTTP client |
//! | `file:///…` | local file named by the URL path |
//! | anything else without a scheme | local file path |
//!
//! `--out` is either `-` for standard output or a file path.

use reqwest::Url;
use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unsupported URL scheme {0}")]
    UnsupportedScheme(String),
    #[error("Cannot map URL to a local path: {0}")]
    InvalidFileUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    File(PathBuf),
    Remote(Url),
}

impl InputSource {
    pub fn parse(arg: &str) -> Result<Self, InputError> {
        if arg == "-" {
            return Ok(InputSource::Stdin);
        }
        let Ok(url) = Url::parse(arg) else {
            // Relative paths and bare names are not URLs
            return Ok(InputSource::File(PathBuf::from(arg)));
        };
        match url.scheme() {
            "http" | "https" => Ok(InputSource::Remote(url)),
            "file" => url
                .to_file_path()
                .map(InputSource::File)
                .map_err(|()| InputError::InvalidFileUrl(arg.to_string())),
            // `C:\photos\a.png` parses with scheme "c"
            scheme if scheme.len() == 1 => Ok(InputSource::File(PathBuf::from(arg))),
            scheme => Err(InputError::UnsupportedScheme(scheme.to_string())),
        }
    }

    /// Read the whole input into memory.
    pub fn read_all(&self) -> Result<Vec<u8>, InputError> {
        match self {
            InputSource::Stdin => {
                let mut bytes = Vec::new();
                std::io::stdin().lock().read_to_end(&mut bytes)?;
                Ok(bytes)
            }
            InputSource::File(path) => Ok(fs::read(path)?),
            InputSource::Remote(url) => {
                tracing::debug!(url = %url, "fetching remote input");
                let client = reqwest::blocking::Client::builder()
                    .timeout(FETCH_TIMEOUT)
                    .build()?;
                let response = client.get(url.clone()).send()?.error_for_status()?;
                Ok(response.bytes()?.to_vec())
            }
        }
    }

    /// Human-readable description for log lines.
    pub fn describe(&self) -> String {
        match self {
            InputSource::Stdin => "stdin".to_string(),
            InputSource::File(path) => path.display().to_string(),
            InputSource::Remote(url) => url.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl OutputTarget {
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            OutputTarget::Stdout
        } else {
            OutputTarget::File(PathBuf::from(arg))
        }
    }

    /// Write `bytes`, creating or truncating the target file.
    pub fn write_all(&self, bytes: &[u8]) -> Result<(), InputError> {
        match self {
            OutputTarget::Stdout => {
                let mut stdout = std::io::stdout().lock();
                stdout.write_all(bytes)?;
                stdout.flush()?;
            }
            OutputTarget::File(path) => fs::write(path, bytes)?,
        }
        Ok(())
    }
}
