//! Load configuration from files.
use std::fs::File;
use std::path::Path;

use anyhow::Context;
use anyhow::Result;

use crate::Conf;

/// Errors handling dataset administration configuration.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unable to decode configuration from file at the given path.
    #[error("unable to decode configuration from file at '{0}'")]
    // (path,)
    Decode(String),

    /// Unable to read configuration file at the given path.
    #[error("unable to read configuration file at '{0}'")]
    // (path,)
    Open(String),

    /// Configuration file not found at the given path.
    #[error("configuration file not found at '{0}'")]
    // (path,)
    PathNotFound(String),
}

/// Load process configuration from the specified path.
pub fn load<P>(path: P) -> Result<Conf>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let display = path.display().to_string();
    if !path.exists() {
        anyhow::bail!(Error::PathNotFound(display));
    }

    let file = File::open(path).with_context(|| Error::Open(display.clone()))?;
    let conf = serde_yaml::from_reader(file).with_context(|| Error::Decode(display))?;
    Ok(conf)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Error;

    #[test]
    fn load_example_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../datasetctl.example.yaml");
        let conf = super::load(path).unwrap();
        assert!(conf.discovery.services.contains_key("dataset.executor"));
    }

    #[test]
    fn load_invalid_file() {
        let path = std::env::temp_dir().join(format!(
            "replicore-conf-invalid-{}.yaml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(b"logging:\n  level: [not, a, level]\n").unwrap();
        drop(file);

        let error = super::load(&path).unwrap_err();
        std::fs::remove_file(&path).unwrap();
        let error = error.downcast_ref::<Error>().unwrap();
        assert!(matches!(error, Error::Decode(_)));
    }

    #[test]
    fn load_missing_file() {
        let error = super::load("/this/path/does/not/exist.yaml").unwrap_err();
        let error = error.downcast_ref::<Error>().unwrap();
        match error {
            Error::PathNotFound(path) => assert_eq!(path, "/this/path/does/not/exist.yaml"),
            error => panic!("unexpected error: {:?}", error),
        }
    }
}
