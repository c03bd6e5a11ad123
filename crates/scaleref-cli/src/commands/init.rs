use std::path::Path;

use anyhow::bail;
use scaleref_core::ScalerefConfig;

pub fn run(path: &Path, namespace: Option<&str>) -> anyhow::Result<()> {
    if path.exists() {
        bail!("{} already exists", path.display());
    }

    let config = ScalerefConfig::scaffold(namespace);
    std::fs::write(path, config.to_toml_string()?)?;
    println!("✓ Generated {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaleref.toml");

        run(&path, Some("prod")).unwrap();

        let config = ScalerefConfig::from_file(&path).unwrap();
        assert_eq!(config.analyzer.namespace.as_deref(), Some("prod"));
        assert_eq!(config.output_format(), "text");
    }

    #[test]
    fn refuses_to_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scaleref.toml");
        std::fs::write(&path, "").unwrap();

        assert!(run(&path, None).is_err());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }
}
