use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use solace_services::environment::MapEnvironment;
use solace_services::locator::{ManifestLocator, MANIFEST_FILE_NAME};
use solace_services::SolaceCredentialsLoader;
use tempfile::TempDir;

#[allow(dead_code)]
pub fn temp_manifest_dir(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let manifest_path = temp_dir.path().join(MANIFEST_FILE_NAME);
    fs::write(&manifest_path, contents).expect("failed to write manifest file");
    (temp_dir, manifest_path)
}

/// Loader whose only manifest is a `.solaceservices` file in a temporary home
/// directory. The directory must outlive the loader.
#[allow(dead_code)]
pub fn file_loader(contents: &str) -> (SolaceCredentialsLoader, TempDir) {
    let (dir, _) = temp_manifest_dir(contents);
    let env = MapEnvironment::new().with_home_dir(dir.path());
    let loader = SolaceCredentialsLoader::with_locator(
        ManifestLocator::new().with_environment(Arc::new(env)),
    );
    (loader, dir)
}
