use std::path::PathBuf;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn fixture_vehicles_path() -> PathBuf {
    fixtures_dir().join("vehicles.json")
}
