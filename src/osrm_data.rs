//! OSRM dataset preparation helpers (download + preprocess per travel profile).
//!
//! A single `osrm-routed` instance serves one profile, so each profile gets
//! its own processed copy of the extract.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::info;

use crate::profile::TravelProfile;

#[derive(Debug, Clone)]
pub struct GeofabrikRegion {
    /// Geofabrik region path, e.g. "europe/monaco".
    pub path: String,
}

impl GeofabrikRegion {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn name(&self) -> String {
        self.path
            .rsplit('/')
            .next()
            .filter(|name| !name.is_empty())
            .unwrap_or("region")
            .to_string()
    }

    pub fn url(&self) -> String {
        format!("https://download.geofabrik.de/{}-latest.osm.pbf", self.path)
    }
}

#[derive(Debug, Clone)]
pub struct OsrmDatasetConfig {
    pub region: GeofabrikRegion,
    pub data_root: PathBuf,
    pub profile: TravelProfile,
}

impl OsrmDatasetConfig {
    pub fn new(region: GeofabrikRegion, data_root: impl Into<PathBuf>, profile: TravelProfile) -> Self {
        Self {
            region,
            data_root: data_root.into(),
            profile,
        }
    }

    /// Lua profile shipped in the `osrm/osrm-backend` image.
    fn lua_profile(&self) -> &'static str {
        match self.profile {
            TravelProfile::Walking => "/opt/foot.lua",
            TravelProfile::Cycling => "/opt/bicycle.lua",
            TravelProfile::Driving => "/opt/car.lua",
        }
    }
}

#[derive(Debug, Clone)]
pub struct OsrmDataset {
    /// Directory to mount at `/data` when running `osrm-routed`.
    pub data_dir: PathBuf,
    pub osrm_base: PathBuf,
    pub pbf_path: PathBuf,
}

impl OsrmDataset {
    /// File name of the processed graph inside `data_dir`.
    pub fn osrm_file_name(&self) -> String {
        file_name(&self.osrm_base)
    }
}

#[derive(Debug, Error)]
pub enum OsrmDataError {
    #[error("dataset I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("extract download failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("preprocessing failed: {0}")]
    ProcessFailure(String),
}

impl OsrmDataset {
    /// Download and preprocess the extract unless the outputs already exist.
    pub fn ensure(config: &OsrmDatasetConfig) -> Result<Self, OsrmDataError> {
        let region_name = config.region.name();
        let data_root = if config.data_root.is_absolute() {
            config.data_root.clone()
        } else {
            std::env::current_dir()?.join(&config.data_root)
        };
        let data_dir = data_root.join(&region_name).join(config.profile.token());
        fs::create_dir_all(&data_dir)?;

        let pbf_path = data_dir.join(format!("{}-latest.osm.pbf", region_name));
        if !pbf_path.exists() {
            info!(url = %config.region.url(), "downloading extract");
            download_pbf(&config.region.url(), &pbf_path)?;
        }

        let osrm_base = data_dir.join(format!("{}-latest.osrm", region_name));
        if !osrm_base.exists() {
            info!(profile = config.profile.token(), "running osrm-extract");
            run_docker(
                &[
                    "osrm-extract",
                    "-p",
                    config.lua_profile(),
                    &format!("/data/{}", file_name(&pbf_path)),
                ],
                &data_dir,
            )?;
        }

        if !mld_ready(&osrm_base) {
            let target = format!("/data/{}", file_name(&osrm_base));
            run_docker(&["osrm-partition", &target], &data_dir)?;
            run_docker(&["osrm-customize", &target], &data_dir)?;
        }

        Ok(Self {
            data_dir,
            osrm_base,
            pbf_path,
        })
    }
}

fn download_pbf(url: &str, dest: &Path) -> Result<(), OsrmDataError> {
    let response = reqwest::blocking::get(url)?.error_for_status()?;
    let tmp_path = dest.with_extension("tmp");
    let mut writer = BufWriter::new(File::create(&tmp_path)?);
    let bytes = response.bytes()?;
    writer.write_all(&bytes)?;
    writer.flush()?;
    fs::rename(tmp_path, dest)?;
    Ok(())
}

fn mld_ready(osrm_base: &Path) -> bool {
    ["osrm.partition", "osrm.mldgr", "osrm.cells"]
        .iter()
        .all(|ext| osrm_base.with_extension(ext).exists())
        && osrm_base.exists()
}

fn run_docker(args: &[&str], data_dir: &Path) -> Result<(), OsrmDataError> {
    let status = Command::new("docker")
        .arg("run")
        .arg("--rm")
        .arg("-t")
        .arg("-v")
        .arg(format!("{}:/data", data_dir.display()))
        .arg("osrm/osrm-backend")
        .args(args)
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(OsrmDataError::ProcessFailure(format!(
            "docker {} exited with status {}",
            args.first().copied().unwrap_or_default(),
            status
        )))
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|name| name.to_str())
        .unwrap_or_default()
        .to_string()
}
