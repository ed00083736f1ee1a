//! Run results storage: semicolon CSV plus a JSON run manifest.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use alb_project::SimulationConfig;

use crate::error::PipelineResult;
use crate::record::HourlyAlbedoRecord;

pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

const RESULTS_FILE: &str = "spectral_albedo.csv";
const MANIFEST_FILE: &str = "manifest.json";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Metadata describing one completed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunManifest {
    pub run_id: String,
    pub name: String,
    pub timestamp: String,
    pub hours: usize,
    /// UTC offset of the window's wall-clock hour stamps.
    pub utc_offset_h: i32,
    pub spectral_model: String,
    pub engine_version: String,
}

/// Content-based run identity: same configuration, same id.
pub fn compute_run_id(config: &SimulationConfig, engine_version: &str) -> String {
    let mut hasher = Sha256::new();
    let config_json = serde_json::to_string(config).unwrap_or_default();
    hasher.update(config_json.as_bytes());
    hasher.update(engine_version.as_bytes());
    let result = hasher.finalize();
    format!("{:x}", result)
}

/// Writes run results under a root directory.
#[derive(Clone)]
pub struct ResultsStore {
    root_dir: PathBuf,
}

impl ResultsStore {
    pub fn new(root_dir: PathBuf) -> PipelineResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn results_path(&self) -> PathBuf {
        self.root_dir.join(RESULTS_FILE)
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.root_dir.join(MANIFEST_FILE)
    }

    pub fn save_run(
        &self,
        manifest: &RunManifest,
        records: &[HourlyAlbedoRecord],
    ) -> PipelineResult<()> {
        let manifest_json = serde_json::to_string_pretty(manifest)?;
        fs::write(self.manifest_path(), manifest_json)?;
        fs::write(self.results_path(), render_results_csv(records))?;
        Ok(())
    }

    pub fn load_manifest(&self) -> PipelineResult<RunManifest> {
        let content = fs::read_to_string(self.manifest_path())?;
        let manifest = serde_json::from_str(&content)?;
        Ok(manifest)
    }
}

fn render_results_csv(records: &[HourlyAlbedoRecord]) -> String {
    let mut csv = String::from(
        "timestamp;albedo;R;H;vf_unshaded;vf_partial_left;vf_partial_mid;vf_partial_right;vf_shaded\n",
    );
    for record in records {
        csv.push_str(&format!(
            "{};{};{};{};{};{};{};{};{}\n",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.albedo,
            record.r,
            record.h,
            record.vf_unshaded,
            record.vf_partial_left,
            record.vf_partial_mid,
            record.vf_partial_right,
            record.vf_shaded,
        ));
    }
    csv
}

/// Extract the albedo column in record order, for the weather-file merge.
pub fn albedo_column(records: &[HourlyAlbedoRecord]) -> Vec<f64> {
    records.iter().map(|r| r.albedo).collect()
}
