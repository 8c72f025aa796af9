use std::path::{Path, PathBuf};

use crate::error::Result;

pub const STOCK_SHEET_FILE: &str = "Updated_Data.xls";
pub const CATALOG_FILE: &str = "Exported_Data.csv";
pub const CATALOG_OUTPUT_FILE: &str = "Exported_Data_Processed.csv";
pub const AUDIT_FILE: &str = "Updated_Data_Processed.xlsx";

/// Input and output locations for one reconciliation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPaths {
    pub stock_sheet: PathBuf,
    pub catalog: PathBuf,
    pub catalog_output: PathBuf,
    pub audit_copy: PathBuf,
}

impl SyncPaths {
    /// Joins the fixed file names onto `base`.
    pub fn in_dir(base: &Path) -> Self {
        Self {
            stock_sheet: base.join(STOCK_SHEET_FILE),
            catalog: base.join(CATALOG_FILE),
            catalog_output: base.join(CATALOG_OUTPUT_FILE),
            audit_copy: base.join(AUDIT_FILE),
        }
    }

    /// Uses the directory containing the running executable.
    pub fn beside_executable() -> Result<Self> {
        let executable = std::env::current_exe()?.canonicalize()?;
        let base = executable
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Ok(Self::in_dir(&base))
    }
}
