//! Build-tree locations
//!
//! One invocation operates on a single build output directory and project
//! directory. Every input path is derived here, fresh each time; nothing is
//! cached across invocations.

use std::path::{Path, PathBuf};

/// Directories and names for one merge invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    /// Build output directory, holding the three base binaries
    pub build_dir: PathBuf,
    /// Project root, holding the partition CSV and `support_files/`
    pub project_dir: PathBuf,
    /// Build environment name, used in the default output file name
    pub env: String,
}

impl BuildContext {
    /// Create a context for one build environment.
    pub fn new(
        build_dir: impl Into<PathBuf>,
        project_dir: impl Into<PathBuf>,
        env: impl Into<String>,
    ) -> Self {
        Self {
            build_dir: build_dir.into(),
            project_dir: project_dir.into(),
            env: env.into(),
        }
    }

    /// Bootloader binary produced by the build
    pub fn bootloader_bin(&self) -> PathBuf {
        self.build_dir.join("bootloader.bin")
    }

    /// Partition table binary produced by the build
    pub fn partitions_bin(&self) -> PathBuf {
        self.build_dir.join("partitions.bin")
    }

    /// Application image produced by the build
    pub fn app_bin(&self) -> PathBuf {
        self.build_dir.join("firmware.bin")
    }

    /// Marker file whose presence pulls the NVS blob into the merge
    pub fn nvs_flag(&self) -> PathBuf {
        self.build_dir.join("nvs_flag.txt")
    }

    /// Default partition description file
    pub fn partition_csv(&self) -> PathBuf {
        self.project_dir.join("partitions.csv")
    }

    /// Default merged image path for this environment
    pub fn default_output(&self) -> PathBuf {
        self.project_dir.join(format!("merged-{}.bin", self.env))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_paths_from_directories() {
        let ctx = BuildContext::new("/build/launcher", "/proj", "launcher");
        assert_eq!(ctx.bootloader_bin(), Path::new("/build/launcher/bootloader.bin"));
        assert_eq!(ctx.partitions_bin(), Path::new("/build/launcher/partitions.bin"));
        assert_eq!(ctx.app_bin(), Path::new("/build/launcher/firmware.bin"));
        assert_eq!(ctx.nvs_flag(), Path::new("/build/launcher/nvs_flag.txt"));
        assert_eq!(ctx.partition_csv(), Path::new("/proj/partitions.csv"));
        assert_eq!(ctx.default_output(), Path::new("/proj/merged-launcher.bin"));
    }
}
