//! Command-line interface for batch room generation from style files

use crate::algorithm::executor::{GenerationPhase, RoomGenerator};
use crate::io::configuration::{
    DEFAULT_GRID_WIDTH, OUTPUT_SUFFIX, PREVIEW_PIXELS_PER_CELL, STYLE_EXTENSION,
};
use crate::io::error::{Result, file_system_error, invalid_parameter, is_configuration_error};
use crate::io::image::export_layout_as_png;
use crate::io::layout::RoomLayout;
use crate::io::progress::ProgressManager;
use crate::io::style::RoomConfig;
use clap::Parser;
use log::{info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "roomgen")]
#[command(
    author,
    version,
    about = "Generate room interior layouts from JSON style files"
)]
/// Command-line arguments for the room generation tool
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Style JSON file or directory of style files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Random seed, overriding the style's own seed
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Grid width in cells (implies square if height not specified)
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in cells
    #[arg(short = 'H', long)]
    pub height: Option<usize>,

    /// Also write a PNG preview of each layout
    #[arg(short, long)]
    pub preview: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Grid size as `(width, height)`
    pub fn grid_size(&self) -> (usize, usize) {
        (self.width, self.height.unwrap_or(self.width))
    }
}

/// Orchestrates batch processing of style files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// A style whose configuration is unusable is reported and skipped; the
    /// batch carries on with the remaining files.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation fails or an output cannot be
    /// written.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            match self.process_file(file, index) {
                Ok(()) => {}
                Err(error) if is_configuration_error(&error) => {
                    warn!("Skipping {}: {error}", file.display());
                    if let Some(ref mut pm) = self.progress_manager {
                        pm.fail_file(index);
                    }
                }
                Err(error) => return Err(error),
            }
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Style files selected by the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a style file nor a readable
    /// directory.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.cli.target.is_file() {
            if is_style_file(&self.cli.target) {
                if self.should_process_file(&self.cli.target) {
                    Ok(vec![self.cli.target.clone()])
                } else {
                    Ok(vec![])
                }
            } else {
                Err(invalid_parameter(
                    "target",
                    &self.cli.target.display(),
                    &"target file must be a JSON style",
                ))
            }
        } else if self.cli.target.is_dir() {
            let entries = std::fs::read_dir(&self.cli.target)
                .map_err(|e| file_system_error(&self.cli.target, "read directory", e))?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| file_system_error(&self.cli.target, "read directory", e))?
                    .path();
                if is_style_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &self.cli.target.display(),
                &"target must be a JSON style file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = Self::get_output_path(input_path);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = Self::get_output_path(input_path);

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, GenerationPhase::ALL.len());
        }

        let mut config = RoomConfig::from_json_path(input_path)?;
        if self.cli.seed.is_some() {
            config.seed = self.cli.seed;
        }

        let (width, height) = self.cli.grid_size();
        let mut generator = RoomGenerator::new();
        generator.initialize(config, width, height)?;

        for (step, phase) in GenerationPhase::ALL.into_iter().enumerate() {
            if let Some(ref mut pm) = self.progress_manager {
                pm.update_phase(index, step + 1, phase);
            }
            if generator.is_configured(phase) {
                let produced = generator.run_phase(phase)?;
                info!("{}: {phase} produced {produced}", input_path.display());
            }
        }

        RoomLayout::capture(&generator).write_json(&output_path)?;

        if self.cli.preview {
            let preview_path = Self::get_preview_path(input_path);
            export_layout_as_png(&generator, &preview_path, PREVIEW_PIXELS_PER_CELL)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, start_time.elapsed());
        }

        Ok(())
    }

    /// Path of the JSON layout written for a style file
    pub fn get_output_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, STYLE_EXTENSION)
    }

    /// Path of the PNG preview written for a style file
    pub fn get_preview_path(input_path: &Path) -> PathBuf {
        Self::sibling_path(input_path, "png")
    }

    fn sibling_path(input_path: &Path, extension: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.{extension}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }
}

// Layout outputs share the style extension and are never read back as input
fn is_style_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(STYLE_EXTENSION)
        && !path
            .file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}
