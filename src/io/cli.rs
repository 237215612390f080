//! Command-line interface for batch-solving tiling problem files
//!
//! The target is a single JSON problem file or a directory of them; each
//! file is solved in turn and its terminal reply printed as one JSON
//! document on stdout.

use crate::algorithm::executor::solve;
use crate::io::error::{Result, SolverError};
use crate::io::messages::{SolveReply, SolveRequest};
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "patioplan")]
#[command(
    author,
    version,
    about = "Solve exact-cover patio tiling problems from JSON descriptions"
)]
/// Command-line arguments for the tiling planner
pub struct Cli {
    /// Problem JSON file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Override the request seed for reproducible runs
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Pretty-print the reply JSON
    #[arg(short, long)]
    pub pretty: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Orchestrates batch processing of problem files with progress tracking
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
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        for file in &files {
            self.process_file(file)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Expand the target into a sorted list of problem files
    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_dir() {
            let entries =
                std::fs::read_dir(target).map_err(|source| SolverError::FileSystem {
                    path: target.clone(),
                    operation: "read directory",
                    source,
                })?;

            let mut files: Vec<PathBuf> = entries
                .filter_map(std::result::Result::ok)
                .map(|entry| entry.path())
                .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
                .collect();
            files.sort();
            Ok(files)
        } else {
            Ok(vec![target.clone()])
        }
    }

    /// Solve one problem file and print its terminal reply
    #[allow(clippy::print_stdout)]
    fn process_file(&mut self, path: &Path) -> Result<()> {
        let text = std::fs::read_to_string(path).map_err(|source| SolverError::FileSystem {
            path: path.to_path_buf(),
            operation: "read",
            source,
        })?;
        let mut request: SolveRequest =
            serde_json::from_str(&text).map_err(|source| SolverError::ProblemParse {
                path: path.to_path_buf(),
                source,
            })?;

        if let Some(seed) = self.cli.seed {
            request.seed = Some(seed);
        }

        let display_name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if let Some(ref mut pm) = self.progress_manager {
            pm.start_solve(&display_name);
        }

        let reply = {
            let pm = self.progress_manager.as_ref();
            solve(&request, &mut |event| {
                if let Some(pm) = pm {
                    pm.update(event);
                }
            })
        };

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish_solve(reply_summary(&reply));
        }

        let rendered = if self.cli.pretty {
            serde_json::to_string_pretty(&reply)
        } else {
            serde_json::to_string(&reply)
        }
        .map_err(|source| SolverError::ProblemParse {
            path: path.to_path_buf(),
            source,
        })?;
        println!("{rendered}");

        Ok(())
    }
}

/// One-line outcome used for the spinner's closing message
const fn reply_summary(reply: &SolveReply) -> &'static str {
    match reply {
        SolveReply::Result { .. } => "layout found",
        SolveReply::Infeasible { .. } => "infeasible",
        SolveReply::Error { .. } => "error",
        SolveReply::Progress { .. } => "in progress",
    }
}
