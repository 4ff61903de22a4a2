//! Batch driver: reads graph files, decides perfection and prints the outcome.
//!
//! Everything user-facing goes to a caller-supplied writer so that the binary can
//! print to stdout while tests capture the text.

use crate::graph::{AdjacencyMatrix, GraphParseError};
use crate::perfect::{DecisionConfig, PerfectnessReport, decide, report};
use log::{info, warn};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Maximum number of cells in the folder progress bar.
const PROGRESS_BAR_WIDTH: usize = 50;

/// Column width of the summary labels.
const SUMMARY_LABEL_WIDTH: usize = 30;

/// Header of the benchmark CSV.
pub const EXPERIMENT_CSV_HEADER: &str =
    "graph_path,type,order,density,id,runtime_ours,is_perfect_ours";

// ============================================================================
// Options and errors
// ============================================================================

/// What to print and how to decide, per run.
#[derive(Clone, Debug, Default)]
pub struct RunOptions {
    /// Print `Perfect: <path>` for perfect graphs.
    pub verbose_perfect: bool,
    /// Print `Non-perfect: <path>` for non-perfect graphs.
    pub verbose_nonperfect: bool,
    /// Enumerate all odd holes and antiholes and print the report.
    pub verbose_holes: bool,
    /// Parameters forwarded to the decision procedure.
    pub decision: DecisionConfig,
    /// Append one benchmark row per graph to this CSV file.
    pub experiment_csv: Option<PathBuf>,
}

impl RunOptions {
    /// The progress bar is only drawn when no per-graph output is requested.
    fn shows_progress(&self) -> bool {
        !self.verbose_perfect && !self.verbose_nonperfect && !self.verbose_holes
    }
}

/// Errors that abort a run.
#[derive(Debug)]
pub enum RunError {
    /// The input file does not exist.
    MissingInput(PathBuf),
    /// The folder path exists but is not a directory.
    NotADirectory(PathBuf),
    /// A graph file could not be parsed.
    Parse {
        /// The offending file.
        path: PathBuf,
        /// What went wrong.
        source: GraphParseError,
    },
    /// Reading a directory or writing output failed.
    Io(io::Error),
}

impl fmt::Display for RunError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RunError::MissingInput(path) => write!(f, "File does not exist: {}", path.display()),
            RunError::NotADirectory(path) => {
                write!(f, "Folder does not exist: {}", path.display())
            }
            RunError::Parse { path, source } => {
                write!(f, "Unable to read graph file {}: {source}", path.display())
            }
            RunError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for RunError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RunError::Parse { source, .. } => Some(source),
            RunError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for RunError {
    fn from(e: io::Error) -> Self {
        RunError::Io(e)
    }
}

// ============================================================================
// File helpers
// ============================================================================

/// Returns `true` iff the path ends in `.txt` or `.csv`.
pub fn has_graph_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("txt" | "csv")
    )
}

/// Metadata encoded in benchmark file names of the form `..._type_order_density_id.txt`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GraphFileInfo {
    /// Generator family, e.g. `erdos-renyi`.
    pub kind: String,
    /// Number of vertices, as written in the name.
    pub order: String,
    /// Edge density, as written in the name.
    pub density: String,
    /// Instance identifier.
    pub id: String,
}

impl GraphFileInfo {
    /// Parses the last four `_`-separated fields of a `.txt` file name.
    ///
    /// Returns `None` for other extensions or when fewer than four separators exist.
    pub fn parse(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_str()?;
        let base = name.strip_suffix(".txt")?;

        let (rest, id) = base.rsplit_once('_')?;
        let (rest, density) = rest.rsplit_once('_')?;
        let (rest, order) = rest.rsplit_once('_')?;
        let (_, kind) = rest.rsplit_once('_')?;

        Some(Self {
            kind: kind.to_owned(),
            order: order.to_owned(),
            density: density.to_owned(),
            id: id.to_owned(),
        })
    }
}

/// Appends a benchmark row, writing the header first when the file is empty.
///
/// # Errors
/// Returns an error if the file cannot be opened or written.
pub fn append_experiment_row(
    csv_path: &Path,
    graph_path: &Path,
    elapsed: Duration,
    perfect: bool,
) -> io::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(csv_path)?;
    if file.metadata()?.len() == 0 {
        writeln!(file, "{EXPERIMENT_CSV_HEADER}")?;
    }
    let info = GraphFileInfo::parse(graph_path).unwrap_or_default();
    writeln!(
        file,
        "{},{},{},{},{},{},{}",
        graph_path.display(),
        info.kind,
        info.order,
        info.density,
        info.id,
        elapsed.as_millis(),
        u8::from(perfect)
    )
}

/// Renders the folder progress bar line for `done` of `total` graphs.
pub fn render_progress(done: usize, total: usize) -> String {
    let width = total.min(PROGRESS_BAR_WIDTH);
    let filled = if total == 0 {
        width
    } else {
        (done * width).div_ceil(total).min(width)
    };
    format!(
        "\rProgress: [{}{}] {done} / {total}",
        "#".repeat(filled),
        " ".repeat(width - filled)
    )
}

// ============================================================================
// Single graph
// ============================================================================

/// Result of deciding one graph.
#[derive(Clone, Debug)]
pub struct GraphOutcome {
    /// The verdict.
    pub perfect: bool,
    /// Whether the input matrix was symmetric.
    pub symmetric: bool,
    /// Full hole report, when requested.
    pub report: Option<PerfectnessReport>,
    /// Time spent in the decision procedure.
    pub elapsed: Duration,
}

/// Decides an already loaded matrix according to `options`.
pub fn decide_matrix(matrix: &AdjacencyMatrix, options: &RunOptions) -> GraphOutcome {
    let symmetric = matrix.is_symmetric();
    let start = Instant::now();
    let (perfect, report) = if options.verbose_holes {
        let report = report(matrix, &options.decision);
        (report.is_perfect(), Some(report))
    } else {
        (decide(matrix, &options.decision), None)
    };
    GraphOutcome {
        perfect,
        symmetric,
        report,
        elapsed: start.elapsed(),
    }
}

// ============================================================================
// Runner
// ============================================================================

/// Perfect/non-perfect tallies of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Graphs found perfect.
    pub perfect: usize,
    /// Graphs found non-perfect.
    pub nonperfect: usize,
    /// Graph files that could not be read.
    pub failed: usize,
}

/// Drives decisions over files and folders, writing user-facing output to `out`.
#[derive(Debug)]
pub struct Runner<W: Write> {
    options: RunOptions,
    out: W,
    summary: RunSummary,
}

impl<W: Write> Runner<W> {
    /// Creates a runner with empty tallies.
    pub fn new(options: RunOptions, out: W) -> Self {
        Self {
            options,
            out,
            summary: RunSummary::default(),
        }
    }

    /// Returns the tallies so far.
    pub fn summary(&self) -> RunSummary {
        self.summary
    }

    /// Consumes the runner and returns its writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Decides a single graph file and prints the outcome.
    ///
    /// Non-regular files are reported and skipped; files without a graph extension are
    /// skipped silently.
    ///
    /// # Errors
    /// Returns an error if the file cannot be parsed or output cannot be written.
    pub fn run_graph_file(&mut self, path: &Path) -> Result<(), RunError> {
        if !path.is_file() {
            writeln!(self.out, "Not a regular file. Skipped: {}", path.display())?;
            return Ok(());
        }
        if !has_graph_extension(path) {
            return Ok(());
        }

        let matrix = AdjacencyMatrix::load_from_file(path).map_err(|source| RunError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        info!("Deciding {} (n={}).", path.display(), matrix.order());

        let outcome = decide_matrix(&matrix, &self.options);
        if !outcome.symmetric {
            warn!("Asymmetric adjacency matrix in {}.", path.display());
            writeln!(self.out, "Adjacency matrix is not symmetric: {}", path.display())?;
        }

        if self.options.verbose_perfect && outcome.perfect {
            writeln!(self.out, "Perfect: {}", path.display())?;
        }
        if self.options.verbose_nonperfect && !outcome.perfect {
            writeln!(self.out, "Non-perfect: {}", path.display())?;
        }
        if let Some(report) = &outcome.report {
            writeln!(self.out, "{report}")?;
        }

        if let Some(csv) = &self.options.experiment_csv {
            append_experiment_row(csv, path, outcome.elapsed, outcome.perfect)?;
        }

        if outcome.perfect {
            self.summary.perfect += 1;
        } else {
            self.summary.nonperfect += 1;
        }
        Ok(())
    }

    /// Runs on a single file given on the command line.
    ///
    /// # Errors
    /// Returns an error if the file does not exist or cannot be processed.
    pub fn run_file(&mut self, path: &Path) -> Result<RunSummary, RunError> {
        if !path.exists() {
            return Err(RunError::MissingInput(path.to_path_buf()));
        }
        writeln!(self.out, "Running is_perfect for file: {}\n", path.display())?;
        self.run_graph_file(path)?;
        Ok(self.summary)
    }

    /// Runs on every graph file in `dir`, in sorted path order.
    ///
    /// Unreadable graph files are reported and counted in [`RunSummary::failed`]; the
    /// run continues.
    ///
    /// # Errors
    /// Returns an error if `dir` is not a directory or output cannot be written.
    pub fn run_folder(&mut self, dir: &Path) -> Result<RunSummary, RunError> {
        if !dir.is_dir() {
            return Err(RunError::NotADirectory(dir.to_path_buf()));
        }
        writeln!(self.out, "Running is_perfect for folder: {}\n", dir.display())?;

        let mut entries = fs::read_dir(dir)?
            .map(|entry| entry.map(|e| e.path()))
            .collect::<io::Result<Vec<PathBuf>>>()?;
        entries.sort();

        let mut graphs = Vec::with_capacity(entries.len());
        for path in entries {
            if has_graph_extension(&path) {
                graphs.push(path);
            } else {
                warn!("Skipping {}.", path.display());
                writeln!(
                    self.out,
                    "File extension not \"txt\" or \"csv\". Skipped: {}\n",
                    path.display()
                )?;
            }
        }

        let total = graphs.len();
        let progress = self.options.shows_progress();
        for (i, path) in graphs.iter().enumerate() {
            if progress {
                write!(self.out, "{}", render_progress(i, total))?;
                self.out.flush()?;
            }
            match self.run_graph_file(path) {
                Ok(()) => {}
                Err(e @ RunError::Parse { .. }) => {
                    warn!("{e}");
                    if progress {
                        writeln!(self.out)?;
                    }
                    writeln!(self.out, "{e}")?;
                    self.summary.failed += 1;
                }
                Err(e) => return Err(e),
            }
        }
        if progress {
            writeln!(self.out, "{}", render_progress(total, total))?;
        }

        writeln!(self.out)?;
        self.write_summary()?;
        Ok(self.summary)
    }

    fn write_summary(&mut self) -> io::Result<()> {
        let width = SUMMARY_LABEL_WIDTH;
        writeln!(
            self.out,
            "{:<width$}{:>10}",
            "Number of perfect graphs", self.summary.perfect
        )?;
        writeln!(
            self.out,
            "{:<width$}{:>10}",
            "Number of non-perfect graphs", self.summary.nonperfect
        )?;
        writeln!(
            self.out,
            "{:<width$}{:>10}",
            "Number of unreadable graphs", self.summary.failed
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
