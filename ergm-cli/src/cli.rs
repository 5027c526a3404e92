//! Command-line interface orchestration for the ERGM estimator.
//!
//! Loads a Pajek-like network file and optional attribute files, binds a
//! statistic list, runs Algorithm S then Algorithm EE, and writes the theta
//! and dzA trace files next to the network file.

use std::fs::File;
use std::io::{self, BufReader, BufWriter};
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use ergm_core::{
    AttributeTable, EstimationConfig, Estimator, ErgmError, Statistic,
    trace::{DzaTraceWriter, ThetaTraceWriter},
};
use ergm_providers_attributes::{AttributeParseError, parse_binary_attributes, parse_categorical_attributes};
use ergm_providers_network::{NetworkParseError, parse_pajek_arcs};
use thiserror::Error;

const DEFAULT_BASE_NAME: &str = "data_source";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(name = "ergm-cli", about = "Estimate directed ERGM parameters via Equilibrium Expectation.")]
pub struct Cli {
    /// Path to the Pajek-like network file.
    #[arg(long)]
    pub network: PathBuf,

    /// Path to a binary attribute file, usable by `sender`/`receiver`/`interaction`.
    #[arg(long)]
    pub binary_attributes: Option<PathBuf>,

    /// Path to a categorical attribute file, usable by the matching statistics.
    #[arg(long)]
    pub categorical_attributes: Option<PathBuf>,

    /// Statistics to estimate, in order. Defaults to every statistic that
    /// the supplied attribute files support.
    #[arg(long = "statistic", value_enum)]
    pub statistics: Vec<StatisticArg>,

    /// Alternating-statistics decay constant.
    #[arg(long, default_value_t = 2.0)]
    pub lambda: f64,

    /// Override the output file base name (defaults to the network file stem).
    #[arg(long)]
    pub name: Option<String>,

    /// RNG seed.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Reference iteration count used to derive Algorithm S's `M1` from
    /// network density.
    #[arg(long, default_value_t = 500)]
    pub burn_in_steps: usize,

    /// Reference iteration count used to derive Algorithm EE's `M` from
    /// network density.
    #[arg(long, default_value_t = 100)]
    pub inner_steps: usize,

    /// Number of Algorithm EE outer iterations.
    #[arg(long, default_value_t = 500)]
    pub m_outer: usize,

    /// Explicit override for Algorithm S's iteration count, bypassing the
    /// density-based derivation.
    #[arg(long)]
    pub m1: Option<usize>,

    /// Explicit override for Algorithm EE's inner iteration count, bypassing
    /// the density-based derivation.
    #[arg(long)]
    pub m: Option<usize>,

    /// Number of Metropolis-Hastings proposals per sampler call.
    #[arg(long, default_value_t = 1000)]
    pub sampler_proposals: usize,

    /// Directory the trace files are written into (defaults to the current
    /// directory).
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,
}

/// Mirrors [`Statistic`] as a `clap`-derivable enum, since implementing
/// `ValueEnum` for a foreign type is not possible from this crate.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatisticArg {
    /// See [`Statistic::Arc`].
    Arc,
    /// See [`Statistic::Reciprocity`].
    Reciprocity,
    /// See [`Statistic::AltInStars`].
    AltInStars,
    /// See [`Statistic::AltOutStars`].
    AltOutStars,
    /// See [`Statistic::AltKTrianglesT`].
    AltKTrianglesT,
    /// See [`Statistic::AltKTrianglesC`].
    AltKTrianglesC,
    /// See [`Statistic::AltTwoPathsT`].
    AltTwoPathsT,
    /// See [`Statistic::AltTwoPathsD`].
    AltTwoPathsD,
    /// See [`Statistic::AltTwoPathsTD`].
    AltTwoPathsTD,
    /// See [`Statistic::Sender`].
    Sender,
    /// See [`Statistic::Receiver`].
    Receiver,
    /// See [`Statistic::Interaction`].
    Interaction,
    /// See [`Statistic::Matching`].
    Matching,
    /// See [`Statistic::MatchingReciprocity`].
    MatchingReciprocity,
    /// See [`Statistic::Mismatching`].
    Mismatching,
    /// See [`Statistic::MismatchingReciprocity`].
    MismatchingReciprocity,
}

impl StatisticArg {
    /// Converts to the `ergm-core` statistic it mirrors.
    #[must_use]
    pub const fn to_statistic(self) -> Statistic {
        match self {
            Self::Arc => Statistic::Arc,
            Self::Reciprocity => Statistic::Reciprocity,
            Self::AltInStars => Statistic::AltInStars,
            Self::AltOutStars => Statistic::AltOutStars,
            Self::AltKTrianglesT => Statistic::AltKTrianglesT,
            Self::AltKTrianglesC => Statistic::AltKTrianglesC,
            Self::AltTwoPathsT => Statistic::AltTwoPathsT,
            Self::AltTwoPathsD => Statistic::AltTwoPathsD,
            Self::AltTwoPathsTD => Statistic::AltTwoPathsTD,
            Self::Sender => Statistic::Sender,
            Self::Receiver => Statistic::Receiver,
            Self::Interaction => Statistic::Interaction,
            Self::Matching => Statistic::Matching,
            Self::MatchingReciprocity => Statistic::MatchingReciprocity,
            Self::Mismatching => Statistic::Mismatching,
            Self::MismatchingReciprocity => Statistic::MismatchingReciprocity,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CliError {
    /// Failed to open or create a file.
    #[error("failed to access `{path}`: {source}")]
    Io {
        /// Path that triggered the failure.
        path: PathBuf,
        /// Underlying operating system error.
        #[source]
        source: io::Error,
    },
    /// Network file parsing failed.
    #[error(transparent)]
    Network(#[from] NetworkParseError),
    /// Attribute file parsing failed.
    #[error(transparent)]
    Attribute(#[from] AttributeParseError),
    /// Core estimation failed.
    #[error(transparent)]
    Core(#[from] ErgmError),
}

/// Summary of a completed estimation run.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Base name used to derive trace file names.
    pub base_name: String,
    /// Node count of the loaded network.
    pub n: usize,
    /// Number of arcs loaded.
    pub arc_count: usize,
    /// Final theta vector after Algorithm EE.
    pub theta: Vec<f64>,
}

/// Derives an Algorithm S/EE iteration count from the reference driver's
/// density-based formula: `round(reference_steps * density*(1-density)*n^2 /
/// sampler_proposals)`, floored at 1 so a degenerate (empty or complete)
/// graph still runs at least one iteration.
fn derive_iteration_count(
    reference_steps: usize,
    n: usize,
    arc_count: usize,
    sampler_proposals: usize,
) -> usize {
    if n < 2 {
        return 1;
    }
    #[allow(clippy::cast_precision_loss, reason = "n stays far below f64's exact-integer range")]
    let n_f = n as f64;
    #[allow(clippy::cast_precision_loss, reason = "arc counts stay far below f64's exact-integer range")]
    let arc_count_f = arc_count as f64;
    let density = arc_count_f / (n_f * (n_f - 1.0));
    #[allow(clippy::cast_precision_loss, reason = "proposal/step counts stay far below f64's exact-integer range")]
    let reference_steps_f = reference_steps as f64;
    #[allow(clippy::cast_precision_loss, reason = "proposal counts stay far below f64's exact-integer range")]
    let proposals_f = sampler_proposals as f64;
    let raw = reference_steps_f * density * (1.0 - density) * n_f * n_f / proposals_f;
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, reason = "raw is non-negative and bounded by the network size")]
    let count = raw.round() as usize;
    count.max(1)
}

fn open_reader(path: &Path) -> Result<BufReader<File>, CliError> {
    let file = File::open(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn derive_base_name(path: &Path, override_name: Option<&str>) -> String {
    if let Some(name) = override_name {
        return name.to_owned();
    }
    path.file_stem()
        .and_then(|value| value.to_str())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| DEFAULT_BASE_NAME.to_owned())
}

fn load_attributes(cli: &Cli, n: usize) -> Result<AttributeTable, CliError> {
    let mut attrs = AttributeTable::new();
    if let Some(path) = &cli.binary_attributes {
        let reader = open_reader(path)?;
        let (name, values) = parse_binary_attributes(reader, n)?;
        attrs = attrs.with_binary(name, values);
    }
    if let Some(path) = &cli.categorical_attributes {
        let reader = open_reader(path)?;
        let (name, values) = parse_categorical_attributes(reader, n)?;
        attrs = attrs.with_categorical(name, values);
    }
    Ok(attrs)
}

fn default_statistics(attrs: &AttributeTable) -> Vec<Statistic> {
    Statistic::ALL
        .into_iter()
        .filter(|statistic| match statistic.required_attribute() {
            Some(ergm_core::RequiredAttribute::Binary) => attrs.binary().is_some(),
            Some(ergm_core::RequiredAttribute::Categorical) => attrs.categorical().is_some(),
            None => true,
        })
        .collect()
}

/// Executes the CLI command represented by `cli`, writing trace files next
/// to the network file.
///
/// # Errors
/// Returns [`CliError`] when loading, binding, estimation, or trace-file
/// writing fails.
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    let network_reader = open_reader(&cli.network)?;
    let parsed = parse_pajek_arcs(network_reader)?;

    let mut graph = ergm_core::Graph::new(parsed.n);
    for (i, j) in &parsed.arcs {
        graph.insert_arc(*i, *j)?;
    }
    let arc_count = graph.arc_count();

    let attrs = load_attributes(&cli, parsed.n)?;
    let statistics = if cli.statistics.is_empty() {
        default_statistics(&attrs)
    } else {
        cli.statistics.iter().map(|arg| arg.to_statistic()).collect()
    };
    let labels: Vec<&str> = statistics.iter().map(|s| s.label()).collect();

    let config = EstimationConfig::builder()
        .with_lambda(cli.lambda)
        .with_sampler_proposals(cli.sampler_proposals)
        .build()
        .map_err(CliError::Core)?;

    let mut estimator = Estimator::new(graph, attrs, statistics, config, cli.seed)?;

    let m1 = cli.m1.unwrap_or_else(|| {
        derive_iteration_count(cli.burn_in_steps, parsed.n, arc_count, cli.sampler_proposals)
    });
    let m = cli.m.unwrap_or_else(|| {
        derive_iteration_count(cli.inner_steps, parsed.n, arc_count, cli.sampler_proposals)
    });
    let base_name = derive_base_name(&cli.network, cli.name.as_deref());

    let algorithm_s = estimator.run_algorithm_s(m1)?;
    let algorithm_ee = estimator.run_algorithm_ee(
        algorithm_s.theta.clone(),
        algorithm_s.d_mean.clone(),
        cli.m_outer,
        m,
    )?;

    write_theta_trace(&cli.output_dir, &base_name, &labels, &algorithm_s, &algorithm_ee)?;
    write_dza_trace(&cli.output_dir, &base_name, &labels, &algorithm_ee)?;

    Ok(ExecutionSummary {
        base_name,
        n: parsed.n,
        arc_count,
        theta: algorithm_ee.theta,
    })
}

fn create_trace_file(path: &Path) -> Result<BufWriter<File>, CliError> {
    let file = File::create(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufWriter::new(file))
}

fn write_theta_trace(
    output_dir: &Path,
    base_name: &str,
    labels: &[&str],
    algorithm_s: &ergm_core::AlgorithmSOutcome,
    algorithm_ee: &ergm_core::AlgorithmEeOutcome,
) -> Result<(), CliError> {
    let path = output_dir.join(format!("theta_values_{base_name}.txt"));
    let file = create_trace_file(&path)?;
    let mut writer = ThetaTraceWriter::new(file, labels).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    for row in &algorithm_s.trace {
        writer.write_row(row).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
    }
    for row in &algorithm_ee.theta_trace {
        writer.write_row(row).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

fn write_dza_trace(
    output_dir: &Path,
    base_name: &str,
    labels: &[&str],
    algorithm_ee: &ergm_core::AlgorithmEeOutcome,
) -> Result<(), CliError> {
    let path = output_dir.join(format!("dzA_values_{base_name}.txt"));
    let file = create_trace_file(&path)?;
    let mut writer = DzaTraceWriter::new(file, labels).map_err(|source| CliError::Io {
        path: path.clone(),
        source,
    })?;
    for row in &algorithm_ee.dza_trace {
        writer.write_row(row).map_err(|source| CliError::Io {
            path: path.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use rstest::rstest;
    use tempfile::TempDir;

    use super::*;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        let mut file = File::create(&path).expect("temp file creation succeeds");
        file.write_all(contents.as_bytes()).expect("temp file write succeeds");
        path
    }

    #[rstest]
    #[case::override_name("/tmp/source.net", Some("override"), "override")]
    #[case::stem_with_extension("/tmp/source.net", None, "source")]
    #[case::missing_stem("", None, "data_source")]
    fn derive_base_name_selects_expected_name(
        #[case] raw_path: &str,
        #[case] override_name: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let path = Path::new(raw_path);
        assert_eq!(derive_base_name(path, override_name), expected);
    }

    #[test]
    fn derive_iteration_count_is_at_least_one_for_tiny_graphs() {
        assert_eq!(derive_iteration_count(500, 0, 0, 1000), 1);
        assert_eq!(derive_iteration_count(500, 1, 0, 1000), 1);
    }

    #[test]
    fn run_cli_on_small_fixture_writes_trace_files() {
        let dir = TempDir::new().expect("temp dir creation succeeds");
        let network_path = write_file(&dir, "net.net", "*vertices 4\n*arcs\n1 2\n2 3\n3 4\n4 1\n");

        let cli = Cli {
            network: network_path,
            binary_attributes: None,
            categorical_attributes: None,
            statistics: vec![StatisticArg::Arc, StatisticArg::Reciprocity],
            lambda: 2.0,
            name: Some("fixture".to_owned()),
            seed: 7,
            burn_in_steps: 500,
            inner_steps: 100,
            m_outer: 2,
            m1: Some(3),
            m: Some(2),
            sampler_proposals: 4,
            output_dir: dir.path().to_path_buf(),
        };
        let summary = run_cli(cli).expect("estimation on a small cycle graph succeeds");
        assert_eq!(summary.n, 4);
        assert_eq!(summary.arc_count, 4);
        assert_eq!(summary.theta.len(), 2);

        assert!(dir.path().join("theta_values_fixture.txt").exists());
        assert!(dir.path().join("dzA_values_fixture.txt").exists());
    }

    #[test]
    fn clap_rejects_unknown_statistic() {
        let args = ["ergm-cli", "--network", "net.net", "--statistic", "unsupported"];
        let result = Cli::try_parse_from(args);
        assert!(result.is_err());
    }
}
