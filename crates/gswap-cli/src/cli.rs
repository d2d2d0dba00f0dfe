//! CLI argument definitions for the GUID swapper.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use gswap_model::{DEFAULT_THRESHOLD, SimilarityAlgorithm};

#[derive(Parser)]
#[command(
    name = "guid-swap",
    version,
    about = "Pair Unity assets by name and swap their GUIDs",
    long_about = "Pair the assets of two Unity folders by file name similarity.\n\n\
                  Matched pairs can be exported to CSV, saved as a reviewable plan,\n\
                  or applied directly by exchanging the GUIDs in their .meta files."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Prefix pretty and compact log lines with a timestamp.
    #[arg(long = "log-timestamps", global = true)]
    pub log_timestamps: bool,

    /// Include the emitting module in log lines.
    #[arg(long = "log-target", global = true)]
    pub log_target: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Score two names against each other.
    Score(ScoreArgs),

    /// Pair the assets of two folders and report the matches.
    Match(MatchArgs),

    /// Swap the GUIDs of matched assets.
    Swap(SwapArgs),

    /// List the available similarity algorithms.
    Algorithms,
}

#[derive(Parser)]
pub struct ScoreArgs {
    /// First name.
    pub a: String,

    /// Second name.
    pub b: String,

    /// Similarity algorithm.
    #[arg(long = "algorithm", short = 'a', value_enum, default_value = "fuzzy")]
    pub algorithm: AlgorithmArg,

    /// Score with every algorithm.
    #[arg(long = "all", conflicts_with = "algorithm")]
    pub all: bool,
}

/// Matching flags shared by `match` and `swap`.
#[derive(Args, Clone)]
pub struct MatchFlags {
    /// Similarity algorithm.
    #[arg(long = "algorithm", short = 'a', value_enum, default_value = "fuzzy")]
    pub algorithm: AlgorithmArg,

    /// Minimum score (inclusive) for a pair to be accepted.
    #[arg(long = "threshold", short = 't', default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Comma-separated keywords; candidates must contain at least one.
    #[arg(long = "keywords", short = 'k', value_name = "LIST")]
    pub keywords: Option<String>,

    /// Compare names including their file extensions.
    #[arg(long = "keep-extension")]
    pub keep_extension: bool,

    /// Scan subfolders too.
    #[arg(long = "recursive", short = 'r')]
    pub recursive: bool,
}

#[derive(Parser)]
pub struct MatchArgs {
    /// Folder holding the assets whose GUIDs should be kept.
    #[arg(value_name = "SOURCE_DIR")]
    pub source_dir: PathBuf,

    /// Folder holding the replacement assets.
    #[arg(value_name = "TARGET_DIR")]
    pub target_dir: PathBuf,

    #[command(flatten)]
    pub flags: MatchFlags,

    /// Export the pairs to a CSV file.
    #[arg(long = "csv", value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Show the best N candidates for every source instead of pairing.
    #[arg(long = "top", value_name = "N")]
    pub top: Option<usize>,
}

#[derive(Parser)]
pub struct SwapArgs {
    /// Folder holding the assets whose GUIDs should be kept.
    #[arg(value_name = "SOURCE_DIR", required_unless_present = "plan")]
    pub source_dir: Option<PathBuf>,

    /// Folder holding the replacement assets.
    #[arg(value_name = "TARGET_DIR", required_unless_present = "plan")]
    pub target_dir: Option<PathBuf>,

    #[command(flatten)]
    pub flags: MatchFlags,

    /// Apply a plan saved with `--plan-out` instead of pairing folders.
    ///
    /// The plan already fixes every pair, so the matching flags are rejected.
    #[arg(
        long = "plan",
        value_name = "PATH",
        conflicts_with_all = [
            "source_dir",
            "target_dir",
            "algorithm",
            "threshold",
            "keywords",
            "keep_extension",
            "recursive",
        ]
    )]
    pub plan: Option<PathBuf>,

    /// Save the plan to a file and stop before writing any .meta file.
    #[arg(long = "plan-out", value_name = "PATH", conflicts_with = "plan")]
    pub plan_out: Option<PathBuf>,

    /// Report the swaps without writing anything.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    /// Do not write `.meta.bak` backups before modifying files.
    #[arg(long = "no-backup")]
    pub no_backup: bool,
}

/// CLI similarity algorithm choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum AlgorithmArg {
    Sequential,
    #[value(alias = "jaro-winkler", alias = "jw")]
    Fuzzy,
    #[value(name = "longest-substring", alias = "lcs")]
    LongestSubstring,
    #[value(name = "token-jaccard", alias = "jaccard")]
    TokenJaccard,
}

impl From<AlgorithmArg> for SimilarityAlgorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::Sequential => SimilarityAlgorithm::Sequential,
            AlgorithmArg::Fuzzy => SimilarityAlgorithm::Fuzzy,
            AlgorithmArg::LongestSubstring => SimilarityAlgorithm::LongestConsecutiveSubstring,
            AlgorithmArg::TokenJaccard => SimilarityAlgorithm::TokenJaccard,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn swap_accepts_plan_without_folders() {
        let cli = Cli::try_parse_from(["guid-swap", "swap", "--plan", "plan.json"]).unwrap();
        let Command::Swap(args) = cli.command else {
            panic!("expected swap");
        };
        assert!(args.source_dir.is_none());
        assert_eq!(args.plan, Some(PathBuf::from("plan.json")));
    }

    #[test]
    fn swap_plan_rejects_matching_flags() {
        for flag in [
            ["--threshold", "0.9"].as_slice(),
            ["--algorithm", "lcs"].as_slice(),
            ["--keywords", "hero"].as_slice(),
            ["--recursive"].as_slice(),
        ] {
            let mut argv = vec!["guid-swap", "swap", "--plan", "plan.json"];
            argv.extend_from_slice(flag);
            assert!(Cli::try_parse_from(argv).is_err(), "{flag:?} was accepted");
        }
    }

    #[test]
    fn log_flags_are_global() {
        let cli = Cli::try_parse_from([
            "guid-swap",
            "algorithms",
            "--log-timestamps",
            "--log-target",
        ])
        .unwrap();
        assert!(cli.log_timestamps);
        assert!(cli.log_target);
    }

    #[test]
    fn swap_requires_folders_without_plan() {
        assert!(Cli::try_parse_from(["guid-swap", "swap", "Old"]).is_err());
    }

    #[test]
    fn algorithm_aliases() {
        let cli = Cli::try_parse_from(["guid-swap", "score", "a", "b", "-a", "lcs"]).unwrap();
        let Command::Score(args) = cli.command else {
            panic!("expected score");
        };
        assert_eq!(
            SimilarityAlgorithm::from(args.algorithm),
            SimilarityAlgorithm::LongestConsecutiveSubstring
        );
    }
}
