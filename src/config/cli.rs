use clap::Parser;

/// Arguments of the session driver. Everything describing the interaction
/// itself lives in the session file.
#[derive(Debug, Clone, Parser)]
#[command(name = "catalog-browser")]
#[command(about = "Query, select and export courses from the curriculum catalog")]
pub struct CliArgs {
    /// Path to the TOML session file
    #[arg(short, long, default_value = "session.toml")]
    pub config: String,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Show the query and selection without writing any export
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_args() {
        let args = CliArgs::parse_from(["catalog-browser", "--config", "my.toml", "-v", "--dry-run"]);
        assert_eq!(args.config, "my.toml");
        assert!(args.verbose);
        assert!(args.dry_run);

        let args = CliArgs::parse_from(["catalog-browser"]);
        assert_eq!(args.config, "session.toml");
        assert!(!args.verbose);
    }
}
