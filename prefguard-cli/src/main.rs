use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use std::io::{self, Write};
use std::path::PathBuf;

// Import from prefguard-core
use prefguard_core::{
    render_audit, render_audit_with_reasons, render_overrides, ExportConfig, ExportReport,
    PrecedencePolicy, RuleAdditions, RuleClass, RuleSet,
};

// Import CLI utilities
use prefguard::{logging, run_export, ExportOutcome};

#[derive(Parser)]
#[command(name = "prefguard")]
#[command(about = "Export LibreWolf policy prefs to librewolf.overrides.cfg (privacy-first)")]
struct Args {
    /// Browser data directory holding profiles.ini (autodetected if not specified)
    #[arg(long)]
    base_dir: Option<PathBuf>,

    /// Profile directory holding prefs.js (default profile from profiles.ini if not specified)
    #[arg(long)]
    profile_dir: Option<PathBuf>,

    /// Output file path (default: <base-dir>/librewolf.overrides.cfg)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to config file (YAML format)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rule precedence: strict (allowlist beats prefix/substring) or denylist-first
    #[arg(long)]
    precedence: Option<PrecedencePolicy>,

    /// Extra name prefix to drop (repeatable)
    #[arg(long = "exclude-prefix", value_name = "PREFIX")]
    exclude_prefixes: Vec<String>,

    /// Extra case-insensitive substring to drop (repeatable)
    #[arg(long = "exclude-substring", value_name = "SUBSTRING")]
    exclude_substrings: Vec<String>,

    /// Extra regex that always drops, even over the allowlist (repeatable)
    #[arg(long = "exclude-regex", value_name = "REGEX")]
    exclude_regexes: Vec<String>,

    /// Extra regex to keep (repeatable)
    #[arg(long = "include-regex", value_name = "REGEX")]
    include_regexes: Vec<String>,

    /// Print the skipped prefs as commented user_pref lines for review
    #[arg(long)]
    print_skipped: bool,

    /// Annotate skipped prefs with the rule that dropped them (implies --print-skipped)
    #[arg(long)]
    explain: bool,

    /// Print the override file to stdout instead of writing it
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long, value_name = "PATH")]
    report: Option<PathBuf>,

    /// Show the active rule set and exit
    #[arg(long)]
    show_rules: bool,

    /// More diagnostics on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e:#}");
            std::process::exit(2);
        }
    };

    if args.show_rules {
        match config.rule_set().context("invalid rule configuration") {
            Ok(rules) => show_rules(&rules),
            Err(e) => {
                eprintln!("❌ {e:#}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    match run_export(&config, args.dry_run) {
        Ok(outcome) => {
            finish(&args, &outcome)?;
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Export failed: {e:#}");
            std::process::exit(1);
        }
    }
}

/// Load config and apply CLI overrides on top of it.
/// CLI rule additions land after the config file's additions.
fn build_config(args: &Args) -> Result<ExportConfig> {
    let mut config = ExportConfig::load(args.config.as_deref())?;
    if let Some(path) = &args.config {
        tracing::info!(config = %path.display(), "loaded config");
    }

    if let Some(dir) = &args.base_dir {
        config.base_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.profile_dir {
        config.profile_dir = Some(dir.clone());
    }
    if let Some(output) = &args.output {
        config.output = Some(output.clone());
    }
    if let Some(precedence) = args.precedence {
        config.precedence = precedence;
    }
    config.rules.append(RuleAdditions {
        exclude_prefixes: args.exclude_prefixes.clone(),
        exclude_substrings: args.exclude_substrings.clone(),
        exclude_regexes: args.exclude_regexes.clone(),
        include_regexes: args.include_regexes.clone(),
    });

    Ok(config)
}

fn finish(args: &Args, outcome: &ExportOutcome) -> Result<()> {
    // dry runs keep stdout for the rendered file
    let mut summary = side_channel(args.dry_run);

    let partition = &outcome.partition;
    writeln!(summary, "🦊 prefguard")?;
    writeln!(summary, "Profile:  {}", outcome.profile_dir.display())?;
    writeln!(summary, "Read:     {} prefs", partition.total())?;
    writeln!(summary, "Written:  {} prefs", partition.kept.len())?;
    writeln!(summary, "Skipped:  {} prefs", partition.dropped.len())?;
    if outcome.written {
        writeln!(summary, "Output:   {}", outcome.output.display())?;
    } else {
        writeln!(summary, "Output:   (dry run, would write {})", outcome.output.display())?;
    }
    drop(summary);

    if args.dry_run {
        print!("{}", render_overrides(&partition.kept));
    }

    if args.print_skipped || args.explain {
        let audit = if args.explain {
            render_audit_with_reasons(&outcome.classifier(), &partition.dropped)
        } else {
            render_audit(&partition.dropped)
        };
        write!(side_channel(args.dry_run), "\n{audit}")?;
    }

    if let Some(path) = &args.report {
        let output = outcome.written.then_some(outcome.output.as_path());
        let report = ExportReport::new(&outcome.classifier(), partition, &outcome.profile_dir, output);
        report
            .save(path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        eprintln!("💾 Report saved to: {}", path.display());
    }

    Ok(())
}

fn side_channel(dry_run: bool) -> Box<dyn Write> {
    if dry_run {
        Box::new(io::stderr())
    } else {
        Box::new(io::stdout())
    }
}

fn show_rules(rules: &RuleSet) {
    println!("📋 Precedence: {}", rules.precedence());
    for (step, class) in rules.precedence().order().iter().enumerate() {
        println!("  {}. {:<18} → {}", step + 1, class.label(), class.verdict());
    }
    println!("   (no rule matched → keep)");

    println!("\n🔍 Rule set fingerprint: {}", rules.fingerprint());

    for class in [
        RuleClass::ExactDeny,
        RuleClass::Allow,
        RuleClass::Prefix,
        RuleClass::Substring,
    ] {
        let entries: Vec<&str> = match class {
            RuleClass::ExactDeny => rules.exclude_regexes().collect(),
            RuleClass::Allow => rules.include_regexes().collect(),
            RuleClass::Prefix => rules.exclude_prefixes().iter().map(String::as_str).collect(),
            RuleClass::Substring => rules.exclude_substrings().iter().map(String::as_str).collect(),
        };
        println!("\n{} ({}):", class.label(), entries.len());
        for entry in entries {
            println!("  {entry}");
        }
    }
}
