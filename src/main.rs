// main.rs - CLI entry point

use indicatif::ProgressBar;
use std::time::Instant;
use strprofiler::cli::Config;
use strprofiler::core::compare_cohort_with_progress;
use strprofiler::output::timestamp;
use strprofiler::prelude::*;

fn main() {
    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<()> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        println!("\n💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    // Validate all arguments
    let settings = validate_args(&args)?;

    println!("🚀 strprofiler v{}", strprofiler::VERSION);

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| {
                ProfilerError::Config(format!("Failed to configure thread pool: {}", e))
            })?;
        println!("🧵 Threads: {}", n);
    } else {
        let num_threads = rayon::current_num_threads();
        println!("🧵 Threads: {} (auto-detected)", num_threads);
    }

    let total_start = Instant::now();

    // Run log shares the tables' stamp and stays in memory until they are written
    let stamp = timestamp();
    let mut run_log = if args.dry_run {
        None
    } else {
        let mut log = RunLog::buffered(&settings.output_dir, &stamp);
        let sample_map_name = settings
            .sample_map
            .as_ref()
            .map(|p| p.display().to_string());
        log.parameters(&settings.ingest, &settings.scoring, sample_map_name.as_deref())?;
        log.command(&command_line)?;
        Some(log)
    };

    // Load inputs
    let sample_map = match &settings.sample_map {
        Some(path) => {
            let map = SampleMap::from_file(path)?;
            if map.is_empty() {
                println!("⚠️  Sample map {} has no entries, names are kept as-is", path.display());
            } else {
                println!("🏷️  Sample map: {} entries from {}", map.len(), path.display());
            }
            Some(map)
        }
        None => None,
    };

    let tables = settings
        .input_files
        .iter()
        .map(|path| load_table(path))
        .collect::<Result<Vec<_>>>()?;

    let cohort = canonicalize(&tables, &settings.ingest, sample_map.as_ref())?;
    println!(
        "✅ Canonicalized {} samples across {} markers from {} file(s)",
        cohort.len(),
        cohort.marker_names.len(),
        tables.len()
    );
    cohort.print_statistics("canonical");

    if args.dry_run {
        println!("✅ Dry run completed successfully");
        return Ok(());
    }

    if cohort.is_empty() {
        return Err(ProfilerError::format(
            settings
                .input_files
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", "),
            "no samples found",
        ));
    }

    println!(
        "\n🎯 Scoring: Tanabe ≥ {}, Masters query ≥ {}, Masters reference ≥ {}, mix threshold {}{}",
        settings.scoring.tan_threshold,
        settings.scoring.mas_q_threshold,
        settings.scoring.mas_r_threshold,
        settings.scoring.mix_threshold,
        if settings.scoring.use_amel {
            ", amelogenin scored"
        } else {
            ""
        }
    );

    let pb = ProgressBar::new(cohort.len() as u64);
    let comparisons = compare_cohort_with_progress(&cohort, &settings.scoring, &pb);
    let summaries = summarize_cohort(&comparisons, &settings.scoring);

    if let Some(log) = run_log.as_mut() {
        for query in cohort.sample_ids() {
            for reference in cohort.sample_ids().filter(|r| *r != query) {
                log.comparison(query, reference)?;
            }
        }
    }

    let mixed = summaries.iter().filter(|s| s.mixed).count();
    if mixed > 0 {
        println!("⚠️  {} sample(s) flagged as potentially mixed", mixed);
    }

    let written = write_reports(
        &settings.output_dir,
        &stamp,
        &cohort.marker_names,
        &comparisons,
        &summaries,
    )?;

    if let Some(mut log) = run_log {
        log.note(&format!("\nWrote {} files:", written.len()))?;
        for path in &written {
            log.note(&path.display().to_string())?;
        }
        let log_path = log.persist()?;
        println!("📝 Run log: {}", log_path.display());
    }

    println!(
        "🏁 Completed in {:.2}s",
        total_start.elapsed().as_secs_f64()
    );
    Ok(())
}
