//! reelcut-rs CLI entry point.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use reelcut_rs::backend::{Backend, HttpBackend, filter_voices};
use reelcut_rs::cli::{
    Args, Command, DumpArgs, EntriesAction, EntriesArgs, NarrateArgs, PingArgs, ProcessArgs,
    ReportArgs, SelectionArgs, ShortsArgs,
};
use reelcut_rs::dump::{DumpFilter, dump_project};
use reelcut_rs::engine::{Folders, NarrationEngine, ShortsPipeline, VideoBatch};
use reelcut_rs::ffmpeg::Ffmpeg;
use reelcut_rs::llm::OpenAiGenerator;
use reelcut_rs::ping::{PingCheck, wait_for_connection};
use reelcut_rs::report::{csv_files, pdf_path_for, write_report};
use reelcut_rs::scenes::{FfmpegSceneDetector, SceneCache};
use reelcut_rs::script::{ScriptEntry, ScriptStore};
use reelcut_rs::transcribe::HttpTranscriber;

fn main() -> Result<()> {
    dotenv().ok();
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    let started = Local::now();
    info!("Started at {}", started.format("%Y-%m-%d %H:%M:%S"));

    let result = match args.command {
        Command::Shorts(shorts) => run_shorts(shorts),
        Command::Process(process) => run_process(process),
        Command::Narrate(narrate) => run_narrate(narrate),
        Command::Entries(entries) => run_entries(entries),
        Command::Report(report) => run_report(report),
        Command::Dump(dump) => run_dump(dump),
        Command::Ping(ping) => run_ping(ping),
    };

    let finished = Local::now();
    info!(
        "Finished at {} ({}s)",
        finished.format("%Y-%m-%d %H:%M:%S"),
        (finished - started).num_seconds()
    );

    result
}

fn shorts_pipeline(
    selection: &SelectionArgs,
    cache: SceneCache,
) -> Result<ShortsPipeline<FfmpegSceneDetector, Ffmpeg>> {
    let config = selection.to_config();
    config.validate().context("Invalid scene settings")?;

    let detector = FfmpegSceneDetector::new(Ffmpeg::new(), selection.threshold);
    Ok(ShortsPipeline::new(detector, Ffmpeg::new(), cache, config))
}

fn run_shorts(args: ShortsArgs) -> Result<()> {
    let cache = match args.cache_dir {
        Some(dir) => SceneCache::with_dir(dir),
        None => SceneCache::sidecar(),
    };
    let pipeline = shorts_pipeline(&args.selection, cache)?;

    let mut failed = 0;
    for video in &args.videos {
        match pipeline.create_short(video, &args.output) {
            Ok(report) => {
                println!("Short saved to: {}", report.output.display());
                println!("  Segments: {}", report.segments.len());
                println!(
                    "  Duration: {:.2}s (target {:.2}s)",
                    report.total_duration, report.target_duration
                );
                println!(
                    "  Coverage: {:.1}% to {:.1}%",
                    report.coverage.0, report.coverage.1
                );
            }
            Err(e) => {
                error!("Could not create short for {}: {}", video.display(), e);
                failed += 1;
            }
        }
    }

    if failed == args.videos.len() {
        bail!("No short could be created");
    }
    Ok(())
}

fn run_process(args: ProcessArgs) -> Result<()> {
    let pipeline = shorts_pipeline(&args.selection, SceneCache::sidecar())?;
    let transcriber = HttpTranscriber::new(
        &args.transcribe_url,
        &args.transcribe_model,
        args.transcribe_api_key,
    );

    let mut batch = VideoBatch::new(pipeline, transcriber, Folders::under(&args.base_dir))
        .with_language(args.language);
    if let Some(target) = args.target_language {
        let translator = OpenAiGenerator::new(&args.llm_url, llm_api_key(args.api_key));
        if !translator.has_api_key() {
            warn!("No API key configured, subtitles will stay untranslated");
        }
        batch = batch.with_translation(Box::new(translator), target);
    }
    let summary = batch
        .run(args.skip_subtitles)
        .with_context(|| format!("Failed to process {}", args.base_dir.display()))?;

    println!("Subtitled: {}", summary.subtitled);
    println!("Already processed: {}", summary.skipped);
    println!("Failed: {}", summary.failed);
    println!(
        "Shorts: {} created, {} failed",
        summary.shorts, summary.shorts_failed
    );
    Ok(())
}

fn llm_api_key(arg: Option<String>) -> Option<String> {
    arg.or_else(|| std::env::var("OPENAI_API_KEY").ok())
}

fn script_store(path: Option<PathBuf>) -> ScriptStore {
    match path {
        Some(path) => ScriptStore::with_path(path),
        None => ScriptStore::new(),
    }
}

fn run_narrate(args: NarrateArgs) -> Result<()> {
    let backend = HttpBackend::new(&args.backend_url);

    if args.list_voices {
        let voices = backend.list_voices().context("Failed to list voices")?;
        let voices = filter_voices(voices.voices, "es-");
        if voices.is_empty() {
            println!("No Spanish voices found.");
            return Ok(());
        }

        println!("Available voices:");
        for (i, voice) in voices.iter().enumerate() {
            println!("  {}. {} ({})", i + 1, voice.short_name, voice.gender);
        }
        return Ok(());
    }

    match backend.health() {
        Ok(health) => info!("TTS server status: {}", health.status),
        Err(e) => warn!("TTS server health check failed: {}", e),
    }

    let store = script_store(args.entries);
    let entries = store.load();

    let generator = OpenAiGenerator::new(&args.llm_url, llm_api_key(args.api_key));
    if !generator.has_api_key() && entries.iter().any(|e| e.ai) {
        warn!("No API key configured, entries with IA enabled will fail");
    }

    let mut engine = NarrationEngine::new(backend, generator, args.output);

    match args.index {
        Some(index) => {
            let path = engine
                .render_entry(&entries, index, &args.voice, args.speed)
                .with_context(|| format!("Failed to narrate entry {index}"))?;
            println!("Audio saved to: {}", path.display());
        }
        None => {
            let written = engine.render_all(&entries, &args.voice, args.speed);
            for path in &written {
                println!("Audio saved to: {}", path.display());
            }
            if written.is_empty() && !entries.is_empty() {
                bail!("No entry could be narrated");
            }
        }
    }

    Ok(())
}

fn print_entry(index: usize, entry: &ScriptEntry) {
    let source = if entry.ai {
        format!("IA: {}", entry.text_ai)
    } else {
        entry.text.clone()
    };
    println!("{:>3}. {}", index, entry.intro());
    println!("     {} [{}] {}", entry.kind, entry.tags, source);
}

fn run_entries(args: EntriesArgs) -> Result<()> {
    let store = script_store(args.entries);

    match args.action {
        EntriesAction::List => {
            let entries = store.load();
            println!("{} ({} entries)", store.path().display(), entries.len());
            for (i, entry) in entries.iter().enumerate() {
                print_entry(i + 1, entry);
            }
        }
        EntriesAction::Add => {
            let count = store.add_entry().context("Failed to add entry")?;
            println!("Entry {} added to {}", count, store.path().display());
        }
        EntriesAction::Import { file } => {
            let count = store
                .import(&file)
                .with_context(|| format!("Failed to import {}", file.display()))?;
            println!("{} entries imported into {}", count, store.path().display());
        }
    }

    Ok(())
}

fn run_report(args: ReportArgs) -> Result<()> {
    let mut inputs = Vec::new();
    for path in &args.inputs {
        if path.is_dir() {
            let found = csv_files(path)
                .with_context(|| format!("Failed to list {}", path.display()))?;
            info!("{} CSV files found in {}", found.len(), path.display());
            inputs.extend(found);
        } else {
            inputs.push(path.clone());
        }
    }

    if inputs.is_empty() {
        println!("No CSV files found.");
        return Ok(());
    }

    let mut failed = 0;
    for csv in &inputs {
        match write_report(csv, &pdf_path_for(csv)) {
            Ok(summary) => {
                println!("Report saved to: {}", summary.output.display());
                println!(
                    "  Transactions: {}, months: {}, pages: {}",
                    summary.transactions, summary.months, summary.pages
                );
            }
            Err(e) => {
                error!("Could not build report for {}: {}", csv.display(), e);
                failed += 1;
            }
        }
    }

    if failed == inputs.len() {
        bail!("No report could be created");
    }
    Ok(())
}

fn run_dump(args: DumpArgs) -> Result<()> {
    let defaults = if args.no_default_excludes {
        DumpFilter::empty()
    } else {
        DumpFilter::default()
    };
    let filter = defaults
        .with_dirs(args.exclude_dirs)
        .with_extensions(args.exclude_extensions);

    let mut text = Vec::new();
    let stats = dump_project(&args.root, &filter, &mut text)
        .with_context(|| format!("Failed to dump {}", args.root.display()))?;
    std::fs::write(&args.output, text)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!("Dump saved to: {}", args.output.display());
    println!(
        "  Folders: {}, files: {}, unreadable: {}",
        stats.dirs, stats.files, stats.unreadable
    );
    Ok(())
}

fn run_ping(args: PingArgs) -> Result<()> {
    let check = PingCheck::new(args.host);
    println!("Waiting for a connection to {}", check.host());

    let attempts = wait_for_connection(
        &check,
        Duration::from_secs(args.interval),
        args.max_attempts,
    )
    .context("Connection wait failed")?;

    // Terminal bell
    println!("\x07Connection detected after {} attempt(s)", attempts);
    Ok(())
}
