//! CLI argument parsing and validation.

mod args;

pub use args::{
    Args, Command, DumpArgs, EntriesAction, EntriesArgs, NarrateArgs, PingArgs, ProcessArgs,
    ReportArgs, SelectionArgs, ShortsArgs, SpeedParseError, parse_speed,
};

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::path::PathBuf;

    // ===========================================
    // parse_speed tests
    // ===========================================

    #[test]
    fn test_parse_speed_valid() {
        assert_eq!(parse_speed("1.0"), Ok(1.0));
        assert_eq!(parse_speed(" 0.5 "), Ok(0.5));
        assert_eq!(parse_speed("2"), Ok(2.0));
    }

    #[test]
    fn test_parse_speed_out_of_range() {
        assert_eq!(parse_speed("2.5"), Err(SpeedParseError::OutOfRange(2.5)));
        assert_eq!(parse_speed("0.1"), Err(SpeedParseError::OutOfRange(0.1)));
    }

    #[test]
    fn test_parse_speed_not_a_number() {
        assert!(matches!(
            parse_speed("rapido"),
            Err(SpeedParseError::Invalid(_))
        ));
    }

    // ===========================================
    // Subcommand parsing tests
    // ===========================================

    #[test]
    fn test_shorts_defaults() {
        let args = Args::try_parse_from(["reelcut-rs", "shorts", "a.mp4", "b.mp4"]).unwrap();
        assert!(!args.verbose);

        let Command::Shorts(shorts) = args.command else {
            panic!("expected shorts subcommand");
        };
        assert_eq!(shorts.videos, vec![PathBuf::from("a.mp4"), PathBuf::from("b.mp4")]);
        assert_eq!(shorts.output, PathBuf::from("Cortos"));
        assert!(shorts.cache_dir.is_none());
        assert_eq!(shorts.selection.threshold, 0.3);

        let config = shorts.selection.to_config();
        assert_eq!(config.min_scene, 10.0);
        assert_eq!(config.max_scene, 30.0);
        assert_eq!(config.margin, 5.0);
        assert_eq!(config.seconds_per_sample, 20.0);
    }

    #[test]
    fn test_shorts_requires_a_video() {
        assert!(Args::try_parse_from(["reelcut-rs", "shorts"]).is_err());
    }

    #[test]
    fn test_shorts_custom_selection() {
        let args = Args::try_parse_from([
            "reelcut-rs",
            "-v",
            "shorts",
            "--min-scene",
            "5",
            "--max-scene",
            "20",
            "--margin",
            "2.5",
            "--threshold",
            "0.4",
            "clip.mp4",
        ])
        .unwrap();
        assert!(args.verbose);

        let Command::Shorts(shorts) = args.command else {
            panic!("expected shorts subcommand");
        };
        let config = shorts.selection.to_config();
        assert_eq!(config.min_scene, 5.0);
        assert_eq!(config.max_scene, 20.0);
        assert_eq!(config.margin, 2.5);
        assert_eq!(shorts.selection.threshold, 0.4);
    }

    #[test]
    fn test_process_defaults() {
        let args = Args::try_parse_from(["reelcut-rs", "process", "--verbose"]).unwrap();
        assert!(args.verbose);

        let Command::Process(process) = args.command else {
            panic!("expected process subcommand");
        };
        assert_eq!(process.base_dir, PathBuf::from("."));
        assert_eq!(process.transcribe_url, "http://localhost:8000");
        assert_eq!(process.transcribe_model, "medium");
        assert!(process.language.is_none());
        assert!(process.target_language.is_none());
        assert_eq!(process.llm_url, "https://api.openai.com");
        assert!(!process.skip_subtitles);
    }

    #[test]
    fn test_process_with_translation() {
        let args = Args::try_parse_from([
            "reelcut-rs",
            "process",
            "-l",
            "es",
            "-t",
            "en",
            "--api-key",
            "sk-test",
        ])
        .unwrap();

        let Command::Process(process) = args.command else {
            panic!("expected process subcommand");
        };
        assert_eq!(process.language.as_deref(), Some("es"));
        assert_eq!(process.target_language.as_deref(), Some("en"));
        assert_eq!(process.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_process_skip_subtitles_with_language() {
        let args = Args::try_parse_from([
            "reelcut-rs",
            "process",
            "-b",
            "/videos",
            "-l",
            "es",
            "--skip-subtitles",
        ])
        .unwrap();

        let Command::Process(process) = args.command else {
            panic!("expected process subcommand");
        };
        assert_eq!(process.base_dir, PathBuf::from("/videos"));
        assert_eq!(process.language.as_deref(), Some("es"));
        assert!(process.skip_subtitles);
    }

    #[test]
    fn test_narrate_defaults() {
        let args = Args::try_parse_from(["reelcut-rs", "narrate"]).unwrap();

        let Command::Narrate(narrate) = args.command else {
            panic!("expected narrate subcommand");
        };
        assert_eq!(narrate.voice, "es-BO-MarceloNeural");
        assert_eq!(narrate.speed, 1.0);
        assert_eq!(narrate.backend_url, "http://localhost:5050");
        assert_eq!(narrate.output, PathBuf::from("audios_generados"));
        assert_eq!(narrate.llm_url, "https://api.openai.com");
        assert!(narrate.index.is_none());
        assert!(!narrate.list_voices);
    }

    #[test]
    fn test_narrate_rejects_bad_speed() {
        let result = Args::try_parse_from(["reelcut-rs", "narrate", "--speed", "3.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_narrate_single_entry() {
        let args = Args::try_parse_from([
            "reelcut-rs",
            "narrate",
            "-i",
            "2",
            "--voice",
            "es-MX-JorgeNeural",
            "-s",
            "1.25",
        ])
        .unwrap();

        let Command::Narrate(narrate) = args.command else {
            panic!("expected narrate subcommand");
        };
        assert_eq!(narrate.index, Some(2));
        assert_eq!(narrate.voice, "es-MX-JorgeNeural");
        assert_eq!(narrate.speed, 1.25);
    }

    #[test]
    fn test_entries_actions() {
        let args = Args::try_parse_from(["reelcut-rs", "entries", "list"]).unwrap();
        let Command::Entries(entries) = args.command else {
            panic!("expected entries subcommand");
        };
        assert_eq!(entries.action, EntriesAction::List);
        assert!(entries.entries.is_none());

        let args = Args::try_parse_from([
            "reelcut-rs",
            "entries",
            "--entries",
            "tabla.json",
            "import",
            "nuevo.json",
        ])
        .unwrap();
        let Command::Entries(entries) = args.command else {
            panic!("expected entries subcommand");
        };
        assert_eq!(entries.entries, Some(PathBuf::from("tabla.json")));
        assert_eq!(
            entries.action,
            EntriesAction::Import {
                file: PathBuf::from("nuevo.json")
            }
        );
    }

    #[test]
    fn test_report_defaults_to_current_folder() {
        let args = Args::try_parse_from(["reelcut-rs", "report"]).unwrap();
        let Command::Report(report) = args.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(report.inputs, vec![PathBuf::from(".")]);

        let args = Args::try_parse_from(["reelcut-rs", "report", "a.csv", "Descargas"]).unwrap();
        let Command::Report(report) = args.command else {
            panic!("expected report subcommand");
        };
        assert_eq!(
            report.inputs,
            vec![PathBuf::from("a.csv"), PathBuf::from("Descargas")]
        );
    }

    #[test]
    fn test_dump_args() {
        let args = Args::try_parse_from([
            "reelcut-rs",
            "dump",
            "proyecto",
            "-o",
            "salida.txt",
            "--exclude-dir",
            "Gestion",
            "--exclude-dir",
            "FEL",
            "--exclude-ext",
            ".csv",
        ])
        .unwrap();

        let Command::Dump(dump) = args.command else {
            panic!("expected dump subcommand");
        };
        assert_eq!(dump.root, PathBuf::from("proyecto"));
        assert_eq!(dump.output, PathBuf::from("salida.txt"));
        assert_eq!(dump.exclude_dirs, vec!["Gestion", "FEL"]);
        assert_eq!(dump.exclude_extensions, vec![".csv"]);
        assert!(!dump.no_default_excludes);
    }

    #[test]
    fn test_dump_requires_root() {
        assert!(Args::try_parse_from(["reelcut-rs", "dump"]).is_err());
    }

    #[test]
    fn test_ping_defaults() {
        let args = Args::try_parse_from(["reelcut-rs", "ping"]).unwrap();
        let Command::Ping(ping) = args.command else {
            panic!("expected ping subcommand");
        };
        assert_eq!(ping.host, "google.com");
        assert_eq!(ping.interval, 10);
        assert!(ping.max_attempts.is_none());
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(Args::try_parse_from(["reelcut-rs"]).is_err());
    }
}
