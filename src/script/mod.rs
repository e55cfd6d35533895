//! Script table for narration.
//!
//! Each row describes one narrated clip: the series intro, where the
//! main text comes from, and the outro.

mod store;

pub use store::{ScriptEntry, ScriptError, ScriptStore, sample_entries};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::ContentKind;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_store_default_path() {
        let store = ScriptStore::new();
        let expected = dirs::home_dir()
            .unwrap()
            .join(".reelcut-rs")
            .join("audio.json");
        assert_eq!(store.path(), expected);
    }

    #[test]
    fn test_store_custom_path() {
        let path = PathBuf::from("/tmp/custom/audio.json");
        let store = ScriptStore::with_path(path.clone());
        assert_eq!(store.path(), path);
    }

    #[test]
    fn test_load_missing_file_gives_samples() {
        let temp_dir = TempDir::new().unwrap();
        let store = ScriptStore::with_path(temp_dir.path().join("audio.json"));

        let entries = store.load();
        assert_eq!(entries, sample_entries());
        assert_eq!(entries.len(), 2);
        assert!(entries[0].ai);
        assert!(!entries[1].ai);
    }

    #[test]
    fn test_load_corrupt_file_gives_samples() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("audio.json");
        std::fs::write(&path, "{ not json").unwrap();

        let store = ScriptStore::with_path(path);
        assert_eq!(store.load(), sample_entries());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let store = ScriptStore::with_path(temp_dir.path().join("nested").join("audio.json"));

        let entry = ScriptEntry {
            series: "Misterios".to_string(),
            part: "2".to_string(),
            text: "Hola".to_string(),
            ..ScriptEntry::default()
        };
        store.save(std::slice::from_ref(&entry)).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, vec![entry]);
    }

    #[test]
    fn test_serialized_column_names() {
        let json = serde_json::to_value(ScriptEntry::default()).unwrap();
        for key in ["IA", "textAI", "randomVideo", "tipo", "etiquetas", "series", "seed"] {
            assert!(json.get(key).is_some(), "missing column {key}");
        }
        assert_eq!(json["tipo"], "Historia");
        assert_eq!(json["seed"], "random");
        assert_eq!(json["part"], "1");
    }

    #[test]
    fn test_missing_columns_take_defaults() {
        let entries: Vec<ScriptEntry> =
            serde_json::from_str(r#"[{"series": "Viejo", "text": "Sin tipo"}]"#).unwrap();

        assert_eq!(entries[0].kind, "Historia");
        assert_eq!(entries[0].tags, "");
        assert_eq!(entries[0].content_kind(), ContentKind::Historia);
        assert!(!entries[0].ai);
    }

    #[test]
    fn test_lenient_columns() {
        let entries: Vec<ScriptEntry> = serde_json::from_str(
            r#"[{"series": "S", "part": 3, "seed": 0, "IA": "True", "randomVideo": "false", "tipo": "Chisme"}]"#,
        )
        .unwrap();

        let entry = &entries[0];
        assert_eq!(entry.part, "3");
        assert_eq!(entry.seed, "0");
        assert!(entry.ai);
        assert!(!entry.random_video);
        assert_eq!(entry.content_kind(), ContentKind::Chisme);
    }

    #[test]
    fn test_add_entry_appends_blank_row() {
        let temp_dir = TempDir::new().unwrap();
        let store = ScriptStore::with_path(temp_dir.path().join("audio.json"));

        let count = store.add_entry().unwrap();
        assert_eq!(count, 3);

        let entries = store.load();
        assert_eq!(entries[2], ScriptEntry::default());
        assert_eq!(entries[2].seed, "random");
        assert_eq!(entries[2].part, "1");
    }

    #[test]
    fn test_import_replaces_table() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("import.json");
        std::fs::write(&source, r#"[{"series": "Importada", "text": "x"}]"#).unwrap();

        let store = ScriptStore::with_path(temp_dir.path().join("audio.json"));
        store.save(&sample_entries()).unwrap();

        assert_eq!(store.import(&source).unwrap(), 1);
        let entries = store.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].series, "Importada");
    }

    #[test]
    fn test_import_invalid_file_keeps_table() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("import.json");
        std::fs::write(&source, "[1, 2").unwrap();

        let store = ScriptStore::with_path(temp_dir.path().join("audio.json"));
        store.save(&sample_entries()).unwrap();

        assert!(store.import(&source).is_err());
        assert_eq!(store.load().len(), 2);
    }

    #[test]
    fn test_entry_lookup_is_one_based() {
        let entries = sample_entries();
        assert_eq!(ScriptStore::entry(&entries, 1).unwrap().series, entries[0].series);
        assert!(matches!(
            ScriptStore::entry(&entries, 0),
            Err(ScriptError::OutOfRange { index: 0, total: 2 })
        ));
        assert!(ScriptStore::entry(&entries, 3).is_err());
    }

    #[test]
    fn test_intro_text() {
        let entry = ScriptEntry {
            series: "Mi serie".to_string(),
            part: "4".to_string(),
            ..ScriptEntry::default()
        };
        assert_eq!(entry.intro(), "Mi serie, parte 4");
    }
}
