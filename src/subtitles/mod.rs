//! Subtitle files: SRT formatting, parsing and sizing.

mod srt;

pub use srt::{
    SubtitleError, SubtitleSegment, format_timestamp, parse_srt, parse_timestamp, read_srt,
    render_srt, subtitle_font_size, write_srt,
};

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_format_timestamp() {
        assert_eq!(format_timestamp(0.0), "00:00:00,000");
        assert_eq!(format_timestamp(3661.5), "01:01:01,500");
        assert_eq!(format_timestamp(59.25), "00:00:59,250");
    }

    #[test]
    fn test_format_timestamp_clamps_negative() {
        assert_eq!(format_timestamp(-3.0), "00:00:00,000");
    }

    #[test]
    fn test_parse_timestamp_variants() {
        assert_eq!(parse_timestamp("00:01:02,500"), Some(62.5));
        assert_eq!(parse_timestamp("01:00:00.250"), Some(3600.25));
        assert_eq!(parse_timestamp("12.5"), Some(12.5));
        assert_eq!(parse_timestamp("aa:bb"), None);
    }

    #[test]
    fn test_render_srt_numbers_and_skips_blank() {
        let segments = vec![
            SubtitleSegment::new(0.0, 1.5, " Hola "),
            SubtitleSegment::new(1.5, 2.0, "   "),
            SubtitleSegment::new(2.0, 4.25, "Mundo"),
        ];

        assert_eq!(
            render_srt(&segments),
            "1\n00:00:00,000 --> 00:00:01,500\nHola\n\n\
             3\n00:00:02,000 --> 00:00:04,250\nMundo\n\n"
        );
    }

    #[test]
    fn test_parse_srt_joins_text_lines() {
        let content = "1\n00:00:01,000 --> 00:00:03,500\nFirst line\nsecond line\n\n\
                       2\n00:00:04,000 --> 00:00:05,000\nAnother\n";

        let segments = parse_srt(content);
        assert_eq!(
            segments,
            vec![
                SubtitleSegment::new(1.0, 3.5, "First line second line"),
                SubtitleSegment::new(4.0, 5.0, "Another"),
            ]
        );
    }

    #[test]
    fn test_parse_srt_handles_crlf_and_garbage() {
        let content = "garbage\r\n1\r\n00:00:00,500 --> 00:00:01,000\r\nHi\r\n\r\n";
        let segments = parse_srt(content);

        assert_eq!(segments, vec![SubtitleSegment::new(0.5, 1.0, "Hi")]);
    }

    #[test]
    fn test_write_then_read_srt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sub").join("clip.srt");
        let segments = vec![SubtitleSegment::new(0.0, 2.5, "Texto")];

        write_srt(&segments, &path).unwrap();
        let loaded = read_srt(&path).unwrap();

        assert_eq!(loaded, segments);
    }

    #[test]
    fn test_read_empty_srt_is_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.srt");
        std::fs::write(&path, "\n\n").unwrap();

        assert!(matches!(read_srt(&path), Err(SubtitleError::Empty(_))));
    }

    #[test]
    fn test_subtitle_font_size_clamps() {
        assert_eq!(subtitle_font_size(1920), 56);
        assert_eq!(subtitle_font_size(640), 30);
        assert_eq!(subtitle_font_size(3840), 82);
        assert_eq!(subtitle_font_size(0), 30);
    }
}
