use autoretime::error::RetimeError;
use autoretime::events::{
    load_frames, load_track, read_frames, read_track, save_track, shift_events, Event, Frame,
    TimecodeScale, TrackFormat,
};
use std::io::{Cursor, Write};
use strum::IntoEnumIterator;
use tempfile::{Builder, NamedTempFile};

fn temp_with_ext(ext: &str) -> NamedTempFile {
    Builder::new().suffix(ext).tempfile().unwrap()
}

// --- CSV ---

#[test]
fn test_loader_parses_csv_with_comment_column() {
    let mut file = temp_with_ext(".csv");
    writeln!(file, "start,end,is_comment").unwrap();
    writeln!(file, "0,1000,false").unwrap();
    writeln!(file, " 1500 , 2000 , true ").unwrap();

    let events = load_track(file.path()).unwrap();
    assert_eq!(events, vec![Event::new(0, 1000), Event::comment(1500, 2000)]);
}

#[test]
fn test_loader_defaults_missing_comment_column() {
    let data = "start,end\n10,20\n30,40\n";
    let events = read_track(Cursor::new(data), TrackFormat::Csv).unwrap();
    assert_eq!(events, vec![Event::new(10, 20), Event::new(30, 40)]);
}

#[test]
fn test_loader_rejects_garbage_csv() {
    let data = "start,end\nabc,20\n";
    let res = read_track(Cursor::new(data), TrackFormat::Csv);
    assert!(matches!(res, Err(RetimeError::Csv(_))));
}

// --- JSON ---

#[test]
fn test_loader_parses_json_array() {
    let mut file = temp_with_ext(".json");
    write!(
        file,
        r#"[{{"start": 0, "end": 100}}, {{"start": 50, "end": 150, "is_comment": true}}]"#
    )
    .unwrap();

    let events = load_track(file.path()).unwrap();
    assert_eq!(events, vec![Event::new(0, 100), Event::comment(50, 150)]);
}

#[test]
fn test_loader_rejects_malformed_json() {
    let res = read_track(Cursor::new("[{\"start\": 1}"), TrackFormat::Json);
    assert!(matches!(res, Err(RetimeError::Json(_))));
}

// --- VALIDATION ---

#[test]
fn test_loader_rejects_backwards_events() {
    let data = "start,end\n0,10\n500,400\n";
    let res = read_track(Cursor::new(data), TrackFormat::Csv);
    match res {
        Err(RetimeError::Validation(msg)) => assert!(msg.contains("#1")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let file = temp_with_ext(".ass");
    let res = load_track(file.path());
    assert!(matches!(res, Err(RetimeError::UnsupportedFormat(_))));
}

#[test]
fn test_format_from_extension_is_case_insensitive() {
    assert_eq!(TrackFormat::from_path("a/b/track.JSON").unwrap(), TrackFormat::Json);
    assert_eq!(TrackFormat::from_path("track.csv").unwrap(), TrackFormat::Csv);
    assert!(TrackFormat::from_path("no_extension").is_err());
}

#[test]
fn test_missing_file_is_io_error() {
    let res = load_track("/definitely/not/here.csv");
    assert!(matches!(res, Err(RetimeError::Io(_))));
}

// --- SAVE / SHIFT ---

#[test]
fn test_save_then_load_each_format() {
    let events = vec![
        Event::new(-200, 100),
        Event::comment(300, 300),
        Event::new(1000, 4000),
    ];
    for format in TrackFormat::iter() {
        let file = temp_with_ext(&format!(".{}", format));
        save_track(file.path(), &events).unwrap();
        assert_eq!(load_track(file.path()).unwrap(), events, "{}", format);
    }
}

#[test]
fn test_shift_rounds_to_nearest_ms() {
    let events = [Event::new(1000, 2000), Event::comment(0, 10)];
    assert_eq!(
        shift_events(&events, -499.6),
        vec![Event::new(500, 1500), Event::comment(-500, -490)]
    );
    assert_eq!(shift_events(&events, 0.4), events.to_vec());
}

// --- CONTAINER TIMESTAMPS ---

#[test]
fn test_default_timecode_scale_maps_seconds_to_ms() {
    let scale = TimecodeScale::default();
    assert_eq!(scale.factor(), 1000.0);
    assert_eq!(scale.to_event(1.5, 2.25), Event::new(1500, 3750));
}

#[test]
fn test_custom_timecode_scale_truncates() {
    let scale = TimecodeScale::from_nanos(500_000);
    assert_eq!(scale.to_event(3.3333, 1.0), Event::new(1666, 2166));
}

#[test]
fn test_frames_file_is_rescaled_into_events() {
    let mut file = temp_with_ext(".csv");
    writeln!(file, "timestamp,duration").unwrap();
    writeln!(file, "1.5,0.75").unwrap();
    writeln!(file, "10.0,2.0").unwrap();

    let events = load_frames(file.path(), TimecodeScale::default()).unwrap();
    assert_eq!(events, vec![Event::new(1500, 2250), Event::new(10_000, 12_000)]);
}

#[test]
fn test_frames_json_with_custom_scale() {
    let mut file = temp_with_ext(".json");
    write!(file, r#"[{{"timestamp": 2.0, "duration": 1.0}}]"#).unwrap();

    let events = load_frames(file.path(), TimecodeScale::from_nanos(500_000)).unwrap();
    assert_eq!(events, vec![Event::new(1000, 1500)]);
}

#[test]
fn test_frames_reject_negative_duration() {
    let data = "timestamp,duration\n1.0,0.5\n2.0,-0.5\n";
    match read_frames(Cursor::new(data), TrackFormat::Csv) {
        Err(RetimeError::Validation(msg)) => assert!(msg.contains("#1")),
        other => panic!("expected validation error, got {:?}", other),
    }
}

#[test]
fn test_read_frames_keeps_raw_seconds() {
    let data = "timestamp,duration\n0.25,0.5\n";
    let frames = read_frames(Cursor::new(data), TrackFormat::Csv).unwrap();
    assert_eq!(
        frames,
        vec![Frame {
            timestamp: 0.25,
            duration: 0.5
        }]
    );
}
