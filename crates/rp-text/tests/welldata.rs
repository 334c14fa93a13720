use std::io::Cursor;

use rp_core::date;
use rp_profiles::{DateAxis, Profiles, ProfilesError};
use rp_text::{TextError, read_welldata, read_welldata_file, write_welldata, write_welldata_file};

fn sample() -> Profiles {
    let axis = DateAxis::from_dates([date(2020, 1, 1).unwrap(), date(2020, 2, 1).unwrap()]);
    let mut p = axis.new_profiles("CASE", true).unwrap();
    p.set_vector("WOPR", vec![100.0, 90.0], Some("A"), Some(1), Some("SM3/D"))
        .unwrap();
    p.set_vector("WBHP", vec![250.0, 240.0], Some("A"), Some(1), Some("BARS"))
        .unwrap();
    p.set_vector("WOPR", vec![50.0, 40.0], Some("B"), Some(2), Some("SM3/D"))
        .unwrap();
    p.set_vector("WEFF", vec![1.0, 1.0], Some("B"), Some(2), Some(""))
        .unwrap();
    p
}

fn written(p: &Profiles) -> String {
    let mut out = Vec::new();
    write_welldata(p, &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn writes_rows_per_well_and_step() {
    let text = written(&sample());
    let lines: Vec<&str> = text.lines().map(str::trim_end).collect();
    assert_eq!(lines[0], "# Backwards constant");
    assert_eq!(lines[1], "#");
    assert_eq!(lines[2], "WELL      DATE  WOPR  WEFF  WBHP");
    assert_eq!(lines[3], "\"\"        \"\"    SM3/D  \"\"  BARS");
    assert_eq!(lines[4], "\"A\"  01.01.2020  100  0  250");
    assert_eq!(lines[7], "\"B\"  01.02.2020  40  1  0");
    assert_eq!(lines.len(), 8);
}

#[test]
fn reads_back_written_data() {
    let p = read_welldata(Cursor::new(written(&sample()))).unwrap();
    assert_eq!(p.id.as_deref(), Some("TEXT"));
    assert!(p.backwards);
    assert_eq!(p.get_time().unwrap(), &[0.0, 31.0]);

    let a = p.get_vector("WOPR", Some("A"), None).unwrap();
    assert_eq!(a.num(), 1);
    assert_eq!(a.unit(), "SM3/D");
    assert_eq!(a.data(), &[100.0, 90.0]);
    assert_eq!(p.get_vector("WOPR", Some("B"), None).unwrap().num(), 2);

    // linear resampling is zero at the first sample
    let bhp = p.get_vector("WBHP", Some("A"), None).unwrap();
    assert_eq!(bhp.unit(), "BARS");
    assert_eq!(bhp.data(), &[0.0, 240.0]);
    assert_eq!(p.get_vector("WEFF", Some("B"), None).unwrap().unit(), "");
}

#[test]
fn forwards_header_and_quoted_names() {
    let text = "# Forwards constant\n#\nWELL DATE WOPT WBHP\n\"\" \"\" SM3 BARS\n\
                \"OP 1\", 01.01.2021, 0, 200\n'OP 1' 11.01.2021 500 190 # note\n";
    let p = read_welldata(Cursor::new(text)).unwrap();
    assert!(!p.backwards);
    let cum = p.get_vector("WOPT", Some("OP 1"), None).unwrap();
    assert_eq!(cum.data(), &[0.0, 500.0]);
    assert_eq!(p.well_names(), vec!["OP 1".to_string()]);
}

#[test]
fn rejects_malformed_input() {
    let cases = [
        ("WELL DATE WXYZ\n", 1),
        ("WELL DATE WOPR\n\"\" SM3/D\n", 2),
        ("WELL DATE WOPR\n\"\" \"\" SM3/D\n\"A\" 01.01.2020\n", 3),
        ("WELL DATE WOPR\n\"\" \"\" SM3/D\n\"A\" 2020-01-01 1\n", 3),
        ("WELL DATE WOPR\n\"\" \"\" SM3/D\n\"A\" 01.01.2020 x\n", 3),
        ("\"A\" 01.01.2020 1\n", 1),
        ("WELL DATE WOPR\n\"\" \"\" SM3/D\n\"A 01.01.2020 1\n", 3),
    ];
    for (text, expected) in cases {
        match read_welldata(Cursor::new(text)) {
            Err(TextError::Parse { line, .. }) => assert_eq!(line, expected, "{text}"),
            other => panic!("unexpected {other:?} for {text}"),
        }
    }
    assert!(matches!(
        read_welldata(Cursor::new("# Backwards\nWELL DATE WOPR\n\"\" \"\" SM3/D\n")),
        Err(TextError::NoData)
    ));
}

#[test]
fn writing_requires_calendar_vectors() {
    let mut p = Profiles::new(None);
    p.set_vector("WOPR", vec![1.0], Some("A"), None, None).unwrap();
    let mut out = Vec::new();
    match write_welldata(&p, &mut out) {
        Err(TextError::Profiles(ProfilesError::MissingVector { keyword })) => {
            assert_eq!(keyword, "DAY")
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wells.txt");
    write_welldata_file(&sample(), &path).unwrap();
    let p = read_welldata_file(&path).unwrap();
    assert_eq!(p.step_count(), 2);
    assert_eq!(p.well_names(), vec!["A".to_string(), "B".to_string()]);
}
