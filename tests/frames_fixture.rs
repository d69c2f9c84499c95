use stepreel::{Directive, FrameLog, FrameRecord, Step, build_manifest, write_manifest};

#[test]
fn fixture_parses_in_order() {
    let s = include_str!("data/frames.json");
    let recs: Vec<FrameRecord> = FrameLog::from_reader(s.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    let steps: Vec<Step> = recs.iter().map(|r| r.step).collect();
    assert_eq!(steps, vec![Step::Int(0), Step::Int(5), Step::Int(12)]);
}

#[test]
fn fixture_renders_expected_manifest() {
    let s = include_str!("data/frames.json");
    let mut out = Vec::new();
    let frames = write_manifest(FrameLog::from_reader(s.as_bytes()), &mut out).unwrap();
    assert_eq!(frames, 3);
    assert_eq!(
        String::from_utf8(out).unwrap(),
        include_str!("data/expected_concatfile")
    );
}

#[test]
fn first_file_is_never_preceded_by_duration() {
    let s = include_str!("data/frames.json");
    let recs: Vec<FrameRecord> = FrameLog::from_reader(s.as_bytes())
        .collect::<Result<_, _>>()
        .unwrap();
    let d = build_manifest(&recs).unwrap();
    assert_eq!(d[0], Directive::File("f0.png".to_string()));
}
