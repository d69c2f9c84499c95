use std::path::{Path, PathBuf};

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_stepreel")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "stepreel.exe"
            } else {
                "stepreel"
            });
            p
        })
}

fn scratch(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("cli_smoke").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn run(dir: &Path) -> std::process::Output {
    std::process::Command::new(exe()).arg(dir).output().unwrap()
}

#[test]
fn cli_fails_without_frame_log() {
    let dir = scratch("no_log");
    let out = run(&dir);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("frame log not found"), "{stderr}");
}

#[test]
fn cli_fails_on_malformed_record_without_encoding() {
    let dir = scratch("bad_record");
    std::fs::write(
        dir.join("frames.json"),
        "{\"path\": \"0.png\", \"step\": 0}\n{\"path\": \"1.png\"}\n",
    )
    .unwrap();

    let out = run(&dir);
    assert!(!out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("parse error: line 2"), "{stderr}");
    assert!(!dir.join("out.mkv").exists());
}

#[test]
fn cli_fails_on_empty_frame_log() {
    let dir = scratch("empty_log");
    std::fs::write(dir.join("frames.json"), "").unwrap();

    let out = run(&dir);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("empty input"));
}

#[test]
fn cli_reports_written_video() {
    if !stepreel::is_encoder_on_path("ffmpeg") {
        return;
    }
    let dir = scratch("success");
    for i in 0..2 {
        let status = std::process::Command::new("ffmpeg")
            .args(["-v", "error", "-y", "-f", "lavfi", "-i", "color=c=red:size=64x32"])
            .args(["-frames:v", "1"])
            .arg(dir.join(format!("{i}.png")))
            .status()
            .unwrap();
        assert!(status.success());
    }
    std::fs::write(
        dir.join("frames.json"),
        "{\"path\": \"0.png\", \"step\": 0}\n{\"path\": \"1.png\", \"step\": 4}\n",
    )
    .unwrap();

    let out = run(&dir);
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    let expected = format!("wrote {}", dir.join("out.mkv").display());
    assert!(stderr.lines().any(|l| l == expected), "{stderr}");
}
