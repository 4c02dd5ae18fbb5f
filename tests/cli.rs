use assert_cmd::prelude::*;
use predicates::str::contains;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

fn build_font() -> NamedTempFile {
    let xml = r#"<font>
    <name>Test Blocks</name>
    <glyph>
        <symbol>T</symbol>
        <face>0 0.8  1 0.8  1 1  0 1</face>
        <face>0.4 0  0.6 0  0.6 0.8  0.4 0.8</face>
    </glyph>
    <glyph>
        <symbol>9</symbol>
        <face>0.3 0.5  0.7 0.5  0.7 1  0.3 1</face>
        <face>0.55 0  0.7 0  0.7 0.5  0.55 0.5</face>
    </glyph>
</font>
"#;

    let mut tmp = NamedTempFile::new().expect("temp font");
    tmp.write_all(xml.as_bytes()).expect("write font");
    tmp
}

#[test]
fn summary_mode_attaches_both_glyphs() {
    let font = build_font();
    let mut cmd = Command::cargo_bin("glyphlight").expect("binary exists");
    cmd.arg("--font")
        .arg(font.path())
        .arg("--summary-only")
        .arg("--frames")
        .arg("8");
    cmd.assert()
        .success()
        .stdout(contains("Loaded outline font \"Test Blocks\" (2 glyphs)"))
        .stdout(contains(" - glyph 'T' attached (plastic)"))
        .stdout(contains(" - glyph '9' attached (metallic)"))
        .stdout(contains(" - renderables: 3"))
        .stdout(contains(" - light pos=(0.00, 0.00, 0.00)"))
        .stdout(contains(" - camera pos=(0.00, 0.00, 5.00)"))
        .stdout(contains(" - glyph-T pos=(-2.00, 0.00, 0.00) material=plastic"))
        .stdout(contains(" - glyph-9 pos=(2.00, 0.00, 0.00) material=metallic"));
}

#[test]
fn summary_mode_degrades_without_the_font() {
    let mut cmd = Command::cargo_bin("glyphlight").expect("binary exists");
    cmd.arg("--font")
        .arg("/nonexistent/font.xml")
        .arg("--summary-only")
        .arg("--frames")
        .arg("2");
    cmd.assert()
        .success()
        .stdout(contains(" - renderables: 1"))
        .stdout(contains(" - light pos=(0.00, 0.00, 0.00)"));
}

#[test]
fn unknown_arguments_are_rejected() {
    let mut cmd = Command::cargo_bin("glyphlight").expect("binary exists");
    cmd.arg("--bogus");
    cmd.assert()
        .failure()
        .stderr(contains("Unknown argument: --bogus"));
}
