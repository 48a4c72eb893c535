#[test]
fn help_lists_commands_and_global_flags() {
    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("hwinv"))
        .arg("--help")
        .output()
        .expect("run help");
    assert!(output.status.success(), "--help should succeed");
    let text = String::from_utf8_lossy(&output.stdout);

    for needle in ["--pretty", "--json", "compose", "xname", "decode-loc", "decode-fru", "eth"] {
        assert!(
            text.contains(needle),
            "help output should contain '{needle}'"
        );
    }
}

#[test]
fn compose_help_mentions_format_env() {
    let output = std::process::Command::new(assert_cmd::cargo::cargo_bin!("hwinv"))
        .args(["compose", "--help"])
        .output()
        .expect("run help");
    assert!(output.status.success());
    let text = String::from_utf8_lossy(&output.stdout);
    for needle in ["--format", "HWINV_FORMAT", "--strict", "--xname"] {
        assert!(text.contains(needle), "compose help should contain '{needle}'");
    }
}
