// Round trip through an installed GnuPG with a throwaway home directory.
//
// Needs a working gpg-agent, so it only runs on request:
// `cargo test -- --ignored`.

use assert_cmd::cargo::cargo_bin_cmd;
use assert_fs::prelude::*;
use predicates::prelude::*;

fn gpg_installed() -> bool {
    std::process::Command::new("gpg")
        .arg("--version")
        .output()
        .is_ok_and(|o| o.status.success())
}

#[test]
#[ignore = "requires gpg and gpg-agent"]
fn symmetric_round_trip() {
    if !gpg_installed() {
        eprintln!("gpg not installed, skipping");
        return;
    }
    let dir = assert_fs::TempDir::new().unwrap();
    let home = dir.child("gnupg");
    home.create_dir_all().unwrap();
    dir.child("config.toml").write_str("").unwrap();
    dir.child("notes.txt").write_str("meet at noon").unwrap();

    let run = || {
        let mut cmd = cargo_bin_cmd!("ezgpg");
        cmd.current_dir(dir.path())
            .env("EZGPG_PASSPHRASE", "correct horse battery staple")
            .arg("--config")
            .arg(dir.child("config.toml").path())
            .arg("--homedir")
            .arg(home.path());
        cmd
    };

    run()
        .args(["encrypt", "notes.txt", "--symmetric"])
        .assert()
        .success();
    dir.child("notes.txt.gpg").assert(predicate::path::exists());

    std::fs::remove_file(dir.child("notes.txt").path()).unwrap();
    run().args(["decrypt", "notes.txt.gpg"]).assert().success();
    dir.child("notes.txt").assert("meet at noon");
}
