use datatest_stable::Utf8Path;
use snapbox::cmd::Command;

datatest_stable::harness! {
    { test = run_test, root = "tests/cli", pattern = r"\.z80$" },
}

const Z80ASM_PATH: &str = env!("CARGO_BIN_EXE_z80asm");

fn run_test(asm_path: &Utf8Path) -> datatest_stable::Result<()> {
    Command::new(Z80ASM_PATH)
        .arg("--color")
        .arg("never")
        .arg(asm_path)
        .assert()
        .success()
        .stdout_eq([].as_slice())
        .stderr_eq([].as_slice());
    Ok(())
}
