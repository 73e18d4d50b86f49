//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

/// Tests that point the PDF engines at stub binaries through environment variables hold
/// this lock so they do not observe each other's overrides.
static ENV_LOCK: Mutex<()> = Mutex::new(());

pub fn env_lock() -> MutexGuard<'static, ()> {
    ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Write `contents` to `dir/name` and return the path.
pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

/// Sets an environment variable for the lifetime of the guard, restoring the old value on drop.
pub struct EnvOverride {
    key: &'static str,
    previous: Option<String>,
}

impl EnvOverride {
    pub fn set(key: &'static str, value: impl AsRef<std::ffi::OsStr>) -> Self {
        let previous = std::env::var(key).ok();
        std::env::set_var(key, value);
        Self { key, previous }
    }
}

impl Drop for EnvOverride {
    fn drop(&mut self) {
        match &self.previous {
            Some(value) => std::env::set_var(self.key, value),
            None => std::env::remove_var(self.key),
        }
    }
}

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, script: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let script_path = dir.join(name);
    fs::write(&script_path, script).unwrap();
    let mut perms = fs::metadata(&script_path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&script_path, perms).unwrap();
    script_path
}

/// A stand-in for Chrome that writes a tiny PDF to the `--print-to-pdf=` target and copies
/// the HTML it was given next to it as `printed.html`.
#[cfg(unix)]
pub fn write_stub_chrome(dir: &Path) -> PathBuf {
    let copy = dir.join("printed.html");
    let script = format!(
        r#"#!/bin/sh
OUTPUT=""
INPUT=""
for arg in "$@"; do
  case $arg in
    --print-to-pdf=*)
      OUTPUT="${{arg#*=}}"
      ;;
    file://*)
      INPUT="${{arg#file://}}"
      ;;
  esac
done
if [ -z "$OUTPUT" ]; then
  echo "missing output" >&2
  exit 1
fi
cp "$INPUT" "{copy}"
printf '%%PDF-1.7\n%%%%EOF\n' > "$OUTPUT"
exit 0
"#,
        copy = copy.display()
    );
    write_script(dir, "fake-chrome.sh", &script)
}

/// A stand-in for pandoc that records its arguments in `pandoc-args.txt` and writes a tiny PDF
/// to the `--output=` target.
#[cfg(unix)]
pub fn write_stub_pandoc(dir: &Path) -> PathBuf {
    let log = dir.join("pandoc-args.txt");
    let script = format!(
        r#"#!/bin/sh
OUTPUT=""
for arg in "$@"; do
  echo "$arg" >> "{log}"
  case $arg in
    --output=*)
      OUTPUT="${{arg#*=}}"
      ;;
  esac
done
printf '%%PDF-1.5\n%%%%EOF\n' > "$OUTPUT"
exit 0
"#,
        log = log.display()
    );
    write_script(dir, "fake-pandoc.sh", &script)
}

/// A stand-in for a PDF engine that always fails.
#[cfg(unix)]
pub fn write_failing_engine(dir: &Path) -> PathBuf {
    write_script(
        dir,
        "broken-engine.sh",
        "#!/bin/sh\necho 'engine crashed' >&2\nexit 3\n",
    )
}
