//! A stand-in for the yt-dlp program: a shell script that follows the same
//! argument and output conventions songdl relies on.
//!
//! - `--version` prints a version line.
//! - `-J` prints an info dict.
//! - Otherwise it renders the `-o` template, writes a small file there, emits
//!   progress lines on stderr and the final path on stdout.
//!
//! URLs containing `unreachable`, `noffmpeg`, `empty` or `skipped` trigger the
//! matching failure modes; `latin1` adds non-UTF-8 bytes to both streams.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

const SCRIPT: &str = r#"#!/bin/sh
if [ "$1" = "--version" ]; then
    echo "2099.01.01"
    exit 0
fi

tmpl=""
url=""
prev=""
json=0
for a in "$@"; do
    if [ "$prev" = "-o" ]; then tmpl="$a"; fi
    if [ "$a" = "-J" ]; then json=1; fi
    prev="$a"
    url="$a"
done

id=$(printf '%s' "$url" | sed -e 's/.*v=\([^&]*\).*/\1/')

case "$url" in
    *unreachable*)
        echo "ERROR: [generic] Unable to download webpage: <urlopen error [Errno -3] Temporary failure in name resolution> (caused by URLError)" >&2
        exit 1
        ;;
    *noffmpeg*)
        echo "WARNING: [youtube] $id: nsig extraction failed" >&2
        echo "ERROR: Postprocessing: ffprobe and ffmpeg not found. Please install or provide the path using --ffmpeg-location" >&2
        exit 1
        ;;
    *skipped*)
        echo "ERROR: [youtube] $id: Video unavailable" >&2
        exit 0
        ;;
esac

if [ "$json" = "1" ]; then
    printf '{"id": "%s", "title": "Fake Song %s", "ext": "webm", "duration": 61.0, "uploader": "Fake Artist"}\n' "$id" "$id"
    exit 0
fi

out=$(printf '%s' "$tmpl" | sed -e "s/%(title)s/Fake Song $id/" -e 's/%(ext)s/mp3/')

case "$url" in
    *empty*)
        : > "$out"
        echo "[songdl-file] $out"
        exit 0
        ;;
esac

case "$url" in
    *latin1*)
        printf 'WARNING: caf\351 au lait\n' >&2
        printf '[info] Titre: caf\351\n'
        ;;
esac

echo "[download] Destination: $out"
echo "[songdl-progress] 6 12 0.5" >&2
echo "[songdl-progress] 12 12 1.0" >&2
printf 'ID3fakeaudio' > "$out"
echo "[songdl-file] $out"
"#;

struct Fake {
    _dir: tempfile::TempDir,
    path: PathBuf,
}

static FAKE: OnceLock<Fake> = OnceLock::new();

/// Path to the fake yt-dlp, written once per test binary.
pub fn fake_ytdlp() -> &'static Path {
    &FAKE
        .get_or_init(|| {
            use std::os::unix::fs::PermissionsExt;

            let dir = tempfile::tempdir().expect("tempdir");
            let path = dir.path().join("yt-dlp");
            std::fs::write(&path, SCRIPT).expect("write fake yt-dlp");
            let mut perms = std::fs::metadata(&path).expect("stat").permissions();
            perms.set_mode(0o755);
            std::fs::set_permissions(&path, perms).expect("chmod");
            Fake { _dir: dir, path }
        })
        .path
}
