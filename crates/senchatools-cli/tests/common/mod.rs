//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Stand-in for the sencha executable.
///
/// `create jsb -a URL -p PATH` records URL, fetches it with curl when the
/// project asked for it and curl is installed (appending the body to
/// `fetched-pages.txt`, failing if the page cannot be loaded), and writes a
/// manifest to PATH;
/// `build -p MANIFEST -d OUTDIR [...]` copies MANIFEST and its arguments
/// into OUTDIR.
pub const FAKE_SENCHA: &str = r#"#!/bin/sh
case "$1" in
  create)
    echo "$4" >> "$(dirname "$0")/requested-urls.txt"
    if [ -f "$(dirname "$0")/fetch-pages" ] && command -v curl >/dev/null 2>&1; then
      curl -fsS --noproxy "*" "$4" >> "$(dirname "$0")/fetched-pages.txt" || exit 7
    fi
    cat > "$6" <<'EOF'
{
    "projectName": "Project",
    "builds": [
        {
            "name": "All Classes",
            "target": "all-classes.js",
            "files": [
                { "name": "Application.js", "path": "../static/extjs/src/app/" },
                { "name": "Main.js", "path": "../static/app/view/" }
            ]
        },
        {
            "name": "Application - Production",
            "target": "app-all.js",
            "files": [
                { "name": "all-classes.js", "path": "" },
                { "name": "app.js", "path": "" }
            ]
        }
    ],
    "resources": []
}
EOF
    ;;
  build)
    mkdir -p "$5"
    cp "$3" "$5/built.jsb3"
    echo "$@" > "$5/build-args.txt"
    ;;
  *)
    exit 64
    ;;
esac
"#;

/// A throwaway project with two apps, `shop.calendar` and `inbox`, and an
/// entry page for each below the project root.
pub struct Project {
    pub dir: TempDir,
}

impl Project {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("shop/calendar/static/calendar/app")).unwrap();
        fs::create_dir_all(dir.path().join("inbox/static/inbox/app")).unwrap();
        fs::create_dir_all(dir.path().join("static")).unwrap();
        fs::create_dir_all(dir.path().join("calendar")).unwrap();
        fs::write(dir.path().join("calendar/index.html"), "<title>calendar page</title>\n").unwrap();
        fs::write(dir.path().join("inbox/index.html"), "<title>inbox page</title>\n").unwrap();
        Self { dir }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.dir.path().join(rel)
    }

    /// Install the fake tool and return its path.
    #[cfg(unix)]
    pub fn install_fake_sencha(&self) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let tool = self.path("fake-sencha");
        fs::write(&tool, FAKE_SENCHA).unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();
        tool
    }

    /// Make the fake tool load each entry URL like `sencha create jsb` does.
    pub fn fetch_pages(&self) {
        fs::write(self.path("fetch-pages"), "").unwrap();
    }

    /// Write `senchatools.toml` with the given extra lines.
    pub fn write_settings(&self, extra: &str) {
        let settings = format!(
            "installed_apps = [\"django.contrib.auth\", \"shop.calendar\", \"inbox\"]\n{extra}\n"
        );
        fs::write(self.path("senchatools.toml"), settings).unwrap();
    }

    pub fn temp_manifests(&self) -> Vec<PathBuf> {
        fs::read_dir(self.root())
            .unwrap()
            .map(|e| e.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|n| n.starts_with("temp-app-"))
            })
            .collect()
    }
}

/// Whether the fake tool can fetch pages.
pub fn has_curl() -> bool {
    std::process::Command::new("sh")
        .args(["-c", "command -v curl"])
        .output()
        .is_ok_and(|out| out.status.success())
}

/// A local port nothing is listening on.
pub fn free_port() -> u16 {
    std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap()
        .port()
}
