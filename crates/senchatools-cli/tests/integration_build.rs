//! End-to-end tests for `senchatools build` against a fake sencha tool.

#![cfg(unix)]

mod common;

use std::fs;
use std::path::PathBuf;

use common::{free_port, has_curl, Project};
use senchatools_cli::cli::BuildArgs;
use senchatools_cli::commands::build;
use senchatools_cli::{BuildError, CliError};
use serde_json::Value;
use serial_test::serial;
use url::Url;

fn read_json(path: PathBuf) -> Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[tokio::test]
#[serial]
async fn test_buildall_through_build_server() {
    let project = Project::new();
    let tool = project.install_fake_sencha();
    project.fetch_pages();
    let port = free_port();
    project.write_settings(&format!(
        "debug_mode = true\nsencha_command = {:?}\nurl_pattern = \"http://127.0.0.1:{port}/{{appname}}/\"",
        tool.to_string_lossy()
    ));
    std::env::set_current_dir(project.root()).unwrap();

    let args = BuildArgs {
        buildall: true,
        nocompress: true,
        ..BuildArgs::default()
    };
    build::execute(args, None).await.unwrap();

    let manifest = read_json(project.path("shop/calendar/static/calendar/app.jsb3"));
    assert_eq!(
        manifest["builds"][0]["files"][0]["path"],
        "static/extjs/src/app/"
    );
    assert_eq!(manifest["builds"][0]["files"][1]["path"], "static/app/view/");
    assert_eq!(
        manifest["builds"][1]["files"][0]["path"],
        "shop/calendar/static/calendar/"
    );
    assert_eq!(
        manifest["builds"][1]["files"][1]["path"],
        "shop/calendar/static/calendar/"
    );

    let inbox = read_json(project.path("inbox/static/inbox/app.jsb3"));
    assert_eq!(inbox["builds"][1]["files"][0]["path"], "inbox/static/inbox/");

    assert_eq!(
        fs::read_to_string(project.path("inbox/static/inbox/built.jsb3")).unwrap(),
        fs::read_to_string(project.path("inbox/static/inbox/app.jsb3")).unwrap()
    );
    let build_args =
        fs::read_to_string(project.path("shop/calendar/static/calendar/build-args.txt")).unwrap();
    assert!(build_args.trim_end().ends_with("--nocompress"));

    let requested = fs::read_to_string(project.path("requested-urls.txt")).unwrap();
    assert_eq!(
        requested.lines().collect::<Vec<_>>(),
        [
            format!("http://127.0.0.1:{port}/calendar/"),
            format!("http://127.0.0.1:{port}/inbox/"),
        ]
    );

    if has_curl() {
        let pages = fs::read_to_string(project.path("fetched-pages.txt")).unwrap();
        assert_eq!(
            pages,
            "<title>calendar page</title>\n<title>inbox page</title>\n"
        );
    }

    assert!(project.temp_manifests().is_empty());
    std::net::TcpListener::bind(("127.0.0.1", port)).expect("build server released its port");
}

#[tokio::test]
#[serial]
async fn test_single_url_without_build_server() {
    let project = Project::new();
    let tool = project.install_fake_sencha();
    project.write_settings(&format!(
        "debug_mode = true\nsencha_command = {:?}",
        tool.to_string_lossy()
    ));
    std::env::set_current_dir(project.root()).unwrap();

    let args = BuildArgs {
        url: Some(Url::parse("http://localhost:8000/calendar/").unwrap()),
        outdir: Some(PathBuf::from("build/out")),
        dont_use_buildserver: true,
        ..BuildArgs::default()
    };
    build::execute(args, None).await.unwrap();

    let manifest = read_json(project.path("build/out/app.jsb3"));
    assert_eq!(manifest["builds"][1]["files"][0]["path"], "build/out/");
    assert_eq!(manifest["builds"][1]["files"][1]["path"], "build/out/");

    let build_args = fs::read_to_string(project.path("build/out/build-args.txt")).unwrap();
    assert!(!build_args.contains("--nocompress"));
}

#[tokio::test]
#[serial]
async fn test_no_jsbcreate_reuses_persisted_manifest() {
    let project = Project::new();
    let tool = project.install_fake_sencha();
    project.write_settings(&format!(
        "debug_mode = true\nsencha_command = {:?}",
        tool.to_string_lossy()
    ));
    fs::write(project.path("inbox/static/inbox/app.jsb3"), "{\"kept\": true}").unwrap();
    std::env::set_current_dir(project.root()).unwrap();

    let args = BuildArgs {
        app: Some("inbox".to_string()),
        no_jsbcreate: true,
        ..BuildArgs::default()
    };
    build::execute(args, None).await.unwrap();

    assert_eq!(
        fs::read_to_string(project.path("inbox/static/inbox/built.jsb3")).unwrap(),
        "{\"kept\": true}"
    );
    assert!(!project.path("requested-urls.txt").exists());
}

#[tokio::test]
#[serial]
async fn test_no_jsbcreate_without_manifest_fails() {
    let project = Project::new();
    let tool = project.install_fake_sencha();
    project.write_settings(&format!(
        "debug_mode = true\nsencha_command = {:?}",
        tool.to_string_lossy()
    ));
    std::env::set_current_dir(project.root()).unwrap();

    let args = BuildArgs {
        app: Some("shop.calendar".to_string()),
        no_jsbcreate: true,
        ..BuildArgs::default()
    };
    let err = build::execute(args, None).await.unwrap_err();
    assert!(matches!(
        err,
        CliError::Build(BuildError::ManifestUnreadable { .. })
    ));
}

#[tokio::test]
#[serial]
async fn test_unknown_app_is_reported() {
    let project = Project::new();
    project.write_settings("debug_mode = true");
    std::env::set_current_dir(project.root()).unwrap();

    let args = BuildArgs {
        app: Some("ledger".to_string()),
        ..BuildArgs::default()
    };
    let err = build::execute(args, None).await.unwrap_err();
    assert!(matches!(err, CliError::AppNotFound(ref name) if name == "ledger"));
}
