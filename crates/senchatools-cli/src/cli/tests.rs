#[cfg(test)]
mod tests {
    use crate::cli::validation::{parse_entry_url, parse_url_pattern};
    use crate::cli::{Cli, Command};
    use clap::Parser;
    use std::path::PathBuf;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("senchatools").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_entry_url() {
        let url = parse_entry_url("http://localhost:8000/calendar/").unwrap();
        assert_eq!(url.port(), Some(8000));

        assert!(parse_entry_url("ftp://localhost/calendar/").is_err());
        assert!(parse_entry_url("calendar/index.html").is_err());
    }

    #[test]
    fn test_parse_url_pattern() {
        assert!(parse_url_pattern("http://localhost:8000/{appname}/").is_ok());
        let err = parse_url_pattern("http://localhost:8000/").unwrap_err();
        assert!(err.contains("{appname}"));
    }

    #[test]
    fn test_build_single_url() {
        let cli = parse(&[
            "build",
            "--url",
            "http://localhost:15041/calendar/",
            "--outdir",
            "calendar/static/calendar",
        ])
        .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert_eq!(
                    args.url.unwrap().as_str(),
                    "http://localhost:15041/calendar/"
                );
                assert_eq!(args.outdir, Some(PathBuf::from("calendar/static/calendar")));
                assert!(!args.buildall);
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_url_requires_outdir() {
        assert!(parse(&["build", "--url", "http://localhost:15041/calendar/"]).is_err());
        assert!(parse(&["build", "--outdir", "out", "--app", "calendar"]).is_err());
    }

    #[test]
    fn test_outdir_only_goes_with_url() {
        let err = parse(&["build", "--outdir", "out", "--buildall"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);

        let err = parse(&["build", "--outdir", "out", "--app", "calendar"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_build_requires_a_target() {
        let err = parse(&["build", "--nocompress"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_targets_are_exclusive() {
        let err = parse(&["build", "--app", "calendar", "--buildall"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn test_build_all_flags() {
        let cli = parse(&[
            "build",
            "--buildall",
            "--urlpattern",
            "http://localhost:9000/{appname}/",
            "--nocompress",
            "--no-jsbcreate",
            "--no-collectstatic",
            "--dont-use-buildserver",
            "--no-check-settings",
            "--watch",
            "calendar",
        ])
        .unwrap();

        match cli.command {
            Command::Build(args) => {
                assert!(args.buildall);
                assert_eq!(
                    args.urlpattern.as_deref(),
                    Some("http://localhost:9000/{appname}/")
                );
                assert!(args.nocompress);
                assert!(args.no_jsbcreate);
                assert!(args.no_collectstatic);
                assert!(args.dont_use_buildserver);
                assert!(args.no_check_settings);
                assert_eq!(args.watch, Some(PathBuf::from("calendar")));
            }
            _ => panic!("Expected Build command"),
        }
    }

    #[test]
    fn test_bad_urlpattern_is_rejected() {
        assert!(parse(&["build", "--buildall", "--urlpattern", "http://localhost/"]).is_err());
    }

    #[test]
    fn test_list_command() {
        let cli = parse(&["list"]).unwrap();
        assert!(matches!(cli.command, Command::List(_)));
    }

    #[test]
    fn test_verbosity() {
        assert_eq!(parse(&["list"]).unwrap().verbosity(), 1);
        assert_eq!(parse(&["-vv", "list"]).unwrap().verbosity(), 3);
        assert_eq!(parse(&["list", "--quiet"]).unwrap().verbosity(), 0);
        assert!(parse(&["-v", "--quiet", "list"]).is_err());
    }

    #[test]
    fn test_global_config_flag() {
        let cli = parse(&["list", "--config", "conf/senchatools.toml", "--no-color"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("conf/senchatools.toml")));
        assert!(cli.no_color);
    }
}
