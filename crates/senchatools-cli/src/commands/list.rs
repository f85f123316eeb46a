//! `senchatools list`: show every discoverable app with its output directory
//! and entry URL.

use std::path::Path;

use senchatools_config::Settings;

use crate::apps::{discover_apps, DirectoryResolver};
use crate::cli::ListArgs;
use crate::commands::utils;
use crate::error::Result;
use crate::ui::{self, AppRow};

pub async fn execute(args: ListArgs, config: Option<&Path>) -> Result<()> {
    let work_dir = utils::working_dir()?;
    let settings = utils::load_settings(&work_dir, config, args.urlpattern.as_deref())?;

    let rows = app_rows(&settings)?;
    if rows.is_empty() {
        ui::warning("No ExtJS apps found among installed_apps");
    }
    ui::print_app_list(&rows);
    Ok(())
}

/// One row per discovered app, in installation order.
pub fn app_rows(settings: &Settings) -> Result<Vec<AppRow>> {
    let resolver = DirectoryResolver::from_settings(settings);
    discover_apps(&resolver)?
        .into_iter()
        .map(|app| -> Result<AppRow> {
            let descriptor = app.describe(settings)?;
            Ok(AppRow {
                name: descriptor.name().to_string(),
                output_dir: descriptor.output_dir().to_path_buf(),
                url: descriptor.entry_url().to_string(),
            })
        })
        .collect()
}
