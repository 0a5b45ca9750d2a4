use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::core::import::{FieldMapping, parse_csv_file, prepare_import};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, header, info, success, warning};
use crate::utils::table::Table;
use std::path::Path;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Import { file, map, dry_run } = &cli.command {
        let path = Path::new(file);
        if !path.exists() {
            return Err(AppError::Other(format!("File not found: {}", path.display())));
        }

        let table = parse_csv_file(path)?;
        if table.rows.is_empty() {
            warning(format!("{} contains no data rows.", path.display()));
            return Ok(());
        }

        let plan = match prepare_import(&table, map) {
            Ok(plan) => plan,
            Err(AppError::ImportValidation(errors)) => {
                header("Import validation failed");
                for e in &errors {
                    error(e);
                }
                return Err(AppError::ImportValidation(errors));
            }
            Err(e) => return Err(e),
        };

        print_mapping(&plan.mapping);

        if *dry_run {
            info(format!(
                "Dry run: {} attendee(s) would be imported from {}.",
                plan.drafts.len(),
                path.display()
            ));
            return Ok(());
        }

        let mut session = Session::open(cli, cfg)?;
        let created = session.store.add_attendees(plan.drafts)?;

        let msg = format!("Imported {} attendee(s) from {}", created.len(), path.display());
        session.log("import", file, &msg);
        success(&msg);

        session.finish()?;
    }

    Ok(())
}

fn print_mapping(mapping: &[FieldMapping]) {
    let rows = mapping
        .iter()
        .map(|m| {
            vec![
                m.app_field.to_string(),
                if m.is_bound() {
                    m.csv_header.clone()
                } else {
                    "--".to_string()
                },
                if m.required { "yes" } else { "" }.to_string(),
            ]
        })
        .collect();

    let table = Table::fitted(&["Field", "CSV column", "Required"], rows);
    println!("{}", table.render());
}
