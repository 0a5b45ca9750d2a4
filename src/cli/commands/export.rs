use crate::cli::parser::{Cli, Commands};
use crate::cli::session::Session;
use crate::config::Config;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        kind,
        format,
        file,
        force,
    } = &cli.command
    {
        let session = Session::open(cli, cfg)?;
        let path = ExportLogic::export(&session.store, *kind, *format, file.as_deref(), *force, cfg)?;

        session.log(
            "export",
            kind.as_str(),
            &format!("{} export written to {}", format.as_str(), path.display()),
        );
    }
    Ok(())
}
