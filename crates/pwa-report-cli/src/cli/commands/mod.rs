use super::args::*;

pub(crate) mod audit;

use crate::exit_codes::SUCCESS;

pub async fn dispatch(cli: Cli) -> anyhow::Result<i32> {
    match cli.cmd {
        Command::Audit(args) => audit::run(args).await,
        Command::Version => {
            println!("pwa-report {}", env!("CARGO_PKG_VERSION"));
            Ok(SUCCESS)
        }
    }
}
