mod cli;

use cli::commands::Command;
use cli::WizardChess;
use structopt::StructOpt;

fn main() {
    env_logger::init();
    WizardChess::from_args().execute();
}
