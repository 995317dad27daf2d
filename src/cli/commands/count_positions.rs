//! Count positions command - count legal move sequences to a given depth.

use std::path::PathBuf;
use std::time::Instant;

use structopt::StructOpt;

use super::util::load_state;
use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "3")]
    pub depth: u8,
    #[structopt(long = "state", parse(from_os_str))]
    pub state: Option<PathBuf>,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        let state = load_state(self.state.as_ref());

        for depth in 1..=self.depth {
            let start = Instant::now();
            let count = state.count_positions(depth);
            let duration = start.elapsed();
            println!(
                "depth: {}, positions: {}, duration: {:?}",
                depth, count, duration
            );
        }
    }
}
