use sha1fips::compress::WorkingState;
use sha1fips::padding::Block;
use sha1fips::schedule::Schedule;
use sha1fips::{Observer, Sha1};

use anyhow::Context as _;
use argh::FromArgs;
use log::info;

use std::io::{self, Read as _};

#[derive(FromArgs)]
/// Compute the SHA-1 digest of standard input
struct Args {
    /// print the 16 message words of each block
    #[argh(switch)]
    words: bool,

    /// print all 80 expanded schedule words of each block
    #[argh(switch)]
    schedule: bool,

    /// print the working registers after every round
    #[argh(switch)]
    process: bool,

    /// print each block as hex
    #[argh(switch)]
    blocks: bool,
}

/// Prints the intermediate values selected on the command line.
struct Printer {
    args: Args,
}

impl Observer for Printer {
    fn block(&mut self, index: u64, block: &Block) {
        if self.args.blocks {
            println!("Block {}: {}", index, hex::encode(&block[..]));
        }
    }

    fn schedule(&mut self, _index: u64, schedule: &Schedule) {
        if self.args.words {
            for (t, word) in schedule.words().iter().enumerate() {
                println!("Word {}: {:08x}", t, word);
            }
        }
        if self.args.schedule {
            for (t, word) in schedule.as_array().iter().enumerate() {
                println!("W[{}]: {:08x}", t, word);
            }
        }
    }

    fn round(&mut self, t: usize, state: &WorkingState) {
        if self.args.process {
            println!(
                "t: {} - A:{:08x} B:{:08x} C:{:08x} D:{:08x} E:{:08x}",
                t, state.a, state.b, state.c, state.d, state.e
            );
        }
    }
}

const CHUNK_LEN: usize = 8192;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args: Args = argh::from_env();

    let mut state = Sha1::with_observer(Printer { args });
    let mut stdin = io::stdin();
    let mut buffer = [0; CHUNK_LEN];
    loop {
        let n = match stdin.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e).context("failed to read stdin"),
        };
        state
            .try_update(&buffer[..n])
            .context("input too long to hash")?;
    }

    info!("read {} bytes", state.len());
    println!("{}", hex::encode(state.finalize()));

    Ok(())
}
