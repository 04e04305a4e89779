pub mod shift;
pub mod solve;

use autoretime::config::Config;
use autoretime::events::TimecodeScale;
use clap::Args;
use std::path::PathBuf;

/// The two tracks every command works on.
#[derive(Args, Debug, Clone)]
pub struct TrackArgs {
    /// Track with known-good timing (.csv or .json)
    #[arg(short, long)]
    pub reference: PathBuf,

    /// Track to be retimed (.csv or .json)
    #[arg(short, long)]
    pub target: PathBuf,

    /// Read the reference as demuxer frames (`timestamp,duration` in seconds)
    /// using this container timecode scale in nanoseconds
    #[arg(long, value_name = "NS")]
    pub timecode_scale: Option<u64>,

    #[command(flatten)]
    pub config: Config,
}

impl TrackArgs {
    pub fn reference_scale(&self) -> Option<TimecodeScale> {
        self.timecode_scale.map(TimecodeScale::from_nanos)
    }
}
