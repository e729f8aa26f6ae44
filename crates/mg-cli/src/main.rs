//! mapgen: generate a dungeon layout and print it
//!
//! Renders the grid as a character map by default; `--json` emits the full
//! layout for downstream tooling instead.

use std::process::ExitCode;
use std::str::FromStr;

use clap::Parser;

use mg_core::dungeon::{
    CellKind, ConnectStrategy, CurvePolicy, Dungeon, GenParams, Generator, TransitionKind,
};

/// Procedural dungeon layout generator
#[derive(Parser, Debug)]
#[command(name = "mapgen")]
#[command(author, version, about = "Generate a 2-D dungeon layout", long_about = None)]
struct Args {
    /// Grid width in cells
    #[arg(long, default_value_t = 120)]
    width: usize,

    /// Grid height in cells
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// Number of rooms to attempt
    #[arg(short = 'n', long = "rooms", default_value_t = 10)]
    rooms: usize,

    /// Minimum room side length
    #[arg(long = "min-size", default_value_t = 6)]
    min_size: usize,

    /// Maximum room side length
    #[arg(long = "max-size", default_value_t = 12)]
    max_size: usize,

    /// Transition kind (corridors/portals/both)
    #[arg(short = 't', long, default_value = "both")]
    transitions: String,

    /// Probability (0..=100) that a mixed-mode connection becomes a portal
    #[arg(long = "portals-percent", default_value_t = 10)]
    portals_percent: u32,

    /// Partner selection strategy (random/closest/farthest)
    #[arg(short = 's', long = "strategy", default_value = "random")]
    strategy: String,

    /// Corridor tie-breaking (straight/curved/random)
    #[arg(long = "curves", default_value = "curved")]
    curves: String,

    /// Skip the per-room connection pass
    #[arg(long = "no-each-room")]
    no_each_room: bool,

    /// Allow a disconnected layout
    #[arg(long = "allow-disconnected")]
    allow_disconnected: bool,

    /// Maximum tolerated connection surplus over the room count
    #[arg(long = "max-delta", default_value_t = 5)]
    max_delta: i64,

    /// Seed reproducing a previous layout; random when omitted
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the layout as JSON instead of a character map
    #[arg(long)]
    json: bool,
}

impl Args {
    fn into_params(self) -> Result<(GenParams, Option<u64>, bool), String> {
        let transitions = TransitionKind::from_str(&self.transitions)
            .map_err(|_| format!("unknown transition kind '{}'", self.transitions))?;
        let base_connecting = ConnectStrategy::from_str(&self.strategy)
            .map_err(|_| format!("unknown connection strategy '{}'", self.strategy))?;
        let corridor_curves = CurvePolicy::from_str(&self.curves)
            .map_err(|_| format!("unknown curve policy '{}'", self.curves))?;
        let params = GenParams {
            transitions,
            portals_percent: self.portals_percent,
            each_room_connection: !self.no_each_room,
            must_be_connected: !self.allow_disconnected,
            base_connecting,
            corridor_curves,
            room_size: (self.min_size, self.max_size),
            rooms_count: self.rooms,
            width: self.width,
            height: self.height,
            max_connections_delta: self.max_delta,
        };
        Ok((params, self.seed, self.json))
    }
}

/// Character for one cell code
fn glyph(kind: CellKind) -> char {
    match kind {
        CellKind::Void => ' ',
        CellKind::Floor => '.',
        CellKind::Wall => '#',
        CellKind::Door => '+',
        CellKind::Archway => '\'',
        CellKind::CorridorFloor => ',',
        CellKind::CorridorWall => '%',
        CellKind::Portal => '*',
        CellKind::Entrance => '<',
        CellKind::Exit => '>',
    }
}

fn render(dungeon: &Dungeon) -> String {
    let mut out = String::with_capacity(
        (dungeon.grid.width() + 1) * dungeon.grid.height(),
    );
    for row in dungeon.grid.rows() {
        for &cell in row {
            out.push(glyph(cell));
        }
        out.push('\n');
    }
    out
}

fn run(args: Args) -> Result<(), String> {
    let (params, seed, json) = args.into_params()?;
    let generator = match seed {
        Some(seed) => Generator::with_seed(params, seed),
        None => Generator::new(params),
    }
    .map_err(|e| e.to_string())?;

    let dungeon = generator.generate().map_err(|e| e.to_string())?;

    if json {
        let body = serde_json::to_string_pretty(&dungeon).map_err(|e| e.to_string())?;
        println!("{}", body);
    } else {
        print!("{}", render(&dungeon));
        println!(
            "rooms: {}  corridors: {}  portals: {}  seed: {}",
            dungeon.rooms.len(),
            dungeon.corridors.len(),
            dungeon.portals.len(),
            dungeon.seed
        );
    }
    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("mapgen: {}", message);
            ExitCode::FAILURE
        }
    }
}
