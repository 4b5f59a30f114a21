// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: walls, OBJ export and saved model listing for captured rooms
//!
//! Corners are read from a JSON file of the form
//! `{"corners": [{"x": 0.0, "y": 0.0, "z": 0.0}, ...]}` in tap order.
//!
//! Usage:
//!   roomplan walls <corners.json>
//!   roomplan export <corners.json> [--dir <path>] [--markers]
//!   roomplan list [--dir <path>]

mod config;

use anyhow::{bail, Context, Result};
use config::Config;
use roomplan_geometry::{
    export_room_obj, format_length_label, list_saved_models, RoomModel, MODEL_EXTENSION,
};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, PartialEq)]
enum Command {
    Walls { input: PathBuf },
    Export {
        input: PathBuf,
        dir: Option<PathBuf>,
        markers: bool,
    },
    List { dir: Option<PathBuf> },
    Help,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    let result = parse_args(&args).and_then(|command| run(command, &Config::from_env()));
    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn parse_args(args: &[String]) -> Result<Command> {
    let Some(name) = args.first() else {
        return Ok(Command::Help);
    };

    let mut input: Option<PathBuf> = None;
    let mut dir: Option<PathBuf> = None;
    let mut markers = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--dir" => {
                i += 1;
                let value = args.get(i).context("--dir needs a path")?;
                dir = Some(PathBuf::from(value));
            }
            "--markers" => {
                markers = true;
            }
            "-h" | "--help" => return Ok(Command::Help),
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => {
                if input.is_some() {
                    bail!("Unexpected argument: {}", other);
                }
                input = Some(PathBuf::from(other));
            }
        }
        i += 1;
    }

    match name.as_str() {
        "walls" => {
            if dir.is_some() {
                bail!("--dir does not apply to walls");
            }
            if markers {
                bail!("--markers only applies to export");
            }
            Ok(Command::Walls {
                input: input.context("walls needs a corners file")?,
            })
        }
        "export" => Ok(Command::Export {
            input: input.context("export needs a corners file")?,
            dir,
            markers,
        }),
        "list" => {
            if let Some(extra) = input {
                bail!("Unexpected argument: {}", extra.display());
            }
            if markers {
                bail!("--markers only applies to export");
            }
            Ok(Command::List { dir })
        }
        "-h" | "--help" | "help" => Ok(Command::Help),
        other => bail!("Unknown command: {}", other),
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Walls { input } => {
            let room = load_room(&input)?;
            print_walls(&room);
        }
        Command::Export {
            input,
            dir,
            markers,
        } => {
            let room = load_room(&input)?;
            let dir = dir.unwrap_or_else(|| config.model_dir.clone());
            let timestamp = chrono::Local::now().naive_local();
            let path = export_room_obj(&room, &config.dimensions, markers, &dir, &timestamp)
                .with_context(|| format!("Cannot export room to '{}'", dir.display()))?;
            println!("{}", path.display());
        }
        Command::List { dir } => {
            let dir = dir.unwrap_or_else(|| config.model_dir.clone());
            let models = list_saved_models(&dir, MODEL_EXTENSION)
                .with_context(|| format!("Cannot list models in '{}'", dir.display()))?;
            if models.is_empty() {
                println!("No saved models in {}", dir.display());
            }
            for model in models {
                if let Some(name) = model.file_name() {
                    println!("{}", name.to_string_lossy());
                }
            }
        }
        Command::Help => print_usage(),
    }
    Ok(())
}

fn load_room(path: &Path) -> Result<RoomModel> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Cannot read corners file '{}'", path.display()))?;
    let room = RoomModel::from_json(&json)
        .with_context(|| format!("Cannot parse corners file '{}'", path.display()))?;
    tracing::info!(
        corners = room.corner_count(),
        walls = room.segment_count(),
        "Loaded room"
    );
    Ok(room)
}

fn print_walls(room: &RoomModel) {
    for (i, wall) in room.segments().iter().enumerate() {
        let [ax, ay, az, angle] = wall.rotation.to_array();
        println!(
            "wall {:>2}: {:>7} mid ({:.3}, {:.3}, {:.3})  axis ({:.3}, {:.3}, {:.3})  angle {:.1}°",
            i,
            wall.label(),
            wall.midpoint.x,
            wall.midpoint.y,
            wall.midpoint.z,
            ax,
            ay,
            az,
            angle.to_degrees()
        );
    }
    println!(
        "{} walls, {} corners, total length {}",
        room.segment_count(),
        room.corner_count(),
        format_length_label(room.perimeter())
    );
}

fn print_usage() {
    println!(
        r#"RoomPlan - walls from tapped room corners
=========================================

USAGE:
  roomplan <COMMAND> [OPTIONS]

COMMANDS:
  walls <corners.json>      Print each wall's length label and placement
  export <corners.json>     Write the room as RoomModel_<timestamp>.obj
  list                      List saved models

OPTIONS:
  --dir <path>              Model directory (default: $ROOMPLAN_MODEL_DIR or temp dir)
  --markers                 Include corner marker spheres in the export
  -h, --help                Show this help message

ENVIRONMENT:
  ROOMPLAN_MODEL_DIR        Model directory
  ROOMPLAN_WALL_WIDTH       Wall thickness in meters (default: 0.1)
  ROOMPLAN_WALL_HEIGHT      Wall height in meters (default: 2.0)
  ROOMPLAN_MARKER_RADIUS    Corner marker radius in meters (default: 0.05)
  RUST_LOG                  Log filter (default: info)
"#
    );
}
