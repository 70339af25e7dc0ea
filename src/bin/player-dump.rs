use std::fs::File;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{App, Arg};
use env_logger::Env;
use log::{error, info, warn};
use playerdat::profile::{ProfileResolver, ResolverConfig};
use playerdat::Player;
use rayon::prelude::*;

fn load(path: &Path) -> Result<Player> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .context("player file has no usable name")?;

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let player =
        Player::from_reader(file_name, file).with_context(|| format!("reading {}", path.display()))?;

    Ok(player)
}

fn print(player: &Player, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(player)?);
        return Ok(());
    }

    let pos = player.position();
    println!("{} ({})", player.name().unwrap_or("<unresolved>"), player.uuid());
    println!("    skin:      {}", player.skin_url().unwrap_or("-"));
    println!("    dimension: {:?}", player.dimension());
    println!("    position:  {:.2}, {:.2}, {:.2}", pos.x, pos.y, pos.z);
    match player.spawn_position() {
        Some(spawn) => println!("    spawn:     {}, {}, {}", spawn.x, spawn.y, spawn.z),
        None => println!("    spawn:     none"),
    }
    println!(
        "    health {}, food {}, air {}",
        player.health(),
        player.food(),
        player.air()
    );
    println!(
        "    level {} ({} xp total)",
        player.xp_level(),
        player.xp_total()
    );
    for item in player.inventory() {
        println!(
            "    slot {:>3}: {}:{} x{}",
            item.slot, item.id, item.damage, item.count
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let defaults = ResolverConfig::default();
    let default_timeout = defaults.timeout.as_secs().to_string();

    let matches = App::new("player-dump")
        .about("Print the contents of Minecraft player files")
        .arg(
            Arg::with_name("files")
                .takes_value(true)
                .multiple(true)
                .required(true),
        )
        .arg(
            Arg::with_name("resolve")
                .long("resolve")
                .takes_value(false)
                .help("Look up player names and skins"),
        )
        .arg(
            Arg::with_name("json")
                .long("json")
                .takes_value(false)
                .help("Print players as JSON"),
        )
        .arg(
            Arg::with_name("session-server")
                .long("session-server")
                .takes_value(true)
                .default_value(&defaults.session_server),
        )
        .arg(
            Arg::with_name("skin-server")
                .long("skin-server")
                .takes_value(true)
                .default_value(&defaults.skin_server),
        )
        .arg(
            Arg::with_name("timeout")
                .long("timeout")
                .takes_value(true)
                .default_value(&default_timeout),
        )
        .get_matches();

    let json = matches.is_present("json");
    let paths: Vec<&Path> = matches
        .values_of("files")
        .map(|files| files.map(Path::new).collect())
        .unwrap_or_default();

    let players: Vec<Player> = paths
        .iter()
        .filter_map(|path| match load(path) {
            Ok(player) => Some(player),
            Err(e) => {
                error!("{:#}", e);
                None
            }
        })
        .collect();

    info!("{} of {} player files decoded", players.len(), paths.len());

    let players = if matches.is_present("resolve") {
        let timeout: u64 = matches
            .value_of("timeout")
            .unwrap_or_default()
            .parse()
            .context("timeout must be a whole number of seconds")?;

        let config = ResolverConfig {
            session_server: matches
                .value_of("session-server")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_owned(),
            skin_server: matches
                .value_of("skin-server")
                .unwrap_or_default()
                .trim_end_matches('/')
                .to_owned(),
            timeout: Duration::from_secs(timeout),
        };
        let resolver = ProfileResolver::with_config(config)?;

        // One request per player, the session server is the only thing shared.
        players
            .into_par_iter()
            .map(|player| {
                let (player, outcome) = resolver.apply(player);
                match outcome {
                    Ok(()) => {}
                    Err(e) if e.is_reportable() => warn!("{}: {}", player.uuid(), e),
                    Err(e) => error!("{}: {}", player.uuid(), e),
                }
                player
            })
            .collect()
    } else {
        players
    };

    for player in &players {
        print(player, json)?;
    }

    Ok(())
}
