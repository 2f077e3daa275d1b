mod api;
mod chat;
mod upload;


use std::path::PathBuf;

use canvas::area::OwnerIndex;
use canvas::grid::{Cell, CellRect};
use canvas::scene::selection_label;
use canvas::tiles::solid_tile;
use canvas::update::check_ownership;
use clap::{Args, Parser, Subcommand};
use protocol::pixels::SingleUpdateRequest;
use protocol::users::SaveUserRequest;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::api::ApiClient;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{0}")]
    Backend(String),
    #[error("{0} not found")]
    NotFound(String),
    #[error("websocket connect failed: {0}")]
    WsConnect(Box<tokio_tungstenite::tungstenite::Error>),
    #[error("websocket closed")]
    WsClosed,
    #[error("timed out waiting for the chat server")]
    Timeout,
    #[error(transparent)]
    Codec(#[from] protocol::chat::CodecError),
    #[error(transparent)]
    Send(#[from] protocol::session::SendError),
    #[error(transparent)]
    InvalidRequest(#[from] protocol::pixels::UpdateRequestError),
    #[error(transparent)]
    Tile(#[from] canvas::tiles::TileError),
    #[error(transparent)]
    Ownership(#[from] canvas::update::UpdateError),
    #[error("cell ({x}, {y}) is outside the grid")]
    OutOfBounds { x: i32, y: i32 },
    #[error("cannot tell the image type of {0}; use a .png, .jpg, .gif or .webp file")]
    UnknownImageType(String),
    #[error("upload incomplete: {0}")]
    Incomplete(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "pixelmap", about = "Pixel map backend and chat CLI")]
struct Cli {
    #[arg(long, env = "PIXELMAP_API_URL", default_value = "http://localhost:4321")]
    api_url: String,

    #[arg(long, env = "PIXELMAP_WS_URL", default_value = "ws://localhost:4321/ws/chat")]
    ws_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Pixels(PixelsCommand),
    Map(MapCommand),
    User(UserCommand),
    Upload(upload::UploadArgs),
    Chat(ChatCommand),
}

#[derive(Args, Debug)]
struct PixelsCommand {
    #[command(subcommand)]
    command: PixelsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PixelsSubcommand {
    /// Every owned pixel.
    List,
    /// One pixel's record.
    Get {
        #[arg(value_parser = parse_cell)]
        cell: Cell,
    },
    /// Cells owned by an address.
    Owner { address: String },
    /// The connected same-owner area containing a cell.
    Area {
        #[arg(value_parser = parse_cell)]
        cell: Cell,
        /// Owner to fill for; defaults to the cell's current owner.
        #[arg(long)]
        owner: Option<String>,
    },
    /// Paint one owned pixel a solid colour.
    Paint {
        #[arg(value_parser = parse_cell)]
        cell: Cell,
        /// Colour as `#rrggbb`.
        #[arg(long, default_value = "#ff0000")]
        color: String,
        #[arg(long, env = "PIXELMAP_ADDRESS")]
        address: String,
    },
}

#[derive(Args, Debug)]
struct MapCommand {
    #[command(subcommand)]
    command: MapSubcommand,
}

#[derive(Subcommand, Debug)]
enum MapSubcommand {
    /// Save the rendered map image.
    Download {
        #[arg(long, default_value = "pixelmap.png")]
        out: PathBuf,
    },
}

#[derive(Args, Debug)]
struct UserCommand {
    #[command(subcommand)]
    command: UserSubcommand,
}

#[derive(Subcommand, Debug)]
enum UserSubcommand {
    Get {
        address: String,
    },
    /// Create or refresh a user record.
    Save {
        address: String,
        #[arg(long)]
        ens_name: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ChatCommand {
    #[command(subcommand)]
    command: ChatSubcommand,
}

#[derive(Subcommand, Debug)]
enum ChatSubcommand {
    /// Follow the chat, reconnecting with backoff.
    Tail,
    /// Send one message and wait for the server to echo it.
    Send {
        text: String,
        #[arg(long)]
        address: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let api = ApiClient::new(&cli.api_url);

    match cli.command {
        Command::Pixels(pixels) => run_pixels(&api, pixels).await,
        Command::Map(map) => run_map(&api, map).await,
        Command::User(user) => run_user(&api, user).await,
        Command::Upload(args) => upload::run_upload(&api, args).await,
        Command::Chat(chat) => match chat.command {
            ChatSubcommand::Tail => chat::tail(&cli.ws_url).await,
            ChatSubcommand::Send { text, address } => chat::send(&cli.ws_url, &text, address.as_deref()).await,
        },
    }
}

async fn run_pixels(api: &ApiClient, pixels: PixelsCommand) -> Result<(), CliError> {
    match pixels.command {
        PixelsSubcommand::List => {
            let records = api.pixels().await?;
            info!(count = records.len(), "fetched pixels");
            print_json(&records)
        }
        PixelsSubcommand::Get { cell } => {
            let record = api
                .pixel(cell.x, cell.y)
                .await?
                .ok_or_else(|| CliError::NotFound(format!("pixel ({}, {})", cell.x, cell.y)))?;
            print_json(&record)
        }
        PixelsSubcommand::Owner { address } => {
            let owners = OwnerIndex::from_pixels(&api.pixels().await?);
            let cells = owners.cells_owned_by(&address);
            println!("{}", describe_cells(&cells));
            print_cells(&cells);
            Ok(())
        }
        PixelsSubcommand::Area { cell, owner } => {
            let owners = OwnerIndex::from_pixels(&api.pixels().await?);
            let owner = match owner {
                Some(owner) => owner,
                None => owners
                    .owner_of(cell)
                    .map(str::to_owned)
                    .ok_or_else(|| CliError::NotFound(format!("owner of ({}, {})", cell.x, cell.y)))?,
            };
            let area = owners.flood_fill(cell, &owner);
            println!("{}", describe_cells(&area));
            print_cells(&area);
            Ok(())
        }
        PixelsSubcommand::Paint { cell, color, address } => {
            let owners = OwnerIndex::from_pixels(&api.pixels().await?);
            check_ownership(Some(&address), &[cell], &owners)?;
            let image = solid_tile(&color)?;
            api.update_single_pixel(&SingleUpdateRequest::with_color(&address, cell.x, cell.y, image, &color))
                .await?;
            info!(x = cell.x, y = cell.y, %color, "pixel painted");
            Ok(())
        }
    }
}

async fn run_map(api: &ApiClient, map: MapCommand) -> Result<(), CliError> {
    match map.command {
        MapSubcommand::Download { out } => {
            let bytes = api.pixel_map().await?;
            tokio::fs::write(&out, &bytes).await?;
            info!(path = %out.display(), bytes = bytes.len(), "saved map image");
            Ok(())
        }
    }
}

async fn run_user(api: &ApiClient, user: UserCommand) -> Result<(), CliError> {
    match user.command {
        UserSubcommand::Get { address } => {
            let record = api
                .user(&address)
                .await?
                .ok_or_else(|| CliError::NotFound(format!("user {address}")))?;
            print_json(&record)
        }
        UserSubcommand::Save { address, ens_name } => {
            let body = SaveUserRequest { address, ens_name, last_connected: chrono::Utc::now().to_rfc3339() };
            let saved = api.save_user(&body).await?;
            print_json(&saved)
        }
    }
}

/// Parse `x,y` into an in-bounds cell.
fn parse_cell(value: &str) -> Result<Cell, String> {
    let (x, y) = value
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got `{value}`"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in `{value}`: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in `{value}`: {e}"))?;
    let cell = Cell::new(x, y);
    if !cell.in_bounds() {
        return Err(CliError::OutOfBounds { x, y }.to_string());
    }
    Ok(cell)
}

/// One-line summary of a set of cells: count and bounding box.
fn describe_cells(cells: &[Cell]) -> String {
    match CellRect::bounding(cells) {
        None => "no pixels".to_owned(),
        Some(rect) if rect.cell_count() == cells.len() => {
            let origin = rect.origin();
            format!("{} at ({}, {})", selection_label(rect), origin.x, origin.y)
        }
        Some(rect) => {
            let origin = rect.origin();
            format!(
                "{} pixels in a {}×{} area at ({}, {})",
                cells.len(),
                rect.width(),
                rect.height(),
                origin.x,
                origin.y
            )
        }
    }
}

fn print_cells(cells: &[Cell]) {
    for cell in cells {
        println!("{},{}", cell.x, cell.y);
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
