//! qrcraft - build a QR code from a content profile
//!
//! Example: `qrcraft wifi ssid=Home password=secret --logo logo.png`

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use qrcraft::color::parse_color;
use qrcraft::compose::Texture;
use qrcraft::config::Config;
use qrcraft::helper::{png_bytes, to_svg_string, to_terminal_string};
use qrcraft::profile::ProfileKind;
use qrcraft::session::Session;
use qrcraft::symbol::{Matrix, QrCodeEcc};

/// qrcraft - build a QR code from a content profile
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Profile to encode: link, text, email, wifi, sms, tel, vcard, location,
    /// calendar, social, video, mp3, pdf, images, menu or app
    profile: ProfileKind,

    /// Field values as NAME=VALUE, e.g. ssid=Home
    #[arg(value_name = "FIELD=VALUE", value_parser = parse_assignment)]
    fields: Vec<(String, String)>,

    /// Path to the configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Dark module color (overrides config)
    #[arg(long, value_name = "HEX")]
    color: Option<String>,

    /// Light module color, or "transparent" (overrides config)
    #[arg(long, value_name = "HEX")]
    background: Option<String>,

    /// Image size in pixels (overrides config)
    #[arg(long, value_name = "PX")]
    size: Option<u32>,

    /// Error correction level: low, medium, quartile or high (overrides config)
    #[arg(long)]
    ecc: Option<QrCodeEcc>,

    /// Preview texture: none, dots, square or star (overrides config)
    #[arg(long)]
    texture: Option<Texture>,

    /// Logo image drawn in the center of the code
    #[arg(long, value_name = "FILE")]
    logo: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Output file name (overrides config)
    #[arg(long, value_name = "NAME")]
    file_name: Option<String>,

    /// Also write the code over its texture to this file
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Also write an SVG rendering to this file
    #[arg(long, value_name = "FILE")]
    svg: Option<PathBuf>,

    /// Print the code to the terminal
    #[arg(long)]
    print: bool,

    /// Only print the encoded payload
    #[arg(long)]
    payload_only: bool,

    /// List the fields of the profile and exit
    #[arg(long)]
    list_fields: bool,
}

fn parse_assignment(s: &str) -> Result<(String, String), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{s}'"))?;
    Ok((name.trim().to_string(), value.to_string()))
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("qrcraft=info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    if args.list_fields {
        for name in args.profile.field_names() {
            println!("{name}");
        }
        return Ok(());
    }

    let mut config = Config::load(args.config.clone())?;
    if let Some(size) = args.size {
        config.size = size;
    }
    if let Some(dir) = &args.output {
        config.output_dir = dir.clone();
    }
    if let Some(name) = &args.file_name {
        config.file_name = name.clone();
    }

    let mut style = config.style()?;
    if let Some(color) = &args.color {
        style.render.dark = parse_color(color)?;
    }
    if let Some(background) = &args.background {
        style.render.light = parse_color(background)?;
    }
    if let Some(ecc) = args.ecc {
        style.render.ecc = ecc;
    }
    if let Some(texture) = args.texture {
        style.texture = texture;
    }

    let mut session = Session::new(style);
    session.on_select_profile(args.profile);
    for (name, value) in &args.fields {
        session.on_field_edit(args.profile, name, value)?;
    }

    if args.payload_only {
        let payload = qrcraft::encoder::encode(args.profile, session.store().fields())?;
        println!("{payload}");
        return Ok(());
    }

    session.on_logo_selected(args.logo.clone());
    let generated = session.on_generate().await?;
    tracing::info!("{}", generated.description);

    let path = session.download_as(&config.output_dir, &config.file_name)?;
    println!("{}", path.display());

    if let Some(preview_path) = &args.preview {
        let preview = session.preview().context("No QR code to preview")?;
        std::fs::write(preview_path, png_bytes(&preview)?)
            .with_context(|| format!("Failed to write preview: {}", preview_path.display()))?;
    }

    if args.svg.is_some() || args.print {
        let matrix = Matrix::encode(&generated.payload, style.render.ecc)?;
        if let Some(svg_path) = &args.svg {
            let svg = to_svg_string(&matrix, style.render.quiet_zone, style.render.dark, style.render.light);
            std::fs::write(svg_path, svg)
                .with_context(|| format!("Failed to write SVG: {}", svg_path.display()))?;
        }
        if args.print {
            print!("{}", to_terminal_string(&matrix, style.render.quiet_zone));
        }
    }

    Ok(())
}
