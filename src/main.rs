//! Standalone glyph rain window.
//!
//! ```text
//! glyphfall --atlas assets/atlas/glyphs.png --mode dna --strips 60
//! RUST_LOG=glyphfall=debug glyphfall --config assets/presets/dna.toml
//! ```

use std::{
    fmt::Display,
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use clap::Parser;
use glyphfall::{
    glyph::GlyphMode, gpu::texture::AtlasImage, GlyphfallError, Options,
    Viewer,
};

#[derive(Parser)]
#[command(
    name = "glyphfall",
    about = "3D falling-glyph rain with an auto-tracking camera",
    version
)]
struct Cli {
    /// TOML options file; missing fields use defaults
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Glyph atlas PNG, 16 x 13 cells
    #[arg(long, value_name = "PNG")]
    atlas: Option<PathBuf>,

    /// Seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,

    /// Number of falling strips
    #[arg(long)]
    strips: Option<u32>,

    /// Glyphs per strip
    #[arg(long)]
    grid_size: Option<u32>,

    /// Depth of the volume strips fall through
    #[arg(long)]
    grid_depth: Option<f32>,

    /// Length of the brightness wave, in glyphs
    #[arg(long)]
    wave_size: Option<u32>,

    /// Fraction of the depth at which strips splash, in (0.5, 1]
    #[arg(long)]
    splash_ratio: Option<f32>,

    /// Global speed multiplier
    #[arg(long)]
    speed: Option<f32>,

    /// Character set: matrix, decimal, hex, binary, dna
    #[arg(long)]
    mode: Option<GlyphMode>,

    /// Print the effective options as TOML and exit
    #[arg(long)]
    print_config: bool,
}

impl Cli {
    /// Options from `--config` (or defaults) with flag overrides applied.
    fn options(&self) -> Result<Options, GlyphfallError> {
        let mut options = match &self.config {
            Some(path) => Options::load(path)?,
            None => Options::default(),
        };
        let rain = &mut options.rain;
        if let Some(v) = self.strips {
            rain.strips = v;
        }
        if let Some(v) = self.grid_size {
            rain.grid_size = v;
        }
        if let Some(v) = self.grid_depth {
            rain.grid_depth = v;
        }
        if let Some(v) = self.wave_size {
            rain.wave_size = v;
        }
        if let Some(v) = self.splash_ratio {
            rain.splash_ratio = v;
        }
        if let Some(v) = self.speed {
            rain.speed = v;
        }
        if let Some(v) = self.mode {
            rain.mode = v;
        }
        options.validate()?;
        Ok(options)
    }
}

/// Decode a PNG into tightly packed RGBA8.
fn load_atlas(path: &Path) -> Result<AtlasImage, GlyphfallError> {
    let atlas_err = |e: &dyn Display| {
        GlyphfallError::Atlas(format!("{}: {e}", path.display()))
    };

    let file = File::open(path)?;
    let mut decoder = png::Decoder::new(BufReader::new(file));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info().map_err(|e| atlas_err(&e))?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf).map_err(|e| atlas_err(&e))?;
    buf.truncate(info.buffer_size());

    let rgba = match info.color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => buf
            .chunks_exact(3)
            .flat_map(|p| [p[0], p[1], p[2], u8::MAX])
            .collect(),
        png::ColorType::GrayscaleAlpha => buf
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0], p[1]])
            .collect(),
        png::ColorType::Grayscale => {
            buf.iter().flat_map(|&g| [g, g, g, u8::MAX]).collect()
        }
        png::ColorType::Indexed => {
            return Err(atlas_err(&"palette was not expanded"));
        }
    };
    log::info!(
        "loaded atlas {} ({}x{})",
        path.display(),
        info.width,
        info.height
    );
    AtlasImage::new(info.width, info.height, rgba)
}

#[allow(clippy::print_stdout)]
fn print_config(options: &Options) -> Result<(), GlyphfallError> {
    print!("{}", options.to_toml()?);
    Ok(())
}

fn run(cli: &Cli) -> Result<(), GlyphfallError> {
    let options = cli.options()?;

    if cli.print_config {
        return print_config(&options);
    }

    let atlas = if let Some(path) = &cli.atlas {
        load_atlas(path)?
    } else {
        log::warn!("no --atlas given, drawing placeholder cells");
        AtlasImage::placeholder()
    };

    let mut builder = Viewer::builder().with_options(options).with_atlas(atlas);
    if let Some(seed) = cli.seed {
        builder = builder.with_seed(seed);
    }
    builder.build().run()
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        log::error!("{e}");
        std::process::exit(1);
    }
}
