//! Command-line interface for the recluster filters.
//!
//! Usage: recluster <FILTER> <IMAGE> [ARGS...]

use std::path::{Path, PathBuf};
use std::process::exit;

use recluster::{
    hatch, quantize, remap, smooth, FilterError, GlyphSet, PixelGrid, Rgb, RgbaGrid, GLYPH_LEVELS,
};

/// The closed set of filters this binary dispatches to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum FilterKind {
    Recolor,
    Remap,
    Pixelate,
    Dots,
    Pencil,
    Smooth,
}

impl FilterKind {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "recolor" => Some(Self::Recolor),
            "remap" => Some(Self::Remap),
            "pixelate" => Some(Self::Pixelate),
            "dots" => Some(Self::Dots),
            "pencil" => Some(Self::Pencil),
            "smooth" => Some(Self::Smooth),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Recolor => "recolor",
            Self::Remap => "remap",
            Self::Pixelate => "pixelate",
            Self::Dots => "dots",
            Self::Pencil => "pencil",
            Self::Smooth => "smooth",
        }
    }

    /// The glyph style directory backing a hatching filter.
    fn glyph_style(self) -> Option<&'static str> {
        match self {
            Self::Pixelate => Some("bucket"),
            Self::Dots => Some("dots"),
            Self::Pencil => Some("pencil"),
            _ => None,
        }
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 3 {
        print_usage(&args[0]);
        exit(1);
    }

    let kind = match FilterKind::parse(&args[1]) {
        Some(kind) => kind,
        None => {
            eprintln!("unknown filter: {}", args[1]);
            print_usage(&args[0]);
            exit(1);
        }
    };

    let input = PathBuf::from(&args[2]);
    let img = image::open(&input)
        .unwrap_or_else(|e| fail(&format!("failed to open {}: {e}", input.display())))
        .to_rgb8();
    let grid = PixelGrid::from_image(&img);
    let rest = &args[3..];

    println!(
        "Applying {} to {} ({}x{})",
        kind.name(),
        input.display(),
        grid.width(),
        grid.height()
    );

    match kind {
        FilterKind::Recolor => {
            let palette: Vec<Rgb> = rest.iter().map(|hex| parse_hex(hex)).collect();
            let out = quantize(&grid, &palette).unwrap_or_else(|e| fail_filter(kind, &e));
            save_rgb(&out, &input, kind.name());
        }
        FilterKind::Remap => {
            if rest.len() < 2 {
                fail("remap needs a front image and a back image");
            }
            let front = open_grid(&rest[0]);
            let back = open_grid(&rest[1]);
            let out = remap(&grid, &front, &back).unwrap_or_else(|e| fail_filter(kind, &e));
            save_rgb(&out, &input, kind.name());
        }
        FilterKind::Pixelate | FilterKind::Dots | FilterKind::Pencil => {
            let tile = parse_or(rest.first(), 5, "tile size");
            let glyphs = load_glyphs(kind.glyph_style().unwrap(), tile);
            let out = hatch(&grid, &glyphs).unwrap_or_else(|e| fail_filter(kind, &e));
            save_rgba(&out, &input, kind.name());
        }
        FilterKind::Smooth => {
            let k = parse_or(rest.first(), 40, "cluster count");
            let floor = parse_or(rest.get(1), 20, "cluster floor");
            let out = smooth(&grid, k, floor).unwrap_or_else(|e| fail_filter(kind, &e));
            save_rgb(&out, &input, kind.name());
        }
    }
}

fn parse_or(arg: Option<&String>, default: usize, what: &str) -> usize {
    match arg {
        Some(raw) => raw
            .parse()
            .unwrap_or_else(|_| fail(&format!("invalid {what}: {raw}"))),
        None => default,
    }
}

/// Parse an `RRGGBB` hex color. The core only ever sees parsed colors.
fn parse_hex(hex: &str) -> Rgb {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        fail(&format!("{hex} is not a valid RRGGBB color"));
    }
    let channel = |range| u8::from_str_radix(&digits[range], 16).unwrap();
    Rgb::new(channel(0..2), channel(2..4), channel(4..6))
}

fn open_grid(path: &str) -> PixelGrid {
    let img = image::open(path)
        .unwrap_or_else(|e| fail(&format!("failed to open {path}: {e}")))
        .to_rgb8();
    PixelGrid::from_image(&img)
}

/// Load a style's ten glyph tiles from `styles/<style>/<level>.png` and
/// resize each to the tile size.
fn load_glyphs(style: &str, tile: usize) -> GlyphSet {
    let mut tiles = Vec::with_capacity(GLYPH_LEVELS);
    for level in 0..GLYPH_LEVELS {
        let path = format!("styles/{style}/{level}.png");
        let img = image::open(&path)
            .unwrap_or_else(|e| fail(&format!("failed to load glyph {path}: {e}")))
            .to_rgba8();
        let resized = image::imageops::resize(
            &img,
            tile as u32,
            tile as u32,
            image::imageops::FilterType::Nearest,
        );
        tiles.push(RgbaGrid::from_image(&resized));
    }
    GlyphSet::new(tile, tiles).unwrap_or_else(|e| fail(&format!("bad glyph set: {e}")))
}

fn output_path(input: &Path, filter: &str) -> PathBuf {
    let name = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    PathBuf::from("results").join(format!("{filter}_{name}.png"))
}

fn save_rgb(grid: &PixelGrid, input: &Path, filter: &str) {
    let path = output_path(input, filter);
    ensure_results_dir();
    grid.to_image()
        .save(&path)
        .unwrap_or_else(|e| fail(&format!("failed to save {}: {e}", path.display())));
    println!("Saved to {}", path.display());
}

fn save_rgba(grid: &RgbaGrid, input: &Path, filter: &str) {
    let path = output_path(input, filter);
    ensure_results_dir();
    grid.to_image()
        .save(&path)
        .unwrap_or_else(|e| fail(&format!("failed to save {}: {e}", path.display())));
    println!("Saved to {}", path.display());
}

fn ensure_results_dir() {
    std::fs::create_dir_all("results")
        .unwrap_or_else(|e| fail(&format!("failed to create results directory: {e}")));
}

fn fail_filter(kind: FilterKind, err: &FilterError) -> ! {
    eprintln!("{} failed: {err}", kind.name());
    exit(1);
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    exit(1);
}

fn print_usage(program: &str) {
    eprintln!(
        r#"Clustering-driven image filters

Usage: {program} <FILTER> <IMAGE> [ARGS...]

Filters:
  recolor <IMAGE> <HEX> <HEX> <HEX> [HEX...]   recolor onto a palette of hex colors
  remap <MAP> <FRONT> <BACK>                   paint white map regions from BACK, the rest from FRONT
  pixelate <IMAGE> [TILE]                      stamp solid tiles (default tile size 5)
  dots <IMAGE> [TILE]                          stamp stippled tiles
  pencil <IMAGE> [TILE]                        stamp pencil-mark tiles
  smooth <IMAGE> [K] [FLOOR]                   re-quantize at K, halving down to FLOOR (default 40, 20)

Output is written to results/<filter>_<image>.png.
Set RUST_LOG=debug for clustering traces.
"#
    );
}
