use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use a2_graphics::{BuiltinPalette, LoresMode, MonoMethod, PixelDepth};
use a2conv::models::{AppConfig, DhgrFormat, DitherConfig, OutputFile, ShrFormat, ShrModeName};
use a2conv::services::{
    encode_preview, load_palette_strip, load_png, output_stem, pack_to_apf, write_atomic,
    write_outputs, Conversion, ConversionService, NativeKind, NativePicture,
};

#[derive(Parser)]
#[command(name = "a2conv")]
#[command(about = "Convert PNG images to Apple II double hi-res, lo-res and super hi-res files")]
struct Cli {
    /// YAML file with conversion defaults
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every conversion
#[derive(Args, Debug, Clone)]
struct ConvertArgs {
    /// Input PNG file
    input: PathBuf,

    /// Output directory (defaults to the input's directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output file stem (defaults to the input name)
    #[arg(long)]
    name: Option<String>,

    /// Built-in palette name or code 0-5
    #[arg(short, long)]
    palette: Option<String>,

    /// Luma standard: 601, 709, 240, 911, 2020 or 411
    #[arg(long)]
    luma: Option<String>,

    /// File with three luma coefficients (red, green, blue), one per line
    #[arg(long)]
    luma_file: Option<PathBuf>,

    /// Dither kernel: floyd-steinberg, atkinson, atkinson-reduced, buckels,
    /// buckels-random or none
    #[arg(short, long)]
    kernel: Option<String>,

    /// Error carried forward, in percent (1-100)
    #[arg(long)]
    bleed: Option<u16>,

    /// Drop the truncation residue instead of depositing it
    #[arg(long)]
    no_error_sum: bool,

    /// Seed for random residual placement
    #[arg(long)]
    seed: Option<u64>,

    /// Map exactly when the image already fits the palette
    #[arg(long)]
    verbatim: bool,

    /// Append CiderPress file type tags to output names
    #[arg(long)]
    tags: bool,

    /// Also write a PNG preview of the result
    #[arg(long)]
    preview: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum MonoArg {
    #[default]
    Threshold,
    Dither,
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum DepthArg {
    #[value(name = "1")]
    One,
    #[value(name = "2")]
    Two,
    #[default]
    #[value(name = "4")]
    Four,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a 140x192 image to double hi-res color
    Dhgr {
        #[command(flatten)]
        args: ConvertArgs,

        #[arg(long, value_enum, default_value_t)]
        format: DhgrFormat,

        /// Take even scanlines from this double hi-res file
        #[arg(long)]
        interlace: Option<PathBuf>,
    },
    /// Convert a 560x192 (or 140x192 color) image to monochrome double hi-res
    Mono {
        #[command(flatten)]
        args: ConvertArgs,

        #[arg(long, value_enum, default_value_t)]
        format: DhgrFormat,

        /// Method for 560-wide images
        #[arg(long, value_enum, default_value_t)]
        method: MonoArg,

        /// Bit planes replayed for 140-wide color images
        #[arg(long, value_enum, default_value_t)]
        depth: DepthArg,
    },
    /// Convert a 40x48 image to lo-res
    Lores {
        #[command(flatten)]
        args: ConvertArgs,
    },
    /// Convert an 80x48 image to double lo-res
    Dlores {
        #[command(flatten)]
        args: ConvertArgs,
    },
    /// Convert a 320x200 image to super hi-res
    Shr {
        #[command(flatten)]
        args: ConvertArgs,

        #[arg(long, value_enum, default_value_t)]
        format: ShrFormat,

        /// Palette selection mode
        #[arg(long, value_enum)]
        mode: Option<ShrModeName>,

        /// Palettes searched in sectioned mode
        #[arg(long)]
        sections: Option<usize>,

        /// Palette strip PNG, 16 pixels wide, 1/8/16/200 rows
        #[arg(long)]
        pool: Option<PathBuf>,

        /// At most one grey per population palette
        #[arg(long)]
        limit_greys: bool,

        /// APF header byte order: big or little
        #[arg(long)]
        byte_order: Option<String>,
    },
    /// Rewrite a PIC or Brooks file as Apple Preferred Format
    Pack {
        input: PathBuf,

        /// Output file (defaults to <input>.PNT)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Input kind (detected from name and size when omitted)
        #[arg(long, value_enum)]
        kind: Option<NativeKind>,

        #[arg(long)]
        byte_order: Option<String>,

        #[arg(long)]
        tags: bool,
    },
    /// Render an Apple II picture file to PNG
    View {
        input: PathBuf,

        /// Output PNG
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, value_enum)]
        kind: Option<NativeKind>,

        /// Palette for double hi-res and lo-res files
        #[arg(short, long)]
        palette: Option<String>,

        /// Show double hi-res as 560x192 black and white
        #[arg(long)]
        mono: bool,

        #[arg(long)]
        byte_order: Option<String>,
    },
    /// List the built-in palettes
    Palettes,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "a2conv=debug,a2_graphics=debug"
    } else {
        "a2conv=info"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = AppConfig::load(cli.config.as_deref());

    match cli.command {
        Commands::Dhgr {
            args,
            format,
            interlace,
        } => {
            apply_args(&args, &mut config);
            let service = ConversionService::from_app_config(&config, args.luma_file.as_deref())?;
            let image = load_png(&args.input)?;
            let even = match interlace {
                Some(path) => match read_native(&path, None, &config)? {
                    NativePicture::Dhgr(fb) => Some(fb),
                    _ => anyhow::bail!("{} is not a double hi-res file", path.display()),
                },
                None => None,
            };
            let conversion = service.dhgr(&image, format, even.as_ref())?;
            finish(&args, &config, conversion)
        }
        Commands::Mono {
            args,
            format,
            method,
            depth,
        } => {
            apply_args(&args, &mut config);
            let method = match method {
                MonoArg::Threshold => MonoMethod::Threshold,
                MonoArg::Dither => MonoMethod::Dither,
            };
            let depth = match depth {
                DepthArg::One => PixelDepth::One,
                DepthArg::Two => PixelDepth::Two,
                DepthArg::Four => PixelDepth::Four,
            };
            let service = ConversionService::from_app_config(&config, args.luma_file.as_deref())?
                .with_mono(method, depth);
            let image = load_png(&args.input)?;
            let conversion = service.mono(&image, format)?;
            finish(&args, &config, conversion)
        }
        Commands::Lores { args } => run_lores(args, config, LoresMode::Single),
        Commands::Dlores { args } => run_lores(args, config, LoresMode::Double),
        Commands::Shr {
            args,
            format,
            mode,
            sections,
            pool,
            limit_greys,
            byte_order,
        } => {
            apply_args(&args, &mut config);
            if let Some(mode) = mode {
                config.shr.mode = mode;
            }
            if let Some(sections) = sections {
                config.shr.sections = sections;
            }
            if limit_greys {
                config.shr.limit_greys = true;
            }
            if let Some(order) = byte_order {
                config.byte_order = order;
            }
            let service = ConversionService::from_app_config(&config, args.luma_file.as_deref())?;
            let pool = pool.as_deref().map(load_palette_strip).transpose()?;
            let image = load_png(&args.input)?;
            let conversion = service.shr(&image, pool, format)?;
            finish(&args, &config, conversion)
        }
        Commands::Pack {
            input,
            output,
            kind,
            byte_order,
            tags,
        } => {
            if let Some(order) = byte_order {
                config.byte_order = order;
            }
            let bytes = std::fs::read(&input).with_context(|| format!("reading {}", input.display()))?;
            let kind = kind
                .or_else(|| NativeKind::detect(&input, &bytes))
                .context("cannot tell the picture type; pass --kind")?;
            let apf = pack_to_apf(&bytes, kind, config.byte_order()?)?;
            let file = OutputFile::new("PNT", Some(a2conv::models::tags::APF), apf);
            let path = match output {
                Some(path) => path,
                None => input
                    .with_file_name(file.file_name(&output_stem(&input), tags || config.tags)),
            };
            write_atomic(&path, &file.bytes)?;
            println!("Wrote {} ({} bytes)", path.display(), file.bytes.len());
            Ok(())
        }
        Commands::View {
            input,
            output,
            kind,
            palette,
            mono,
            byte_order,
        } => {
            if let Some(palette) = palette {
                config.palette = palette;
            }
            if let Some(order) = byte_order {
                config.byte_order = order;
            }
            let picture = read_native(&input, kind, &config)?;
            let preview = picture.preview(config.builtin_palette()?.palette(), mono);
            let png = encode_preview(&preview)?;
            write_atomic(&output, &png)?;
            println!("Rendered {} ({} bytes)", output.display(), png.len());
            Ok(())
        }
        Commands::Palettes => {
            for (code, builtin) in BuiltinPalette::ALL.into_iter().enumerate() {
                let colors: Vec<String> = builtin
                    .palette()
                    .entries()
                    .iter()
                    .map(|c| c.to_string())
                    .collect();
                println!("{code} {:<14} {}", builtin.name(), colors.join(" "));
            }
            Ok(())
        }
    }
}

fn run_lores(args: ConvertArgs, mut config: AppConfig, mode: LoresMode) -> anyhow::Result<()> {
    apply_args(&args, &mut config);
    let service = ConversionService::from_app_config(&config, args.luma_file.as_deref())?;
    let image = load_png(&args.input)?;
    let conversion = service.lores(&image, mode)?;
    finish(&args, &config, conversion)
}

/// Command-line flags override the config file.
fn apply_args(args: &ConvertArgs, config: &mut AppConfig) {
    if let Some(palette) = &args.palette {
        config.palette = palette.clone();
    }
    if let Some(luma) = &args.luma {
        config.luma = luma.clone();
    }
    match args.kernel.as_deref() {
        Some("none") => config.dither = None,
        Some(kernel) => match config.dither.as_mut() {
            Some(dither) => dither.kernel = kernel.to_string(),
            None => {
                config.dither = Some(DitherConfig {
                    kernel: kernel.to_string(),
                    bleed_percent: 100,
                    error_sum: true,
                    seed: None,
                })
            }
        },
        None => {}
    }
    if let Some(dither) = config.dither.as_mut() {
        if let Some(bleed) = args.bleed {
            dither.bleed_percent = bleed;
        }
        if args.no_error_sum {
            dither.error_sum = false;
        }
        if let Some(seed) = args.seed {
            dither.seed = Some(seed);
        }
    }
    config.verbatim |= args.verbatim;
    config.tags |= args.tags;
}

fn read_native(path: &Path, kind: Option<NativeKind>, config: &AppConfig) -> anyhow::Result<NativePicture> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let kind = kind
        .or_else(|| NativeKind::detect(path, &bytes))
        .with_context(|| format!("cannot tell the picture type of {}; pass --kind", path.display()))?;
    Ok(NativePicture::read(&bytes, kind, config.byte_order()?)?)
}

fn finish(args: &ConvertArgs, config: &AppConfig, conversion: Conversion) -> anyhow::Result<()> {
    let dir = match &args.output {
        Some(dir) => dir.clone(),
        None => args
            .input
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from(".")),
    };
    let stem = args.name.clone().unwrap_or_else(|| output_stem(&args.input));
    let written = write_outputs(&dir, &stem, &conversion.files, config.tags)?;

    if let Some(preview) = &args.preview {
        write_atomic(preview, &encode_preview(&conversion.preview)?)?;
        println!("Preview {}", preview.display());
    }
    for path in written {
        println!("Wrote {}", path.display());
    }
    Ok(())
}
